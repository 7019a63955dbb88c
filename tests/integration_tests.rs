//! Integration tests for the solfa library
//!
//! Cross-module properties: construction vs identification, scales vs
//! fields, fingerings vs chord content, events vs rhythm.

use std::collections::BTreeSet;

use solfa::scale::SCALE_TYPES;
use solfa::tables::SCALE_SIZES;
use solfa::{
    Chord, Duration, Event, Field, Fretboard, Interval, Note, Scale, ScaleType, Sequence, Tempo,
    TimeSignature,
};

fn notes(names: &[&str]) -> Vec<Note> {
    names.iter().map(|n| Note::new(n).unwrap()).collect()
}

fn pitch_classes(chord: &Chord) -> BTreeSet<u8> {
    chord.notes().iter().map(Note::semitone).collect()
}

#[test]
fn test_identify_basic_triads() {
    let cases = [
        (vec!["C", "E", "G"], "CM"),
        (vec!["A", "C", "E"], "Am"),
        (vec!["B", "D", "F"], "Bdim"),
        (vec!["G", "B", "D", "F"], "G7"),
    ];
    for (spelled, expected) in cases {
        let chord = solfa::identify(&notes(&spelled)).expect("should identify");
        assert_eq!(chord.name(), expected);
    }
}

#[test]
fn test_identification_starts_from_the_first_note() {
    // the same pitch-class set reads differently depending on which
    // note is offered first
    assert_eq!(
        solfa::identify(&notes(&["D", "F", "A", "C"])).unwrap().name(),
        "Dm7"
    );
    assert_eq!(
        solfa::identify(&notes(&["F", "A", "C", "D"])).unwrap().name(),
        "F6"
    );
}

#[test]
fn test_identification_rejects_degenerate_input() {
    assert!(solfa::identify(&[]).is_none());
    assert!(solfa::identify(&notes(&["C"])).is_none());
    assert!(solfa::identify(&notes(&["C", "C"])).is_none());
    assert!(solfa::identify(&notes(&["C", "C#", "D"])).is_none());
}

#[test]
fn test_enharmonic_spellings_identify_alike() {
    let flat = solfa::identify(&notes(&["Bb", "D", "F"])).unwrap();
    let sharp = solfa::identify(&notes(&["A#", "D", "F"])).unwrap();
    assert_eq!(flat, sharp);
    assert_eq!(flat.type_name(), "M");
}

#[test]
fn test_construct_then_identify_is_stable() {
    // chord names whose pitch-class set is unique among the formulas
    for name in [
        "CM", "Cm", "Cdim", "C7M", "Cm7", "C7", "C6", "Cm6", "Cm7(b5)", "Fsus4", "G7", "Am7",
    ] {
        let built = Chord::new(name).unwrap();
        let identified = solfa::identify(&built.notes()).expect("chord notes should identify");
        assert_eq!(identified, built, "{name} should survive a roundtrip");
        assert_eq!(identified.root(), built.root());
        assert_eq!(pitch_classes(&identified), pitch_classes(&built));
    }
}

#[test]
fn test_scale_cardinalities() {
    for scale_type in SCALE_TYPES {
        let scale = Scale::new("C", scale_type).unwrap();
        let expected = SCALE_SIZES[scale_type.index()];
        assert_eq!(scale.size(), expected, "{}", scale_type.name());
        assert_eq!(scale.notes().len(), usize::from(expected));
    }
}

#[test]
fn test_degree_readout_is_symmetric() {
    for scale_type in SCALE_TYPES {
        let scale = Scale::new("D", scale_type).unwrap();
        for degree in 1..=scale.size() {
            let note = scale.degree(degree);
            assert_eq!(scale.degree_of(&note), Some(degree));
        }
    }
}

#[test]
fn test_relative_scales_share_notes_and_signature() {
    let c_major = Scale::major("C").unwrap();
    let a_minor = c_major.relative();
    assert_eq!(a_minor.tonic().name(), "A");
    assert_eq!(c_major.signature(), 0);
    assert_eq!(a_minor.signature(), 0);

    let major_set: BTreeSet<u8> = c_major.notes().iter().map(Note::semitone).collect();
    let minor_set: BTreeSet<u8> = a_minor.notes().iter().map(Note::semitone).collect();
    assert_eq!(major_set, minor_set);
}

#[test]
fn test_field_chords_stay_in_the_scale() {
    let field = Field::major("A").unwrap();
    let scale = field.scale();
    for chord in field.triads().iter().chain(field.sevenths().iter()) {
        for note in chord.notes() {
            assert!(scale.contains(&note), "{} escapes A major", note.name());
        }
    }
}

#[test]
fn test_deduction_is_deterministic() {
    let items = ["CM", "Dm", "Em", "FM", "G7", "Am"];
    let first = solfa::deduce(&items);
    let second = solfa::deduce(&items);

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].tonic.name(), "C");
    assert_eq!(first[0].scale_type, ScaleType::Major);
    assert_eq!(first[0].matched, 6);
    assert_eq!(second[0].tonic, first[0].tonic);
    assert_eq!(second[0].roles, first[0].roles);

    for pair in first.windows(2) {
        assert!(pair[0].matched >= pair[1].matched);
    }
}

#[test]
fn test_fingerings_cover_the_chord() {
    let board = Fretboard::violao();
    let chord = Chord::new("CM").unwrap();
    let wanted = pitch_classes(&chord);

    let found = board.fingerings(&chord, 5);
    assert!(!found.is_empty());
    for fingering in &found {
        let mut covered = BTreeSet::new();
        for (string, fret) in fingering.frets.iter().enumerate() {
            if let Some(fret) = fret {
                covered.insert(board.note_at(string as u8, *fret).semitone());
            }
        }
        assert!(
            wanted.is_subset(&covered),
            "fingering {:?} misses chord tones",
            fingering.frets
        );
    }
    for pair in found.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
}

#[test]
fn test_fingering_identifies_back() {
    let board = Fretboard::violao();
    let am = board.identify(&[None, Some(0), Some(2), Some(2), Some(1), Some(0)]);
    assert_eq!(am.unwrap().name(), "Am");
}

#[test]
fn test_interval_inversion_is_an_involution() {
    for semitones in 0..12 {
        let interval = Interval::new(semitones);
        assert_eq!(interval.invert().invert(), interval.simple());
    }
}

#[test]
fn test_field_chords_played_as_a_sequence() {
    let field = Field::major("C").unwrap();
    let mut seq = Sequence::new();
    for chord in field.triads() {
        seq.add(Event::chord(chord, Duration::quarter(), 4));
    }

    assert_eq!(seq.total_beats(), 7.0);
    assert_eq!(seq.total_seconds(&Tempo::new(60)), 7.0);
    assert_eq!(seq.bar_count(&TimeSignature::new(7, 4)), 1.0);
    // each triad renders three note-on/note-off pairs
    assert_eq!(seq.to_midi().len(), 7 * 3 * 6);

    seq.transpose(2);
    assert_eq!(seq.get(0).unwrap().midi_number(), 62);
}
