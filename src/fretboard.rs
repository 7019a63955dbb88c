//! Fretted-instrument engine: tunings, position scans, fingering search
//! and fret-shape identification.

use serde::Serialize;

use crate::chord::Chord;
use crate::note::Note;
use crate::scale::Scale;
use crate::tables::{TUNING_BANDOLIM, TUNING_CAVAQUINHO, TUNING_UKULELE, TUNING_VIOLAO};

/// Width of the fret window a hand covers, in frets above the start.
const HAND_SPAN: u8 = 4;

/// A single playable position on the fretboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FretPosition {
    /// String index, lowest-pitched string first.
    pub string: u8,
    pub fret: u8,
    pub midi: u8,
    pub note: Note,
}

/// A complete fretboard assignment for a chord: one action per string,
/// `None` meaning muted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingering {
    pub frets: Vec<Option<u8>>,
    /// Playability score; lower is better.
    pub score: i32,
}

impl Fingering {
    /// Distance between the highest and lowest fretted fret.
    pub fn span(&self) -> u8 {
        let fretted: Vec<u8> = self.frets.iter().filter_map(|&f| f).filter(|&f| f > 0).collect();
        match (fretted.iter().min(), fretted.iter().max()) {
            (Some(&lo), Some(&hi)) => hi - lo,
            _ => 0,
        }
    }

    pub fn muted_count(&self) -> usize {
        self.frets.iter().filter(|f| f.is_none()).count()
    }

    pub fn open_count(&self) -> usize {
        self.frets.iter().filter(|&&f| f == Some(0)).count()
    }
}

/// A fretted instrument: a tuning, a fret count and an optional capo.
///
/// ```
/// use solfa::Fretboard;
/// let guitar = Fretboard::violao();
/// assert_eq!(guitar.string_count(), 6);
/// assert_eq!(guitar.note_at(0, 5).name(), "A");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Fretboard {
    name: String,
    tuning: Vec<u8>,
    frets: u8,
    capo: u8,
}

impl Fretboard {
    /// Brazilian guitar, standard tuning E2 A2 D3 G3 B3 E4.
    pub fn violao() -> Fretboard {
        Fretboard::custom("Violao", &TUNING_VIOLAO, 19)
    }

    /// Cavaquinho, tuning D4 G4 B4 D5.
    pub fn cavaquinho() -> Fretboard {
        Fretboard::custom("Cavaquinho", &TUNING_CAVAQUINHO, 17)
    }

    /// Bandolim (mandolin), tuning G3 D4 A4 E5.
    pub fn bandolim() -> Fretboard {
        Fretboard::custom("Bandolim", &TUNING_BANDOLIM, 20)
    }

    /// Ukulele, reentrant tuning G4 C4 E4 A4.
    pub fn ukulele() -> Fretboard {
        Fretboard::custom("Ukulele", &TUNING_UKULELE, 15)
    }

    /// An arbitrary instrument from open-string MIDI numbers, lowest
    /// string first.
    pub fn custom(name: &str, tuning: &[u8], frets: u8) -> Fretboard {
        Fretboard { name: name.to_string(), tuning: tuning.to_vec(), frets, capo: 0 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn string_count(&self) -> u8 {
        self.tuning.len() as u8
    }

    pub fn fret_count(&self) -> u8 {
        self.frets
    }

    pub fn capo(&self) -> u8 {
        self.capo
    }

    /// The same instrument with a capo at the given fret. Open strings
    /// sound from the capo; fret numbers stay relative to it.
    pub fn with_capo(&self, fret: u8) -> Fretboard {
        Fretboard { capo: fret, ..self.clone() }
    }

    /// MIDI number of an open string (including the capo).
    pub fn open_midi(&self, string: u8) -> u8 {
        self.tuning[usize::from(string)] + self.capo
    }

    /// MIDI number at (string, fret).
    pub fn midi_at(&self, string: u8, fret: u8) -> u8 {
        self.open_midi(string) + fret
    }

    /// The note sounding at (string, fret).
    pub fn note_at(&self, string: u8, fret: u8) -> Note {
        Note::from_midi(self.midi_at(string, fret))
    }

    /// Every position sounding the given pitch class, scanning strings
    /// low to high and frets 0 through the fret count.
    pub fn positions(&self, note: &Note) -> Vec<FretPosition> {
        self.positions_in_range(note, 0, self.frets)
    }

    /// Positions of a pitch class within an inclusive fret range.
    pub fn positions_in_range(&self, note: &Note, start: u8, end: u8) -> Vec<FretPosition> {
        let end = end.min(self.frets);
        let mut found = Vec::new();
        for string in 0..self.string_count() {
            for fret in start..=end {
                let midi = self.midi_at(string, fret);
                if midi % 12 == note.semitone() {
                    found.push(FretPosition {
                        string,
                        fret,
                        midi,
                        note: Note::from_midi(midi),
                    });
                }
            }
        }
        found
    }

    /// Every position sounding a scale tone within an inclusive fret
    /// range.
    pub fn scale_positions(&self, scale: &Scale, start: u8, end: u8) -> Vec<FretPosition> {
        let end = end.min(self.frets);
        let mut found = Vec::new();
        for string in 0..self.string_count() {
            for fret in start..=end {
                let midi = self.midi_at(string, fret);
                if scale.contains(&Note::from_midi(midi)) {
                    found.push(FretPosition {
                        string,
                        fret,
                        midi,
                        note: Note::from_midi(midi),
                    });
                }
            }
        }
        found
    }

    /// The best fingering for a chord around a start fret, or `None`
    /// when no assignment covers the chord's pitch classes within the
    /// hand span.
    pub fn fingering(&self, chord: &Chord, start_fret: u8) -> Option<Fingering> {
        let mut best: Option<Fingering> = None;
        for candidate in self.search_fingerings(chord, start_fret) {
            match &best {
                Some(current) if current.score <= candidate.score => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    /// Up to `max_results` distinct fingerings for a chord, scanning
    /// every start fret, ranked best first.
    pub fn fingerings(&self, chord: &Chord, max_results: usize) -> Vec<Fingering> {
        let last_start = self.frets.saturating_sub(HAND_SPAN);
        let mut all: Vec<Fingering> = Vec::new();
        for start in 0..=last_start {
            for candidate in self.search_fingerings(chord, start) {
                if !all.iter().any(|f| f.frets == candidate.frets) {
                    all.push(candidate);
                }
            }
        }
        all.sort_by_key(|f| f.score);
        all.truncate(max_results);
        all
    }

    /// Identify the chord produced by a fret shape, one entry per string
    /// (`None` = muted), strings low to high.
    pub fn identify(&self, frets: &[Option<u8>]) -> Option<Chord> {
        let notes: Vec<Note> = frets
            .iter()
            .enumerate()
            .filter_map(|(string, fret)| {
                fret.map(|f| Note::from_midi(self.midi_at(string as u8, f)))
            })
            .collect();
        Chord::identify(&notes)
    }

    /// Depth-first combination of per-string candidate actions. Every
    /// complete assignment covering the chord's full pitch-class set is
    /// yielded; partial assignments whose fretted notes already exceed
    /// the hand span are pruned.
    fn search_fingerings(&self, chord: &Chord, start_fret: u8) -> Vec<Fingering> {
        let chord_mask: u16 = chord
            .notes()
            .iter()
            .fold(0, |mask, note| mask | 1 << note.semitone());

        let window_end = (start_fret + HAND_SPAN).min(self.frets);
        let per_string: Vec<Vec<Option<u8>>> = (0..self.string_count())
            .map(|string| {
                let mut actions: Vec<Option<u8>> = Vec::new();
                if chord_mask >> (self.open_midi(string) % 12) & 1 == 1 {
                    actions.push(Some(0));
                }
                for fret in start_fret.max(1)..=window_end {
                    if chord_mask >> (self.midi_at(string, fret) % 12) & 1 == 1 {
                        actions.push(Some(fret));
                    }
                }
                actions.push(None);
                actions
            })
            .collect();

        let mut found = Vec::new();
        let mut assignment: Vec<Option<u8>> = Vec::with_capacity(per_string.len());
        self.descend(chord_mask, &per_string, &mut assignment, 0, &mut found);
        found
    }

    fn descend(
        &self,
        chord_mask: u16,
        per_string: &[Vec<Option<u8>>],
        assignment: &mut Vec<Option<u8>>,
        covered: u16,
        found: &mut Vec<Fingering>,
    ) {
        let string = assignment.len();
        if string == per_string.len() {
            if covered & chord_mask == chord_mask {
                found.push(self.finish(assignment));
            }
            return;
        }
        for &action in &per_string[string] {
            assignment.push(action);
            if fretted_span(assignment) <= HAND_SPAN {
                let covered = match action {
                    Some(fret) => {
                        covered | 1 << (self.midi_at(string as u8, fret) % 12)
                    }
                    None => covered,
                };
                self.descend(chord_mask, per_string, assignment, covered, found);
            }
            assignment.pop();
        }
    }

    fn finish(&self, assignment: &[Option<u8>]) -> Fingering {
        let fingering = Fingering { frets: assignment.to_vec(), score: 0 };
        let score = 3 * i32::from(fingering.span()) + 4 * fingering.muted_count() as i32
            - fingering.open_count() as i32;
        Fingering { score, ..fingering }
    }
}

fn fretted_span(assignment: &[Option<u8>]) -> u8 {
    let fretted: Vec<u8> = assignment.iter().filter_map(|&f| f).filter(|&f| f > 0).collect();
    match (fretted.iter().min(), fretted.iter().max()) {
        (Some(&lo), Some(&hi)) => hi - lo,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn violao_geometry() {
        let g = Fretboard::violao();
        assert_eq!(g.name(), "Violao");
        assert_eq!(g.string_count(), 6);
        assert_eq!(g.fret_count(), 19);
        assert_eq!(g.open_midi(0), 40);
        assert_eq!(g.open_midi(5), 64);
        assert_eq!(g.midi_at(0, 0), 40);
        assert_eq!(g.midi_at(0, 12), 52);
        assert_eq!(g.note_at(0, 5).name(), "A");
        assert_eq!(g.note_at(1, 0).name(), "A");
    }

    #[test]
    fn four_string_instruments() {
        assert_eq!(Fretboard::cavaquinho().string_count(), 4);
        assert_eq!(Fretboard::cavaquinho().name(), "Cavaquinho");
        assert_eq!(Fretboard::bandolim().string_count(), 4);
        assert_eq!(Fretboard::ukulele().name(), "Ukulele");
        assert_eq!(Fretboard::ukulele().open_midi(1), 60);
    }

    #[test]
    fn capo_shifts_open_strings() {
        let g = Fretboard::violao().with_capo(2);
        assert_eq!(g.open_midi(0), 42);
        assert_eq!(g.note_at(0, 0).name(), "F#");
        assert_eq!(g.midi_at(0, 3), 45);
    }

    #[test]
    fn position_scan() {
        let g = Fretboard::violao();
        let e = Note::new("E").unwrap();
        let positions = g.positions(&e);
        assert!(!positions.is_empty());
        for p in &positions {
            assert_eq!(p.midi % 12, 4);
            assert_eq!(p.note.name(), "E");
        }
        // both open E strings appear
        assert!(positions.iter().any(|p| p.string == 0 && p.fret == 0));
        assert!(positions.iter().any(|p| p.string == 5 && p.fret == 0));
    }

    #[test]
    fn scale_positions_stay_in_range() {
        let g = Fretboard::violao();
        let scale = Scale::major("C").unwrap();
        let positions = g.scale_positions(&scale, 0, 4);
        assert!(!positions.is_empty());
        for p in &positions {
            assert!(p.fret <= 4);
            assert!(scale.contains(&p.note));
        }
    }

    #[test]
    fn open_c_major_fingering() {
        let g = Fretboard::violao();
        let cm = Chord::new("CM").unwrap();
        let best = g.fingering(&cm, 0).unwrap();
        assert_eq!(
            best.frets,
            [Some(0), Some(3), Some(2), Some(0), Some(1), Some(0)]
        );
        assert_eq!(best.score, 3); // span 2, nothing muted, three open strings
        assert_eq!(best.span(), 2);
        assert_eq!(best.muted_count(), 0);
        assert_eq!(best.open_count(), 3);

        let am = Chord::new("Am").unwrap();
        let open_am = g.fingering(&am, 0).unwrap();
        assert_eq!(
            open_am.frets,
            [Some(0), Some(0), Some(2), Some(2), Some(1), Some(0)]
        );
        assert_eq!(open_am.score, 0);
    }

    #[test]
    fn ranked_fingerings_are_distinct_and_sorted() {
        let g = Fretboard::violao();
        let am = Chord::new("Am").unwrap();
        let list = g.fingerings(&am, 5);
        assert!(!list.is_empty());
        assert!(list.len() <= 5);
        for pair in list.windows(2) {
            assert!(pair[0].score <= pair[1].score);
            assert_ne!(pair[0].frets, pair[1].frets);
        }
    }

    #[test]
    fn no_fingering_when_coverage_is_impossible(){
        // a 7-pitch-class chord cannot be covered by 4 strings
        let uke = Fretboard::ukulele();
        let m13 = Chord::new("Cm13").unwrap();
        assert!(uke.fingering(&m13, 0).is_none());
    }

    #[test]
    fn identifies_fret_shapes() {
        let g = Fretboard::violao();
        let am = g
            .identify(&[None, Some(0), Some(2), Some(2), Some(1), Some(0)])
            .unwrap();
        assert_eq!(am.name(), "Am");

        let em = g
            .identify(&[Some(0), Some(2), Some(2), Some(0), Some(0), Some(0)])
            .unwrap();
        assert_eq!(em.name(), "Em");

        assert!(g.identify(&[None, None, None, None, None, None]).is_none());
    }
}
