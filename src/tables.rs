//! The static knowledge base: chromatic names, enharmonic spellings,
//! intervals, scale masks, chord formulas, tempo markings and tunings.
//!
//! Every lookup is a pure function of the table contents. Name tables are
//! pre-sorted and binary-searched; everything else is direct indexing.

/// Sharp-biased chromatic pitch-class names, indexed by semitone.
pub const CHROMATIC_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch classes in circle-of-fifths order: C G D A E B F# C# G# D# A# F.
pub const FIFTHS_ORDER: [u8; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];

/// Enharmonic spellings mapped to their canonical sharp-biased form.
/// Sorted by input string for binary search. ASCII only; both "Eb" and
/// "bE" orderings of the accidental are accepted.
pub static ENHARMONIC_MAP: [(&str, &str); 46] = [
    ("##A", "B"),
    ("##B", "C#"),
    ("##C", "D"),
    ("##D", "E"),
    ("##E", "F#"),
    ("##F", "G"),
    ("##G", "A"),
    ("#B", "C"),
    ("#E", "F"),
    ("A##", "B"),
    ("Ab", "G#"),
    ("Abb", "G"),
    ("B#", "C"),
    ("B##", "C#"),
    ("Bb", "A#"),
    ("Bbb", "A"),
    ("C##", "D"),
    ("Cb", "B"),
    ("Cbb", "B"),
    ("D##", "E"),
    ("Db", "C#"),
    ("Dbb", "C"),
    ("E#", "F"),
    ("E##", "F#"),
    ("Eb", "D#"),
    ("Ebb", "D"),
    ("F##", "G"),
    ("Fb", "E"),
    ("Fbb", "E"),
    ("G##", "A"),
    ("Gb", "F#"),
    ("Gbb", "F"),
    ("bA", "G#"),
    ("bB", "A#"),
    ("bC", "B"),
    ("bD", "C#"),
    ("bE", "D#"),
    ("bF", "E"),
    ("bG", "F#"),
    ("bbA", "G"),
    ("bbB", "A"),
    ("bbC", "B"),
    ("bbD", "C"),
    ("bbE", "D"),
    ("bbF", "E"),
    ("bbG", "F"),
];

/// Canonical sharp-biased spelling for an enharmonic input, if the
/// spelling is known. Plain chromatic names resolve to themselves.
pub fn enharmonic(spelling: &str) -> Option<&'static str> {
    if let Some(&name) = CHROMATIC_NAMES.iter().find(|&&n| n == spelling) {
        return Some(name);
    }
    ENHARMONIC_MAP
        .binary_search_by(|entry| entry.0.cmp(spelling))
        .ok()
        .map(|i| ENHARMONIC_MAP[i].1)
}

/// Interval data indexed by semitone count (0-23, two octaves).
pub struct IntervalData {
    /// Popular label ("5J", "3m", "#11").
    pub label: &'static str,
    /// Anglo-style label ("P5", "mi3", "d11").
    pub anglo: &'static str,
    /// Diatonic degree 1-14.
    pub degree: u8,
    /// Octave 1 (simple) or 2 (compound).
    pub octave: u8,
}

pub static INTERVAL_TABLE: [IntervalData; 24] = [
    IntervalData { label: "P1", anglo: "P1", degree: 1, octave: 1 },
    IntervalData { label: "2m", anglo: "mi2", degree: 2, octave: 1 },
    IntervalData { label: "2M", anglo: "ma2", degree: 2, octave: 1 },
    IntervalData { label: "3m", anglo: "mi3", degree: 3, octave: 1 },
    IntervalData { label: "3M", anglo: "ma3", degree: 3, octave: 1 },
    IntervalData { label: "4J", anglo: "P4", degree: 4, octave: 1 },
    IntervalData { label: "d5", anglo: "d5", degree: 5, octave: 1 },
    IntervalData { label: "5J", anglo: "P5", degree: 5, octave: 1 },
    IntervalData { label: "#5", anglo: "mi6", degree: 6, octave: 1 },
    IntervalData { label: "M6", anglo: "ma6", degree: 6, octave: 1 },
    IntervalData { label: "7m", anglo: "mi7", degree: 7, octave: 1 },
    IntervalData { label: "7M", anglo: "ma7", degree: 7, octave: 1 },
    IntervalData { label: "8J", anglo: "P8", degree: 8, octave: 2 },
    IntervalData { label: "b9", anglo: "mi9", degree: 9, octave: 2 },
    IntervalData { label: "9", anglo: "ma9", degree: 9, octave: 2 },
    IntervalData { label: "#9", anglo: "mi10", degree: 10, octave: 2 },
    IntervalData { label: "b11", anglo: "ma10", degree: 10, octave: 2 },
    IntervalData { label: "11", anglo: "P11", degree: 11, octave: 2 },
    IntervalData { label: "#11", anglo: "d11", degree: 11, octave: 2 },
    IntervalData { label: "5", anglo: "P12", degree: 12, octave: 2 },
    IntervalData { label: "b13", anglo: "mi13", degree: 13, octave: 2 },
    IntervalData { label: "13", anglo: "ma13", degree: 13, octave: 2 },
    IntervalData { label: "#13", anglo: "mi14", degree: 14, octave: 2 },
    IntervalData { label: "bI", anglo: "ma14", degree: 14, octave: 2 },
];

/// Consonance class by simple semitone: 0 = perfect, 1 = imperfect,
/// 2 = dissonant.
pub const INTERVAL_CONSONANCE: [u8; 12] = [0, 2, 2, 1, 1, 0, 2, 0, 1, 1, 2, 2];

pub const CONSONANCE_NAMES: [&str; 3] = ["perfect", "imperfect", "dissonant"];

/// Full interval names in English, indexed by semitone 0-23.
pub static INTERVAL_FULL_NAMES_EN: [&str; 24] = [
    "Perfect Unison",
    "Minor Second",
    "Major Second",
    "Minor Third",
    "Major Third",
    "Perfect Fourth",
    "Diminished Fifth",
    "Perfect Fifth",
    "Minor Sixth",
    "Major Sixth",
    "Minor Seventh",
    "Major Seventh",
    "Perfect Octave",
    "Minor Ninth",
    "Major Ninth",
    "Augmented Ninth",
    "Minor Tenth",
    "Perfect Eleventh",
    "Augmented Eleventh",
    "Perfect Twelfth",
    "Minor Thirteenth",
    "Major Thirteenth",
    "Augmented Thirteenth",
    "Major Fourteenth",
];

/// Full interval names in Portuguese, indexed by semitone 0-23.
pub static INTERVAL_FULL_NAMES_PT: [&str; 24] = [
    "Unissono Justo",
    "Segunda Menor",
    "Segunda Maior",
    "Terca Menor",
    "Terca Maior",
    "Quarta Justa",
    "Quinta Diminuta",
    "Quinta Justa",
    "Sexta Menor",
    "Sexta Maior",
    "Setima Menor",
    "Setima Maior",
    "Oitava Justa",
    "Nona Menor",
    "Nona Maior",
    "Nona Aumentada",
    "Decima Menor",
    "Decima Primeira Justa",
    "Decima Primeira Aumentada",
    "Decima Segunda Justa",
    "Decima Terceira Menor",
    "Decima Terceira Maior",
    "Decima Terceira Aumentada",
    "Decima Quarta Maior",
];

const fn bits(positions: &[u8]) -> u32 {
    let mut mask = 0u32;
    let mut i = 0;
    while i < positions.len() {
        mask |= 1 << positions[i];
        i += 1;
    }
    mask
}

/// 24-bit scale masks: the low octave carries the scale tones, the upper
/// octave the conventional tensions. Indexed by scale type.
pub static SCALE_MASKS: [u32; 10] = [
    // Major: 1 2 3 4 5 6 7 | 9 11 13
    bits(&[0, 2, 4, 5, 7, 9, 11, 14, 17, 21]),
    // Natural minor: 1 2 b3 4 5 b6 b7 | 9 11 b13
    bits(&[0, 2, 3, 5, 7, 8, 10, 14, 17, 20]),
    // Harmonic minor: 1 2 b3 4 5 b6 7 | 9 11 13
    bits(&[0, 2, 3, 5, 7, 8, 11, 14, 17, 21]),
    // Melodic minor: 1 2 b3 4 5 6 7 | 9 11 13
    bits(&[0, 2, 3, 5, 7, 9, 11, 14, 17, 21]),
    // Diminished (whole-half): 1 2 b3 4 b5 b6 bb7 7 | 9 11 13
    bits(&[0, 2, 3, 5, 6, 8, 10, 11, 14, 17, 21]),
    // Harmonic major: 1 2 3 4 5 b6 7 | 9 11 13
    bits(&[0, 2, 4, 5, 7, 8, 11, 14, 17, 21]),
    // Whole tone: 1 2 3 #4 #5 b7 | 9 #11 13
    bits(&[0, 2, 4, 6, 8, 10, 14, 18, 21]),
    // Augmented: 1 b3 3 5 #5 7 | #9 12 #13
    bits(&[0, 3, 4, 7, 8, 11, 15, 19, 22]),
    // Blues: 1 b3 4 b5 5 b7 | #9 11 #11 #13
    bits(&[0, 3, 5, 6, 7, 10, 15, 17, 18, 22]),
    // Chromatic: everything
    0x00FF_FFFF,
];

/// Modality filters, AND-ed with a scale mask to restrict its positions.
/// The pentatonic filter drops the 4th and 7th degrees of the major scale
/// (semitones 5 and 11) in both octaves.
pub const MODALITY_DIATONIC: u32 = 0x00FF_FFFF;
pub const MODALITY_PENTATONIC: u32 = bits(&[
    0, 1, 2, 3, 4, 6, 7, 8, 9, 10, 12, 13, 14, 15, 16, 18, 19, 20, 21, 22,
]);

/// Number of notes in each parent scale.
pub const SCALE_SIZES: [u8; 10] = [7, 7, 7, 7, 8, 7, 6, 6, 6, 12];

pub const SCALE_TYPE_NAMES: [&str; 10] = [
    "major",
    "natural minor",
    "harmonic minor",
    "melodic minor",
    "diminished",
    "harmonic major",
    "whole tone",
    "augmented",
    "blues",
    "chromatic",
];

/// Mode names for the major family, indexed by mode - 1.
pub const MODE_NAMES_MAJOR: [&str; 7] = [
    "Ionian", "Dorian", "Phrygian", "Lydian", "Mixolydian", "Aeolian", "Locrian",
];

/// Brightness per major-family mode (0 = Locrian, 7 = Lydian).
pub const MODE_BRIGHTNESS_MAJOR: [u8; 7] = [5, 3, 1, 7, 6, 2, 0];

pub const MODE_NAMES_HARMONIC_MINOR: [&str; 7] = [
    "Harmonic Minor",
    "Locrian nat6",
    "Ionian #5",
    "Dorian #4",
    "Phrygian Dominant",
    "Lydian #2",
    "Superlocrian bb7",
];

pub const MODE_NAMES_MELODIC_MINOR: [&str; 7] = [
    "Melodic Minor",
    "Dorian b2",
    "Lydian Augmented",
    "Lydian Dominant",
    "Mixolydian b6",
    "Locrian nat2",
    "Altered",
];

/// A chord formula: semitone offsets from the root, in ascending order.
/// Offsets above 11 are tensions voiced in the second octave.
pub struct ChordFormula {
    pub name: &'static str,
    pub offsets: &'static [u8],
}

pub static CHORD_FORMULAS: [ChordFormula; 42] = [
    ChordFormula { name: "M", offsets: &[0, 4, 7] },
    ChordFormula { name: "7M", offsets: &[0, 4, 7, 11] },
    ChordFormula { name: "6", offsets: &[0, 4, 7, 9] },
    ChordFormula { name: "6(9)", offsets: &[0, 4, 7, 9, 14] },
    ChordFormula { name: "M9", offsets: &[0, 4, 7, 11, 14] },
    ChordFormula { name: "m", offsets: &[0, 3, 7] },
    ChordFormula { name: "m7", offsets: &[0, 3, 7, 10] },
    ChordFormula { name: "m6", offsets: &[0, 3, 7, 9] },
    ChordFormula { name: "m11", offsets: &[0, 3, 7, 10, 17] },
    ChordFormula { name: "mM7", offsets: &[0, 3, 7, 11] },
    ChordFormula { name: "7", offsets: &[0, 4, 7, 10] },
    ChordFormula { name: "9", offsets: &[0, 4, 7, 10, 14] },
    ChordFormula { name: "11", offsets: &[0, 4, 7, 10, 14, 17] },
    ChordFormula { name: "dim", offsets: &[0, 3, 6] },
    ChordFormula { name: "dim7", offsets: &[0, 3, 6, 9] },
    ChordFormula { name: "m7(b5)", offsets: &[0, 3, 6, 10] },
    ChordFormula { name: "aug", offsets: &[0, 4, 8] },
    ChordFormula { name: "7#5", offsets: &[0, 4, 8, 10] },
    ChordFormula { name: "7(b5)", offsets: &[0, 4, 6, 10] },
    ChordFormula { name: "13", offsets: &[0, 4, 7, 10, 14, 17, 21] },
    ChordFormula { name: "13(#11)", offsets: &[0, 4, 7, 10, 14, 18, 21] },
    ChordFormula { name: "7+5", offsets: &[0, 4, 8, 10] },
    ChordFormula { name: "7+9", offsets: &[0, 4, 7, 10, 15] },
    ChordFormula { name: "7(b9)", offsets: &[0, 4, 7, 10, 13] },
    ChordFormula { name: "7(#11)", offsets: &[0, 4, 7, 10, 18] },
    ChordFormula { name: "5", offsets: &[0, 7] },
    ChordFormula { name: "add9", offsets: &[0, 4, 7, 14] },
    ChordFormula { name: "add2", offsets: &[0, 2, 4, 7] },
    ChordFormula { name: "add11", offsets: &[0, 4, 7, 17] },
    ChordFormula { name: "add4", offsets: &[0, 4, 5, 7] },
    ChordFormula { name: "sus2", offsets: &[0, 2, 7] },
    ChordFormula { name: "sus4", offsets: &[0, 5, 7] },
    ChordFormula { name: "sus7", offsets: &[0, 5, 7, 10] },
    ChordFormula { name: "sus9", offsets: &[0, 5, 7, 14] },
    ChordFormula { name: "m13", offsets: &[0, 3, 7, 10, 14, 17, 21] },
    ChordFormula { name: "maj13", offsets: &[0, 4, 7, 11, 14, 18, 21] },
    ChordFormula { name: "sus", offsets: &[0, 5, 7] },
    ChordFormula { name: "m9", offsets: &[0, 3, 7, 10, 14] },
    ChordFormula { name: "M7#5", offsets: &[0, 4, 8, 11] },
    ChordFormula { name: "m7(11)", offsets: &[0, 3, 7, 10, 17] },
    ChordFormula { name: "(b9)", offsets: &[0, 4, 7, 13] },
    ChordFormula { name: "(b13)", offsets: &[0, 4, 7, 20] },
];

/// Chord type spellings mapped to formula indices. Sorted by name for
/// binary search; several spellings alias the same formula.
pub static CHORD_TYPE_ALIASES: [(&str, u8); 57] = [
    ("(9)", 26),
    ("(b13)", 41),
    ("(b9)", 40),
    ("+", 16),
    ("+M7", 38),
    ("11", 12),
    ("13", 19),
    ("13(#11)", 20),
    ("5", 25),
    ("6", 2),
    ("6(9)", 3),
    ("7", 10),
    ("7#5", 17),
    ("7(#11)", 24),
    ("7(9)", 11),
    ("7(b5)", 18),
    ("7(b9)", 23),
    ("7+5", 21),
    ("7+9", 22),
    ("7/9", 11),
    ("7M", 1),
    ("7M(#5)", 38),
    ("M", 0),
    ("M13", 35),
    ("M6", 2),
    ("M7#5", 38),
    ("M9", 4),
    ("add11", 28),
    ("add2", 27),
    ("add4", 29),
    ("add9", 26),
    ("aug", 16),
    ("dim", 13),
    ("dim7", 14),
    ("dom7", 10),
    ("m", 5),
    ("m11", 8),
    ("m13", 34),
    ("m6", 7),
    ("m7", 6),
    ("m7(11)", 39),
    ("m7(b5)", 15),
    ("m7M", 9),
    ("m9", 37),
    ("mM7", 9),
    ("maj", 0),
    ("maj13", 35),
    ("maj7", 1),
    ("maj9", 4),
    ("mi", 5),
    ("min", 5),
    ("min7", 6),
    ("sus", 36),
    ("sus2", 30),
    ("sus4", 31),
    ("sus7", 32),
    ("sus9", 33),
];

/// Formula index for a chord type spelling.
pub fn chord_type_index(name: &str) -> Option<usize> {
    CHORD_TYPE_ALIASES
        .binary_search_by(|entry| entry.0.cmp(name))
        .ok()
        .map(|i| CHORD_TYPE_ALIASES[i].1 as usize)
}

/// Harmonic function per scale degree (0 = tonic, 1 = subdominant,
/// 2 = dominant), indexed by scale type then degree - 1.
pub const HARMONIC_FUNCTIONS: [[u8; 8]; 10] = [
    [0, 1, 0, 1, 2, 0, 2, 0], // major:          T S T S D T D
    [0, 1, 0, 1, 2, 1, 2, 0], // natural minor:  T S T S D S D
    [0, 1, 0, 1, 2, 1, 2, 0], // harmonic minor
    [0, 1, 0, 1, 2, 1, 2, 0], // melodic minor
    [0, 2, 0, 2, 0, 2, 0, 2], // diminished: alternating
    [0, 1, 0, 1, 2, 1, 2, 0], // harmonic major
    [0, 0, 0, 0, 0, 0, 0, 0], // whole tone
    [0, 0, 0, 0, 0, 0, 0, 0], // augmented
    [0, 1, 2, 0, 1, 2, 0, 0], // blues
    [0, 0, 0, 0, 0, 0, 0, 0], // chromatic
];

/// Degree roles in the major scale.
pub const ROLE_NAMES_MAJOR: [&str; 7] = [
    "primary",
    "relative of IV",
    "transitive",
    "primary",
    "primary",
    "relative of I",
    "relative of V",
];

pub const ROMAN_NUMERALS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// A conventional tempo marking with its BPM range.
pub struct TempoMarking {
    pub name: &'static str,
    pub low: u16,
    pub high: u16,
    pub typical: u16,
}

pub static TEMPO_MARKINGS: [TempoMarking; 10] = [
    TempoMarking { name: "Grave", low: 25, high: 45, typical: 35 },
    TempoMarking { name: "Largo", low: 40, high: 60, typical: 50 },
    TempoMarking { name: "Adagio", low: 55, high: 75, typical: 60 },
    TempoMarking { name: "Andante", low: 73, high: 108, typical: 80 },
    TempoMarking { name: "Moderato", low: 108, high: 120, typical: 114 },
    TempoMarking { name: "Allegretto", low: 112, high: 140, typical: 120 },
    TempoMarking { name: "Allegro", low: 120, high: 168, typical: 140 },
    TempoMarking { name: "Vivace", low: 140, high: 180, typical: 160 },
    TempoMarking { name: "Presto", low: 168, high: 200, typical: 184 },
    TempoMarking { name: "Prestissimo", low: 200, high: 240, typical: 220 },
];

/// Named note values as fractions of a whole note.
pub static DURATION_NAMES: [(&str, u32, u32); 7] = [
    ("whole", 1, 1),
    ("half", 1, 2),
    ("quarter", 1, 4),
    ("eighth", 1, 8),
    ("sixteenth", 1, 16),
    ("thirty_second", 1, 32),
    ("sixty_fourth", 1, 64),
];

/// Standard tunings as open-string MIDI numbers, lowest string first.
pub const TUNING_VIOLAO: [u8; 6] = [40, 45, 50, 55, 59, 64]; // E2 A2 D3 G3 B3 E4
pub const TUNING_CAVAQUINHO: [u8; 4] = [62, 67, 71, 74]; // D4 G4 B4 D5
pub const TUNING_BANDOLIM: [u8; 4] = [55, 62, 69, 76]; // G3 D4 A4 E5
pub const TUNING_UKULELE: [u8; 4] = [67, 60, 64, 69]; // G4 C4 E4 A4
