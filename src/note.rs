use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TheoryError;
use crate::tables::{enharmonic, CHROMATIC_NAMES, FIFTHS_ORDER};

/// A pitch class with a spelling.
///
/// The spelling given at construction is preserved by `name()`; equality
/// and all arithmetic are on the pitch class alone, so `Note::new("Bb")`
/// and `Note::new("A#")` compare equal.
///
/// Examples:
/// ```
/// use solfa::Note;
/// let bb = Note::new("Bb").unwrap();
/// assert_eq!(bb.name(), "Bb");
/// assert_eq!(bb.natural(), "A#");
/// assert_eq!(bb.semitone(), 10);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pc: u8,
    name: String,
}

impl Note {
    /// Parse a note spelling. Accepts the twelve chromatic names plus any
    /// spelling in the enharmonic table ("Bb", "bE", "C##", ...).
    pub fn new(spelling: &str) -> Result<Note, TheoryError> {
        let canonical =
            enharmonic(spelling).ok_or_else(|| TheoryError::UnknownNote(spelling.to_string()))?;
        let pc = CHROMATIC_NAMES
            .iter()
            .position(|&n| n == canonical)
            .expect("canonical names are chromatic") as u8;
        Ok(Note { pc, name: spelling.to_string() })
    }

    /// The note for a raw pitch class (0-11), canonically spelled.
    pub fn from_pc(pc: u8) -> Note {
        let pc = pc % 12;
        Note { pc, name: CHROMATIC_NAMES[pc as usize].to_string() }
    }

    /// The note for a MIDI number, canonically spelled.
    pub fn from_midi(midi: u8) -> Note {
        Note::from_pc(midi % 12)
    }

    /// The spelling this note was constructed with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical sharp-biased spelling.
    pub fn natural(&self) -> &'static str {
        CHROMATIC_NAMES[self.pc as usize]
    }

    /// Pitch class, 0 (C) through 11 (B).
    pub fn semitone(&self) -> u8 {
        self.pc
    }

    /// MIDI number at the given octave (C4 = 60, A4 = 69).
    pub fn midi(&self, octave: i8) -> u8 {
        (12 * (i16::from(octave) + 1) + i16::from(self.pc)) as u8
    }

    /// Frequency in Hz at the given octave, equal temperament, A4 = 440.
    pub fn frequency(&self, octave: i8) -> f32 {
        let midi = f32::from(self.midi(octave));
        440.0 * ((midi - 69.0) / 12.0).exp2()
    }

    /// Transpose by a signed number of semitones. The result is spelled
    /// canonically.
    pub fn transpose(&self, semitones: i32) -> Note {
        let pc = (i32::from(self.pc) + semitones).rem_euclid(12) as u8;
        Note::from_pc(pc)
    }

    /// Signed distance to another note on the circle of fifths, in fifths
    /// steps, normalized to -6..=6. `C.distance(G) == 1`.
    pub fn distance(&self, other: &Note) -> i8 {
        let a = FIFTHS_ORDER.iter().position(|&p| p == self.pc).unwrap() as i8;
        let b = FIFTHS_ORDER.iter().position(|&p| p == other.pc).unwrap() as i8;
        let mut diff = (b - a).rem_euclid(12);
        if diff > 6 {
            diff -= 12;
        }
        diff
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Note) -> bool {
        self.pc == other.pc
    }
}

impl Eq for Note {}

impl std::hash::Hash for Note {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pc.hash(state);
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Note, TheoryError> {
        Note::new(s)
    }
}
