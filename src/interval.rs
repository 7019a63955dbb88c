use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::Serialize;

use crate::error::TheoryError;
use crate::note::Note;
use crate::tables::{
    CONSONANCE_NAMES, INTERVAL_CONSONANCE, INTERVAL_FULL_NAMES_EN, INTERVAL_FULL_NAMES_PT,
    INTERVAL_TABLE,
};

/// An interval of 0 to 23 semitones (two octaves).
///
/// Arithmetic saturates at the table bounds: sums cap at 23 semitones and
/// differences floor at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    semitones: u8,
}

impl Interval {
    /// An interval from a semitone count, saturating at 23.
    pub fn new(semitones: u8) -> Interval {
        Interval { semitones: semitones.min(23) }
    }

    /// Parse a popular or anglo label ("5J", "3m", "P5", "mi3", "#11").
    pub fn from_label(label: &str) -> Result<Interval, TheoryError> {
        INTERVAL_TABLE
            .iter()
            .position(|entry| entry.label == label || entry.anglo == label)
            .map(|i| Interval { semitones: i as u8 })
            .ok_or_else(|| TheoryError::UnknownInterval(label.to_string()))
    }

    /// The simple ascending interval between two pitch classes.
    pub fn between(a: &Note, b: &Note) -> Interval {
        let semis = (i16::from(b.semitone()) - i16::from(a.semitone())).rem_euclid(12);
        Interval { semitones: semis as u8 }
    }

    pub fn semitones(&self) -> u8 {
        self.semitones
    }

    /// Popular label, e.g. "5J" for 7 semitones.
    pub fn label(&self) -> &'static str {
        INTERVAL_TABLE[self.semitones as usize].label
    }

    /// Anglo label, e.g. "P5" for 7 semitones.
    pub fn anglo(&self) -> &'static str {
        INTERVAL_TABLE[self.semitones as usize].anglo
    }

    /// Diatonic degree 1-14.
    pub fn degree(&self) -> u8 {
        INTERVAL_TABLE[self.semitones as usize].degree
    }

    /// Octave of the interval: 1 for simple, 2 for compound.
    pub fn octave(&self) -> u8 {
        INTERVAL_TABLE[self.semitones as usize].octave
    }

    /// True for intervals of an octave or more.
    pub fn is_compound(&self) -> bool {
        self.octave() == 2
    }

    /// The interval reduced to within one octave.
    pub fn simple(&self) -> Interval {
        Interval { semitones: self.semitones % 12 }
    }

    /// The inversion of the simple form: a fifth inverts to a fourth.
    pub fn invert(&self) -> Interval {
        Interval { semitones: (12 - self.semitones % 12) % 12 }
    }

    /// Consonance class of the simple form: "perfect", "imperfect" or
    /// "dissonant".
    pub fn consonance(&self) -> &'static str {
        CONSONANCE_NAMES[INTERVAL_CONSONANCE[(self.semitones % 12) as usize] as usize]
    }

    /// Full English name, e.g. "Perfect Fifth".
    pub fn full_name(&self) -> &'static str {
        INTERVAL_FULL_NAMES_EN[self.semitones as usize]
    }

    /// Full Portuguese name, e.g. "Quinta Justa".
    pub fn full_name_pt(&self) -> &'static str {
        INTERVAL_FULL_NAMES_PT[self.semitones as usize]
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, other: Interval) -> Interval {
        Interval::new(self.semitones.saturating_add(other.semitones))
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, other: Interval) -> Interval {
        Interval { semitones: self.semitones.saturating_sub(other.semitones) }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Interval {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Interval, TheoryError> {
        Interval::from_label(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(name: &str) -> Note {
        Note::new(name).unwrap()
    }

    #[test]
    fn labels_and_degrees() {
        let fifth = Interval::new(7);
        assert_eq!(fifth.label(), "5J");
        assert_eq!(fifth.anglo(), "P5");
        assert_eq!(fifth.degree(), 5);

        assert_eq!(Interval::from_label("3M").unwrap().semitones(), 4);
        assert!(Interval::from_label("XX").is_err());
    }

    #[test]
    fn between_notes() {
        assert_eq!(Interval::between(&note("C"), &note("G")).semitones(), 7);
        assert_eq!(Interval::between(&note("G"), &note("C")).semitones(), 5);
        assert_eq!(Interval::between(&note("C"), &note("C")).semitones(), 0);
    }

    #[test]
    fn compound_and_simple() {
        let octave = Interval::new(12);
        assert_eq!(octave.octave(), 2);
        assert!(octave.is_compound());

        assert_eq!(Interval::new(13).simple().semitones(), 1);
        assert!(!Interval::new(7).is_compound());
    }

    #[test]
    fn inversion() {
        assert_eq!(Interval::new(7).invert().semitones(), 5);
        assert_eq!(Interval::new(4).invert().semitones(), 8);
        assert_eq!(Interval::new(0).invert().semitones(), 0);
    }

    #[test]
    fn consonance_classes() {
        assert_eq!(Interval::new(7).consonance(), "perfect");
        assert_eq!(Interval::new(4).consonance(), "imperfect");
        assert_eq!(Interval::new(1).consonance(), "dissonant");
        // compound intervals classify by their simple form
        assert_eq!(Interval::new(19).consonance(), "perfect");
    }

    #[test]
    fn full_names() {
        assert_eq!(Interval::new(7).full_name(), "Perfect Fifth");
        assert_eq!(Interval::new(7).full_name_pt(), "Quinta Justa");
        assert_eq!(Interval::new(4).full_name_pt(), "Terca Maior");
    }

    #[test]
    fn saturating_arithmetic() {
        let m3 = Interval::new(3);
        let p5 = Interval::new(7);
        assert_eq!((m3 + p5).semitones(), 10);
        assert_eq!((p5 - m3).semitones(), 4);
        assert_eq!((m3 - p5).semitones(), 0);
        assert_eq!((Interval::new(20) + Interval::new(20)).semitones(), 23);
    }
}
