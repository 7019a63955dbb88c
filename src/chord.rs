use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TheoryError;
use crate::interval::Interval;
use crate::note::Note;
use crate::tables::{chord_type_index, CHORD_FORMULAS};

/// A chord: a root note plus a formula from the knowledge base.
///
/// Construct from a name ("CM", "Dm7", "G7(b9)", "Bbmaj7") or recover one
/// from an unordered note set with [`Chord::identify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    root: Note,
    formula: usize,
}

impl Chord {
    /// Parse a chord name. The longest leading substring that resolves as
    /// a note spelling is the root; the remainder is the chord type, with
    /// an empty remainder meaning a major triad.
    pub fn new(name: &str) -> Result<Chord, TheoryError> {
        let max_root = name.len().min(3);
        for end in (1..=max_root).rev() {
            if !name.is_char_boundary(end) {
                continue;
            }
            let Ok(root) = Note::new(&name[..end]) else {
                continue;
            };
            let rest = &name[end..];
            if rest.is_empty() {
                return Ok(Chord { root, formula: 0 });
            }
            return match chord_type_index(rest) {
                Some(formula) => Ok(Chord { root, formula }),
                None => Err(TheoryError::UnknownChordType(rest.to_string())),
            };
        }
        Err(TheoryError::UnknownChord(name.to_string()))
    }

    /// A chord from a root note and a formula index.
    pub(crate) fn from_formula(root: Note, formula: usize) -> Chord {
        Chord { root, formula }
    }

    /// Identify a chord from an unordered set of notes.
    ///
    /// Candidate roots are tried in input order; for each root the formulas
    /// are scanned in ascending index and the first whose pitch-class set
    /// equals the input's wins. Fewer than two distinct pitch classes never
    /// match.
    ///
    /// ```
    /// use solfa::{Chord, Note};
    /// let notes: Vec<Note> = ["D", "F", "A", "C"]
    ///     .iter()
    ///     .map(|n| Note::new(n).unwrap())
    ///     .collect();
    /// assert_eq!(Chord::identify(&notes).unwrap().name(), "Dm7");
    /// ```
    pub fn identify(notes: &[Note]) -> Option<Chord> {
        let mut input_mask = 0u16;
        let mut roots: Vec<&Note> = Vec::new();
        for note in notes {
            let bit = 1u16 << note.semitone();
            if input_mask & bit == 0 {
                input_mask |= bit;
                roots.push(note);
            }
        }
        if roots.len() < 2 {
            return None;
        }

        for root in roots {
            let relative = rotate_mask(input_mask, root.semitone());
            for (idx, formula) in CHORD_FORMULAS.iter().enumerate() {
                if formula_mask(formula.offsets) == relative {
                    return Some(Chord { root: root.clone(), formula: idx });
                }
            }
        }
        None
    }

    pub fn root(&self) -> &Note {
        &self.root
    }

    /// The canonical type string of the formula ("M", "m7", "7(b9)", ...).
    pub fn type_name(&self) -> &'static str {
        CHORD_FORMULAS[self.formula].name
    }

    /// Root spelling plus type string, e.g. "Dm7".
    pub fn name(&self) -> String {
        format!("{}{}", self.root.name(), self.type_name())
    }

    /// Number of chord tones.
    pub fn size(&self) -> usize {
        CHORD_FORMULAS[self.formula].offsets.len()
    }

    /// Chord tones in formula order, starting at the root.
    pub fn notes(&self) -> Vec<Note> {
        CHORD_FORMULAS[self.formula]
            .offsets
            .iter()
            .map(|&off| self.root.transpose(i32::from(off)))
            .collect()
    }

    /// Intervals of each chord tone from the root.
    pub fn intervals(&self) -> Vec<Interval> {
        CHORD_FORMULAS[self.formula]
            .offsets
            .iter()
            .map(|&off| Interval::new(off))
            .collect()
    }

    /// Transpose the root by a signed number of semitones.
    pub fn transpose(&self, semitones: i32) -> Chord {
        Chord { root: self.root.transpose(semitones), formula: self.formula }
    }

    /// Bitmask of the chord's pitch classes.
    pub(crate) fn pc_mask(&self) -> u16 {
        let root = self.root.semitone();
        CHORD_FORMULAS[self.formula]
            .offsets
            .iter()
            .fold(0u16, |mask, &off| mask | 1 << ((root + off) % 12))
    }

    /// Bitmask of the formula's semitone offsets from the root, mod 12.
    pub(crate) fn interval_mask(&self) -> u16 {
        formula_mask(CHORD_FORMULAS[self.formula].offsets)
    }
}

/// Pitch-class mask of a formula's offsets, reduced mod 12.
fn formula_mask(offsets: &[u8]) -> u16 {
    offsets.iter().fold(0u16, |mask, &off| mask | 1 << (off % 12))
}

/// Rotate a 12-bit pitch-class mask so `root` becomes bit 0.
fn rotate_mask(mask: u16, root: u8) -> u16 {
    let root = u32::from(root % 12);
    let wide = u32::from(mask);
    (((wide >> root) | (wide << (12 - root))) & 0xFFF) as u16
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Chord {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Chord, TheoryError> {
        Chord::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn notes(names: &[&str]) -> Vec<Note> {
        names.iter().map(|n| Note::new(n).unwrap()).collect()
    }

    #[test]
    fn parses_names() {
        let cm = Chord::new("CM").unwrap();
        assert_eq!(cm.root().name(), "C");
        assert_eq!(cm.type_name(), "M");
        assert_eq!(
            cm.notes().iter().map(Note::name).collect::<Vec<_>>(),
            ["C", "E", "G"]
        );

        let dm7 = Chord::new("Dm7").unwrap();
        assert_eq!(
            dm7.notes().iter().map(Note::name).collect::<Vec<_>>(),
            ["D", "F", "A", "C"]
        );

        // bare note name is a major triad
        assert_eq!(Chord::new("F#").unwrap().name(), "F#M");
        // flat root through the enharmonic table
        assert_eq!(Chord::new("Bbmaj7").unwrap().type_name(), "7M");

        assert!(Chord::new("Cxyz").is_err());
        assert!(Chord::new("").is_err());
    }

    #[test]
    fn identifies_major_and_minor_triads() {
        assert_eq!(Chord::identify(&notes(&["C", "E", "G"])).unwrap().name(), "CM");
        assert_eq!(Chord::identify(&notes(&["A", "C", "E"])).unwrap().name(), "Am");
        // order within the set does not change the root choice once a
        // root-position match exists
        assert_eq!(Chord::identify(&notes(&["C", "G", "E"])).unwrap().name(), "CM");
    }

    #[test]
    fn identify_prefers_the_first_root_with_a_match() {
        // D F A C reads as Dm7, not F6
        assert_eq!(
            Chord::identify(&notes(&["D", "F", "A", "C"])).unwrap().name(),
            "Dm7"
        );
        // starting from F instead, the same pitch classes read as F6
        assert_eq!(
            Chord::identify(&notes(&["F", "A", "C", "D"])).unwrap().name(),
            "F6"
        );
    }

    #[test]
    fn identify_rejects_degenerate_input() {
        assert!(Chord::identify(&notes(&["C"])).is_none());
        assert!(Chord::identify(&notes(&["C", "C"])).is_none());
        assert!(Chord::identify(&notes(&[])).is_none());
        // a cluster matching no formula
        assert!(Chord::identify(&notes(&["C", "C#", "D"])).is_none());
    }

    #[test]
    fn construct_then_identify_is_stable() {
        for name in ["CM", "Dm7", "G7", "Bdim", "Eaug", "F#m7(b5)", "A5"] {
            let chord = Chord::new(name).unwrap();
            let back = Chord::identify(&chord.notes()).unwrap();
            assert_eq!(back.root(), chord.root(), "{name}");
            assert_eq!(back.pc_mask(), chord.pc_mask(), "{name}");
        }
    }

    #[test]
    fn transpose_moves_the_root() {
        let cm = Chord::new("CM").unwrap();
        assert_eq!(cm.transpose(5).name(), "FM");
        assert_eq!(cm.transpose(-1).name(), "BM");
    }

    #[test]
    fn intervals_match_the_formula() {
        let g7 = Chord::new("G7").unwrap();
        let semis: Vec<u8> = g7.intervals().iter().map(|i| i.semitones()).collect();
        assert_eq!(semis, [0, 4, 7, 10]);
    }
}
