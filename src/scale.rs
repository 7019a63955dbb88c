use std::fmt;

use serde::Serialize;

use crate::error::TheoryError;
use crate::note::Note;
use crate::tables::{
    FIFTHS_ORDER, MODALITY_DIATONIC, MODALITY_PENTATONIC, MODE_BRIGHTNESS_MAJOR,
    MODE_NAMES_HARMONIC_MINOR, MODE_NAMES_MAJOR, MODE_NAMES_MELODIC_MINOR, SCALE_MASKS,
    SCALE_TYPE_NAMES,
};

/// The ten scale types of the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Diminished,
    HarmonicMajor,
    WholeTone,
    Augmented,
    Blues,
    Chromatic,
}

pub const SCALE_TYPES: [ScaleType; 10] = [
    ScaleType::Major,
    ScaleType::NaturalMinor,
    ScaleType::HarmonicMinor,
    ScaleType::MelodicMinor,
    ScaleType::Diminished,
    ScaleType::HarmonicMajor,
    ScaleType::WholeTone,
    ScaleType::Augmented,
    ScaleType::Blues,
    ScaleType::Chromatic,
];

impl ScaleType {
    pub fn index(self) -> usize {
        SCALE_TYPES.iter().position(|&t| t == self).expect("listed")
    }

    pub fn name(self) -> &'static str {
        SCALE_TYPE_NAMES[self.index()]
    }

    pub fn from_name(name: &str) -> Option<ScaleType> {
        SCALE_TYPE_NAMES
            .iter()
            .position(|&n| n.eq_ignore_ascii_case(name))
            .map(|i| SCALE_TYPES[i])
    }

    fn is_minor_family(self) -> bool {
        matches!(
            self,
            ScaleType::NaturalMinor | ScaleType::HarmonicMinor | ScaleType::MelodicMinor
        )
    }
}

/// Restriction applied on top of a scale's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modality {
    Full,
    Diatonic,
    Pentatonic,
}

/// A scale: a tonic, a parent scale type, a 1-based mode number and a
/// modality filter.
///
/// `mode(n)` re-roots the scale at its n-th degree; the result keeps the
/// parent type so mode names, brightness and key signatures stay anchored
/// to the parent family.
///
/// ```
/// use solfa::Scale;
/// let c = Scale::major("C").unwrap();
/// assert_eq!(c.size(), 7);
/// assert_eq!(c.mode(2).mode_name(), "Dorian");
/// assert_eq!(c.signature(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scale {
    tonic: Note,
    scale_type: ScaleType,
    mode: u8,
    modality: Modality,
}

impl Scale {
    pub fn new(tonic: &str, scale_type: ScaleType) -> Result<Scale, TheoryError> {
        Ok(Scale {
            tonic: Note::new(tonic)?,
            scale_type,
            mode: 1,
            modality: Modality::Full,
        })
    }

    /// A scale from a tonic and a type name ("major", "natural minor", ...).
    pub fn from_type_name(tonic: &str, type_name: &str) -> Result<Scale, TheoryError> {
        let scale_type = ScaleType::from_name(type_name)
            .ok_or_else(|| TheoryError::UnknownScaleType(type_name.to_string()))?;
        Scale::new(tonic, scale_type)
    }

    pub fn major(tonic: &str) -> Result<Scale, TheoryError> {
        Scale::new(tonic, ScaleType::Major)
    }

    pub fn minor(tonic: &str) -> Result<Scale, TheoryError> {
        Scale::new(tonic, ScaleType::NaturalMinor)
    }

    pub fn tonic(&self) -> &Note {
        &self.tonic
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn type_name(&self) -> &'static str {
        self.scale_type.name()
    }

    /// 1-based mode number within the parent family.
    pub fn mode_number(&self) -> u8 {
        self.mode
    }

    /// Semitone offsets of the parent scale, ascending within one octave.
    fn parent_offsets(&self) -> Vec<u8> {
        let mask = SCALE_MASKS[self.scale_type.index()];
        (0..12).filter(|&s| mask >> s & 1 == 1).collect()
    }

    /// Semitone offsets from this scale's own tonic, after mode rotation
    /// and the modality filter.
    fn offsets(&self) -> Vec<u8> {
        let parent = self.parent_offsets();
        let n = parent.len();
        let m = usize::from(self.mode - 1) % n;
        let shift = parent[m];
        let filter = self.modality_mask();
        (0..n)
            .map(|i| (parent[(i + m) % n] + 12 - shift) % 12)
            .filter(|&off| filter >> off & 1 == 1)
            .collect()
    }

    fn modality_mask(&self) -> u32 {
        match self.modality {
            Modality::Full => 0x00FF_FFFF,
            Modality::Diatonic => MODALITY_DIATONIC,
            Modality::Pentatonic => MODALITY_PENTATONIC,
        }
    }

    /// The 24-bit position mask relative to this scale's tonic: scale
    /// tones in the low octave, tensions in the upper.
    pub fn mask(&self) -> u32 {
        let parent_mask = SCALE_MASKS[self.scale_type.index()];
        let parent = self.parent_offsets();
        let shift = u32::from(parent[usize::from(self.mode - 1) % parent.len()]);

        let mut mask = 0u32;
        for off in self.offsets() {
            mask |= 1 << off;
        }
        for pos in 12..24u32 {
            if parent_mask >> pos & 1 == 1 {
                mask |= 1 << (((pos - 12 + 12 - shift) % 12) + 12);
            }
        }
        mask & self.modality_mask()
    }

    /// Number of scale tones.
    pub fn size(&self) -> u8 {
        self.offsets().len() as u8
    }

    /// The scale tones, starting at the tonic.
    pub fn notes(&self) -> Vec<Note> {
        self.offsets()
            .iter()
            .map(|&off| self.tonic.transpose(i32::from(off)))
            .collect()
    }

    /// The note at a 1-based degree, wrapping past the octave.
    pub fn degree(&self, degree: u8) -> Note {
        let notes = self.notes();
        notes[usize::from(degree.max(1) - 1) % notes.len()].clone()
    }

    /// The 1-based degree of a pitch class, or `None` when it is
    /// chromatic (outside the scale).
    pub fn degree_of(&self, note: &Note) -> Option<u8> {
        self.notes()
            .iter()
            .position(|n| n == note)
            .map(|i| i as u8 + 1)
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.degree_of(note).is_some()
    }

    /// The n-th mode (1-based): the same parent scale re-rooted at
    /// degree n.
    pub fn mode(&self, n: u8) -> Scale {
        let n = n.max(1);
        let parent_size = self.parent_offsets().len() as u8;
        let mode = (self.mode - 1 + n - 1) % parent_size + 1;
        Scale {
            tonic: self.degree(n),
            scale_type: self.scale_type,
            mode,
            modality: self.modality,
        }
    }

    /// The conventional mode name for the scale's family, or the type
    /// name for families without one.
    pub fn mode_name(&self) -> &'static str {
        let idx = usize::from(self.mode - 1);
        match self.scale_type {
            ScaleType::Major => MODE_NAMES_MAJOR[idx % 7],
            ScaleType::NaturalMinor => MODE_NAMES_MAJOR[(idx + 5) % 7],
            ScaleType::HarmonicMinor => MODE_NAMES_HARMONIC_MINOR[idx % 7],
            ScaleType::MelodicMinor => MODE_NAMES_MELODIC_MINOR[idx % 7],
            _ => self.type_name(),
        }
    }

    /// Locate a mode of this scale's family by name, case-insensitively.
    pub fn mode_by_name(&self, name: &str) -> Option<Scale> {
        let table: &[&str] = match self.scale_type {
            ScaleType::Major | ScaleType::NaturalMinor => &MODE_NAMES_MAJOR,
            ScaleType::HarmonicMinor => &MODE_NAMES_HARMONIC_MINOR,
            ScaleType::MelodicMinor => &MODE_NAMES_MELODIC_MINOR,
            _ => return None,
        };
        let idx = table.iter().position(|m| m.eq_ignore_ascii_case(name))?;
        Some(self.parent().mode(idx as u8 + 1))
    }

    /// The parent scale (mode 1) this scale is a rotation of.
    pub fn parent(&self) -> Scale {
        let parent = self.parent_offsets();
        let shift = parent[usize::from(self.mode - 1) % parent.len()];
        Scale {
            tonic: self.tonic.transpose(-i32::from(shift)),
            scale_type: self.scale_type,
            mode: 1,
            modality: self.modality,
        }
    }

    /// Broad quality: "major", "minor", or the type name for scales that
    /// are neither.
    pub fn quality(&self) -> &'static str {
        match self.scale_type {
            ScaleType::Major | ScaleType::HarmonicMajor => "major",
            t if t.is_minor_family() => "minor",
            t => t.name(),
        }
    }

    /// Mode brightness 0 (Locrian) through 7 (Lydian). Only the major
    /// family (and natural minor, as Aeolian) carry brightness.
    pub fn brightness(&self) -> u8 {
        let idx = usize::from(self.mode - 1);
        match self.scale_type {
            ScaleType::Major => MODE_BRIGHTNESS_MAJOR[idx % 7],
            ScaleType::NaturalMinor => MODE_BRIGHTNESS_MAJOR[(idx + 5) % 7],
            _ => 0,
        }
    }

    /// Key signature as a signed accidental count: sharps positive,
    /// flats negative (G major = 1, F major = -1).
    pub fn signature(&self) -> i8 {
        let parent_pc = self.parent().tonic().semitone();
        let major_pc = if self.scale_type.is_minor_family() {
            (parent_pc + 3) % 12
        } else {
            parent_pc
        };
        let idx = FIFTHS_ORDER
            .iter()
            .position(|&pc| pc == major_pc)
            .expect("every pitch class is on the circle") as i8;
        if idx > 6 {
            idx - 12
        } else {
            idx
        }
    }

    /// The relative scale: natural minor a sixth up from a major scale,
    /// major a third up from a minor-family scale.
    pub fn relative(&self) -> Scale {
        match self.scale_type {
            ScaleType::Major | ScaleType::HarmonicMajor => Scale {
                tonic: self.tonic.transpose(9),
                scale_type: ScaleType::NaturalMinor,
                mode: 1,
                modality: self.modality,
            },
            t if t.is_minor_family() => Scale {
                tonic: self.tonic.transpose(3),
                scale_type: ScaleType::Major,
                mode: 1,
                modality: self.modality,
            },
            _ => self.clone(),
        }
    }

    /// The parallel scale: same tonic, opposite quality.
    pub fn parallel(&self) -> Scale {
        let scale_type = match self.scale_type {
            ScaleType::Major | ScaleType::HarmonicMajor => ScaleType::NaturalMinor,
            t if t.is_minor_family() => ScaleType::Major,
            t => t,
        };
        Scale { tonic: self.tonic.clone(), scale_type, mode: 1, modality: self.modality }
    }

    /// This scale restricted by the pentatonic filter.
    pub fn pentatonic(&self) -> Scale {
        Scale { modality: Modality::Pentatonic, ..self.clone() }
    }

    /// This scale restricted by the diatonic filter.
    pub fn diatonic(&self) -> Scale {
        Scale { modality: Modality::Diatonic, ..self.clone() }
    }

    /// Transpose the whole scale by a signed number of semitones.
    pub fn transpose(&self, semitones: i32) -> Scale {
        Scale { tonic: self.tonic.transpose(semitones), ..self.clone() }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic.name(), self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(scale: &Scale) -> Vec<String> {
        scale.notes().iter().map(|n| n.name().to_string()).collect()
    }

    #[test]
    fn major_scale_readout() {
        let c = Scale::major("C").unwrap();
        assert_eq!(c.size(), 7);
        assert_eq!(names(&c), ["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(c.degree(5).name(), "G");
        assert_eq!(c.quality(), "major");
    }

    #[test]
    fn every_type_has_its_cardinality() {
        let expected = [7, 7, 7, 7, 8, 7, 6, 6, 6, 12];
        for (t, want) in SCALE_TYPES.iter().zip(expected) {
            let scale = Scale::new("C", *t).unwrap();
            assert_eq!(scale.size(), want, "{}", t.name());
            assert_eq!(scale.notes().len(), usize::from(want));
        }
    }

    #[test]
    fn degrees_are_symmetric() {
        let scale = Scale::new("E", ScaleType::HarmonicMinor).unwrap();
        for d in 1..=scale.size() {
            let note = scale.degree(d);
            assert_eq!(scale.degree_of(&note), Some(d));
        }
        assert_eq!(scale.degree_of(&Note::new("F").unwrap()), None);
    }

    #[test]
    fn modes_re_root_and_name() {
        let c = Scale::major("C").unwrap();
        let dorian = c.mode(2);
        assert_eq!(dorian.tonic().name(), "D");
        assert_eq!(dorian.mode_name(), "Dorian");
        assert_eq!(dorian.mode_number(), 2);
        assert_eq!(names(&dorian), ["D", "E", "F", "G", "A", "B", "C"]);
        // the parent walks back to C major
        assert_eq!(dorian.parent().tonic().name(), "C");

        let lydian = c.mode_by_name("lydian").unwrap();
        assert_eq!(lydian.mode_number(), 4);
        assert_eq!(lydian.quality(), "major");
        assert_eq!(lydian.tonic().name(), "F");
    }

    #[test]
    fn brightness_table() {
        let c = Scale::major("C").unwrap();
        assert_eq!(c.brightness(), 5); // Ionian
        assert_eq!(c.mode(2).brightness(), 3); // Dorian
        assert_eq!(c.mode(4).brightness(), 7); // Lydian
        assert_eq!(Scale::minor("A").unwrap().brightness(), 2); // Aeolian
    }

    #[test]
    fn signatures_on_the_circle() {
        assert_eq!(Scale::major("C").unwrap().signature(), 0);
        assert_eq!(Scale::major("G").unwrap().signature(), 1);
        assert_eq!(Scale::major("F").unwrap().signature(), -1);
        assert_eq!(Scale::major("D").unwrap().signature(), 2);
        // relative minor shares the signature
        assert_eq!(Scale::minor("A").unwrap().signature(), 0);
        // a mode keeps its parent's signature
        assert_eq!(Scale::major("C").unwrap().mode(2).signature(), 0);
    }

    #[test]
    fn relative_and_parallel() {
        let c = Scale::major("C").unwrap();
        let rel = c.relative();
        assert_eq!(rel.tonic().name(), "A");
        assert_eq!(rel.quality(), "minor");
        assert_eq!(rel.relative().tonic().name(), "C");

        let par = c.parallel();
        assert_eq!(par.tonic().name(), "C");
        assert_eq!(par.quality(), "minor");
    }

    #[test]
    fn pentatonic_filter() {
        let c = Scale::major("C").unwrap().pentatonic();
        assert_eq!(c.size(), 5);
        assert_eq!(names(&c), ["C", "D", "E", "G", "A"]);

        let full = Scale::major("C").unwrap().diatonic();
        assert_eq!(full.size(), 7);
    }

    #[test]
    fn mask_positions() {
        let mask = Scale::major("C").unwrap().mask();
        assert_eq!(mask & 1, 1); // tonic
        assert_eq!(mask >> 6 & 1, 0); // no tritone
        assert_eq!(mask >> 14 & 1, 1); // ninth tension
    }

    #[test]
    fn type_names_round_trip() {
        for t in SCALE_TYPES {
            assert_eq!(ScaleType::from_name(t.name()), Some(t));
        }
        assert!(Scale::from_type_name("C", "mixophrygian").is_err());
    }
}
