use std::fmt;

use serde::Serialize;

use crate::chord::Chord;
use crate::error::TheoryError;
use crate::interval::Interval;
use crate::note::Note;
use crate::scale::{Scale, ScaleType, SCALE_TYPES};
use crate::tables::{HARMONIC_FUNCTIONS, ROLE_NAMES_MAJOR, ROMAN_NUMERALS};

/// Harmonic function of a scale degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    fn from_index(idx: u8) -> HarmonicFunction {
        match idx {
            1 => HarmonicFunction::Subdominant,
            2 => HarmonicFunction::Dominant,
            _ => HarmonicFunction::Tonic,
        }
    }

    /// Single-letter label: "T", "S" or "D".
    pub fn letter(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "T",
            HarmonicFunction::Subdominant => "S",
            HarmonicFunction::Dominant => "D",
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-note harmonic context within a field.
#[derive(Debug, Clone, Serialize)]
pub struct NoteContext {
    pub note: Note,
    /// Scale degree, `None` for chromatic notes.
    pub degree: Option<u8>,
    /// Ascending interval from the field tonic.
    pub interval: Interval,
    pub function: HarmonicFunction,
    pub in_scale: bool,
}

/// A ranked candidate returned by [`Field::deduce`].
#[derive(Debug, Clone, Serialize)]
pub struct FieldMatch {
    pub tonic: Note,
    pub scale_type: ScaleType,
    /// How many input items this field explains.
    pub matched: u8,
    /// One role label per input item; empty for unexplained items.
    pub roles: Vec<String>,
}

impl FieldMatch {
    /// The field this match describes.
    pub fn field(&self) -> Field {
        Field::from_scale(Scale::new(self.tonic.name(), self.scale_type).expect("valid tonic"))
    }
}

/// A harmonic field: the diatonic chords built from each degree of a
/// scale.
///
/// ```
/// use solfa::Field;
/// let f = Field::major("C").unwrap();
/// let triads: Vec<String> = f.triads().iter().map(|c| c.name()).collect();
/// assert_eq!(triads, ["CM", "Dm", "Em", "FM", "GM", "Am", "Bdim"]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    scale: Scale,
}

impl Field {
    pub fn new(tonic: &str, scale_type: ScaleType) -> Result<Field, TheoryError> {
        Ok(Field { scale: Scale::new(tonic, scale_type)? })
    }

    pub fn from_type_name(tonic: &str, type_name: &str) -> Result<Field, TheoryError> {
        Ok(Field { scale: Scale::from_type_name(tonic, type_name)? })
    }

    pub fn major(tonic: &str) -> Result<Field, TheoryError> {
        Field::new(tonic, ScaleType::Major)
    }

    pub fn from_scale(scale: Scale) -> Field {
        Field { scale }
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn tonic(&self) -> &Note {
        self.scale.tonic()
    }

    pub fn size(&self) -> u8 {
        self.scale.size()
    }

    pub fn signature(&self) -> i8 {
        self.scale.signature()
    }

    /// Stack scale degrees at the given degree offsets and name the
    /// result through chord identification, falling back to a major
    /// triad on the degree root when nothing matches.
    fn build_chords(&self, offsets: &[u8]) -> Vec<Chord> {
        let notes = self.scale.notes();
        let size = notes.len();
        (0..size)
            .map(|i| {
                let stack: Vec<Note> = offsets
                    .iter()
                    .map(|&off| notes[(i + usize::from(off)) % size].clone())
                    .collect();
                Chord::identify(&stack)
                    .unwrap_or_else(|| Chord::from_formula(stack[0].clone(), 0))
            })
            .collect()
    }

    /// The triad on each degree.
    pub fn triads(&self) -> Vec<Chord> {
        self.build_chords(&[0, 2, 4])
    }

    /// The seventh chord on each degree.
    pub fn sevenths(&self) -> Vec<Chord> {
        self.build_chords(&[0, 2, 4, 6])
    }

    /// The triad at a 1-based degree.
    pub fn triad(&self, degree: u8) -> Option<Chord> {
        self.triads().into_iter().nth(usize::from(degree.max(1) - 1))
    }

    /// The seventh chord at a 1-based degree.
    pub fn seventh(&self, degree: u8) -> Option<Chord> {
        self.sevenths().into_iter().nth(usize::from(degree.max(1) - 1))
    }

    /// Harmonic function of a 1-based degree.
    pub fn function(&self, degree: u8) -> HarmonicFunction {
        if degree < 1 || degree > self.size() {
            return HarmonicFunction::Tonic;
        }
        let row = &HARMONIC_FUNCTIONS[self.scale.scale_type().index()];
        HarmonicFunction::from_index(row[usize::from(degree - 1) % row.len()])
    }

    /// Role of a 1-based degree. Only the major scale distinguishes
    /// roles; everything else reads as "primary".
    pub fn role(&self, degree: u8) -> &'static str {
        if self.scale.scale_type() == ScaleType::Major && (1..=7).contains(&degree) {
            ROLE_NAMES_MAJOR[usize::from(degree - 1)]
        } else {
            "primary"
        }
    }

    /// Harmonic function of a chord, by its root's degree. Chords rooted
    /// outside the scale read as tonic.
    pub fn function_of(&self, chord: &Chord) -> HarmonicFunction {
        match self.scale.degree_of(chord.root()) {
            Some(degree) => self.function(degree),
            None => HarmonicFunction::Tonic,
        }
    }

    /// Harmonic function of a chord by name.
    pub fn function_of_name(&self, chord_name: &str) -> Result<HarmonicFunction, TheoryError> {
        Ok(self.function_of(&Chord::new(chord_name)?))
    }

    /// Role of a chord, by its root's degree.
    pub fn role_of(&self, chord: &Chord) -> &'static str {
        match self.scale.degree_of(chord.root()) {
            Some(degree) => self.role(degree),
            None => "primary",
        }
    }

    pub fn role_of_name(&self, chord_name: &str) -> Result<&'static str, TheoryError> {
        Ok(self.role_of(&Chord::new(chord_name)?))
    }

    /// Harmonic context of a single note within this field.
    pub fn note_context(&self, note: &Note) -> NoteContext {
        let degree = self.scale.degree_of(note);
        NoteContext {
            interval: Interval::between(self.tonic(), note),
            function: degree.map_or(HarmonicFunction::Tonic, |d| self.function(d)),
            in_scale: degree.is_some(),
            degree,
            note: note.clone(),
        }
    }

    /// Rank every (tonic, scale type) candidate field by how many of the
    /// input items it explains.
    ///
    /// Items that parse as a note spelling count as note evidence (they
    /// match when in scale); anything else is parsed as a chord name and
    /// matches when it is exactly the triad or seventh chord on its
    /// root's degree. Results carry one role label per item — a roman
    /// numeral, suffixed with the chord type for chord items — and are
    /// sorted by match count descending, then tonic pitch class, then
    /// scale type order. Candidates explaining nothing are dropped.
    ///
    /// ```
    /// use solfa::Field;
    /// let ranked = Field::deduce(&["CM", "Dm", "Em", "FM", "G7", "Am"]);
    /// assert_eq!(ranked[0].tonic.name(), "C");
    /// assert_eq!(ranked[0].matched, 6);
    /// ```
    pub fn deduce(items: &[&str]) -> Vec<FieldMatch> {
        enum Evidence {
            Note(Note),
            Chord(Chord),
            Unknown,
        }

        let evidence: Vec<Evidence> = items
            .iter()
            .map(|item| {
                if let Ok(note) = Note::new(item) {
                    Evidence::Note(note)
                } else if let Ok(chord) = Chord::new(item) {
                    Evidence::Chord(chord)
                } else {
                    Evidence::Unknown
                }
            })
            .collect();

        let mut matches: Vec<FieldMatch> = Vec::new();
        for pc in 0..12u8 {
            for scale_type in SCALE_TYPES {
                let field = Field::from_scale(
                    Scale::new(Note::from_pc(pc).name(), scale_type).expect("chromatic name"),
                );
                let triads = field.triads();
                let sevenths = field.sevenths();

                let mut matched = 0u8;
                let mut roles = Vec::with_capacity(items.len());
                for item in &evidence {
                    let role = match item {
                        Evidence::Note(note) => field
                            .scale
                            .degree_of(note)
                            .map(|d| ROMAN_NUMERALS[usize::from(d - 1)].to_string()),
                        Evidence::Chord(chord) => {
                            field.scale.degree_of(chord.root()).and_then(|d| {
                                let idx = usize::from(d - 1);
                                if triads[idx] == *chord || sevenths[idx] == *chord {
                                    Some(format!(
                                        "{}{}",
                                        ROMAN_NUMERALS[idx],
                                        degree_suffix(chord)
                                    ))
                                } else {
                                    None
                                }
                            })
                        }
                        Evidence::Unknown => None,
                    };
                    match role {
                        Some(role) => {
                            matched += 1;
                            roles.push(role);
                        }
                        None => roles.push(String::new()),
                    }
                }

                if matched > 0 {
                    matches.push(FieldMatch {
                        tonic: field.tonic().clone(),
                        scale_type,
                        matched,
                        roles,
                    });
                }
            }
        }

        matches.sort_by_key(|m| {
            (
                std::cmp::Reverse(m.matched),
                m.tonic.semitone(),
                m.scale_type.index(),
            )
        });
        matches
    }
}

/// Chord-type suffix for a role label; a plain major triad reads bare.
fn degree_suffix(chord: &Chord) -> &'static str {
    match chord.type_name() {
        "M" => "",
        t => t,
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scale)
    }
}
