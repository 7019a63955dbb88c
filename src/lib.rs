pub mod chord;
pub mod compare;
pub mod error;
pub mod event;
pub mod field;
pub mod fretboard;
pub mod interval;
pub mod note;
pub mod rhythm;
pub mod scale;
pub mod tables;

pub use chord::Chord;
pub use compare::{ChordComparison, NeoRiemannian, SubsetRelation};
pub use error::TheoryError;
pub use event::{Event, EventKind, Sequence};
pub use field::{Field, FieldMatch, HarmonicFunction, NoteContext};
pub use fretboard::{Fingering, FretPosition, Fretboard};
pub use interval::Interval;
pub use note::Note;
pub use rhythm::{Duration, Tempo, TimeSignature};
pub use scale::{Modality, Scale, ScaleType};

/// Name the chord spelled by a set of notes, if any.
/// This is the main entry point for chord identification.
pub fn identify(notes: &[Note]) -> Option<Chord> {
    Chord::identify(notes)
}

/// Rank the harmonic fields that explain a set of note and chord names.
pub fn deduce(items: &[&str]) -> Vec<FieldMatch> {
    Field::deduce(items)
}
