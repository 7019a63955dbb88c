use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    #[error("Unknown note spelling: {0}")]
    UnknownNote(String),

    #[error("Unknown chord type: {0}")]
    UnknownChordType(String),

    #[error("Unknown chord name: {0}")]
    UnknownChord(String),

    #[error("Unknown scale type: {0}")]
    UnknownScaleType(String),

    #[error("Unknown mode name: {0}")]
    UnknownMode(String),

    #[error("Unknown interval label: {0}")]
    UnknownInterval(String),

    #[error("Unknown duration name: {0}")]
    UnknownDuration(String),

    #[error("Unknown tempo marking: {0}")]
    UnknownTempoMarking(String),
}
