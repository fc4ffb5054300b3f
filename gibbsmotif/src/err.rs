//! Error types.

use thiserror::Error;

/// The given character is not a valid symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid symbol: {0:?}")]
pub struct InvalidSymbol(pub char);

/// Invalid data was passed to initialize a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid data")]
pub struct InvalidData;

/// The inputs of a motif search violate one of its preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("no sequences given")]
    NoSequences,
    #[error("motif width must be strictly positive")]
    ZeroWidth,
    #[error("expected {expected} sequences, found {found}")]
    CountMismatch { expected: usize, found: usize },
    #[error("sequence {index} has length {length}, shorter than motif width {width}")]
    SequenceTooShort {
        index: usize,
        length: usize,
        width: usize,
    },
    #[error(transparent)]
    Symbol(#[from] InvalidSymbol),
    #[error(transparent)]
    Data(#[from] InvalidData),
}
