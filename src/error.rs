use thiserror::Error;

use crate::board::Square;

/// Errors surfaced to the layer driving the engine. Both move-related
/// variants are caller precondition violations; the board is left untouched
/// when they are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("square ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: u8, col: u8 },

    /// Destination was not in the legal-move mapping for the selected piece.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
