//! Error types for the rules engine.

use thiserror::Error;

/// Errors raised while reading positions or applying moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// FEN text that does not describe a position
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Invalid square '{0}'")]
    InvalidSquare(String),

    /// Move text that is not UCI long algebraic notation
    #[error("Invalid UCI move '{0}'")]
    InvalidUci(String),

    /// Well-formed move that the position does not allow
    #[error("Illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}

impl EngineError {
    pub(crate) fn fen(fen: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFen {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
