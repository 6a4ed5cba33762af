//! Error types for move selection.

use engine::EngineError;
use thiserror::Error;

/// Errors that can occur while selecting a move
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Malformed FEN or move text
    #[error("Parse error: {0}")]
    Parse(#[from] EngineError),

    /// Broken search bookkeeping; the result cannot be trusted
    #[error("Search invariant violated at depth {depth}: {message}")]
    InvariantViolation { depth: u32, message: String },

    /// Settings rejected before any search work
    #[error("Invalid search configuration: {message}")]
    Configuration { message: String },

    /// The root position is already decided
    #[error("No move available: the position is terminal")]
    NoMoveAvailable,
}

impl SearchError {
    pub(crate) fn invariant(depth: u32, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            depth,
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type SearchOutcome<T> = Result<T, SearchError>;
