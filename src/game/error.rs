//! Typed failures of game operations.
//!
//! Every failing operation leaves persisted state untouched; the variant tells the
//! transport layer how to report it.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game {0} not found")]
    NotFound(Uuid),

    /// The operation is not allowed in the game's current lifecycle state.
    #[error("{0}")]
    InvalidState(String),

    /// The caller is not a participant, or it is not their turn.
    #[error("{0}")]
    Unauthorized(String),

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: String, to: String },

    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// The stored board document could not be read or written.
    #[error("board snapshot error: {0}")]
    Snapshot(String),
}

impl GameError {
    /// Stable machine-readable code, used in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "NOT_FOUND",
            GameError::InvalidState(_) => "INVALID_STATE",
            GameError::Unauthorized(_) => "UNAUTHORIZED",
            GameError::IllegalMove { .. } => "ILLEGAL_MOVE",
            GameError::Validation(_) => "VALIDATION_ERROR",
            GameError::Snapshot(_) => "SNAPSHOT_ERROR",
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        GameError::InvalidState(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        GameError::Unauthorized(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        GameError::Validation(msg.into())
    }

    pub fn illegal_move(from: impl ToString, to: impl ToString) -> Self {
        GameError::IllegalMove { from: from.to_string(), to: to.to_string() }
    }
}
