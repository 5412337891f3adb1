//! Session error types.

use soil_statement::EvaluationError;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A statement evaluation failed.
    #[error("statement error: {0}")]
    Statement(#[from] EvaluationError),

    /// Undo requested with an empty undo history.
    #[error("nothing to undo")]
    NothingToUndo,

    /// Redo requested with an empty redo history.
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
