//! Call stack error types.

use thiserror::Error;

/// Result type for call stack operations.
pub type CallResult<T> = Result<T, CallError>;

/// Errors that can occur while entering or exiting operations.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("Operation call depth limit of {limit} exceeded by {call}")]
    DepthExceeded { limit: usize, call: String },

    #[error("No current operation")]
    EmptyStack,
}

impl CallError {
    pub fn depth_exceeded(limit: usize, call: impl Into<String>) -> Self {
        Self::DepthExceeded {
            limit,
            call: call.into(),
        }
    }
}
