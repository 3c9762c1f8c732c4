//! # Session Error Types

use sylvan_procedural::WorldError;
use thiserror::Error;

/// Errors raised while starting or driving a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// World configuration or generation setup failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// Bad command-line input.
    #[error("usage: {0}")]
    Usage(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
