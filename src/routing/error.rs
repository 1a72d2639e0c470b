//! Compilation errors.
//!
//! The route compiler has no failure modes of its own. Every variant here
//! originates in a collaborator and is propagated unchanged to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// An id cannot be used as a directory name.
    #[error("invalid path segment {0:?} in content root")]
    InvalidPathSegment(String),

    /// The platform main domain cannot be derived without a site name.
    #[error("site {0} has no name")]
    MissingSiteName(String),

    /// A password is set but its hash is empty.
    #[error("password hash is empty")]
    EmptyPassword,

    #[error("failed to serialize routes: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for route compilation.
pub type CompileResult<T> = Result<T, CompileError>;
