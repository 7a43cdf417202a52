//! Revision error types

use thiserror::Error;

/// Errors that can occur while encoding documents or minting revision IDs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevisionError {
    /// Top-level `_` key that is neither stripped nor retained
    #[error("invalid top-level key '{0}' in document properties")]
    InvalidReservedKey(String),

    /// Previous revision ID has no parseable generation
    #[error("invalid previous revision ID: {0}")]
    InvalidPreviousId(String),

    /// Previous revision ID does not fit the one-byte length prefix
    #[error("previous revision ID is {len} bytes (max 255)")]
    PreviousIdTooLong { len: usize },

    /// Generation counter cannot be incremented
    #[error("generation overflow after revision ID: {0}")]
    GenerationOverflow(String),

    /// String is not of the form `<generation>-<suffix>`
    #[error("malformed revision ID: {0}")]
    MalformedId(String),

    /// Canonical JSON could not be produced
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RevisionError {
    fn from(err: serde_json::Error) -> Self {
        RevisionError::Serialization(err.to_string())
    }
}

/// Result type for revision operations
pub type RevisionResult<T> = Result<T, RevisionError>;
