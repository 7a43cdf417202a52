//! Errors surfaced to hosts that embed revid.
//!
//! Core failures (bad reserved keys, unusable parent IDs) arrive wrapped in
//! [`Error::Revision`]; the remaining variants come from loading settings.

use revid_core::RevisionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Config file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config document is not valid JSON or has unknown fields
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config parsed but holds a value peers cannot agree on
    #[error("configuration error: {0}")]
    Config(String),

    /// Document rejected or revision ID could not be minted
    #[error("revision error: {0}")]
    Revision(#[from] RevisionError),
}

pub type Result<T> = std::result::Result<T, Error>;
