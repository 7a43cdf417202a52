//! # revid Shared Rust Library
//!
//! Wraps [`revid_core`] with the infrastructure a host service needs:
//! - **config**: digest selection and history limits, loaded from JSON
//! - **error**: Common error type with context
//! - **tracing**: Logging setup
//!
//! ## Usage
//!
//! ```rust
//! use revid::config::RevisionConfig;
//! use serde_json::json;
//!
//! let config = RevisionConfig::from_json(r#"{"digest":"md5","max_history":2}"#).unwrap();
//! let generator = config.generator();
//!
//! let body = json!({"title": "hello"});
//! let first = generator.for_document(body.as_object(), false, None).unwrap();
//! assert_eq!(first.generation(), 1);
//!
//! let history = config.compress_history(["3-c", "2-b", "1-a"]).unwrap();
//! assert_eq!(history.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod tracing;

// Re-export commonly used items at crate root
pub use config::RevisionConfig;
pub use error::{Error, Result};
pub use revid_core::{
    CompactHistory, DigestAlgorithm, DocumentProperties, Revision, RevisionBuilder,
    RevisionError, RevisionId, RevisionIdGenerator,
};
