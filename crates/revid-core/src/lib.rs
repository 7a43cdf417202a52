//! revid Core Engine
//!
//! Content-derived revision identification for a multi-version document
//! store. Everything here is pure computation over caller-owned values, so
//! it runs identically in browser (WASM) and server (native) builds.
//!
//! # Example
//!
//! ```rust
//! use revid_core::sync::{canonical_json, compress_history, RevisionIdGenerator};
//! use serde_json::json;
//!
//! let body = json!({"title": "hello", "_id": "doc1"});
//! let canonical = canonical_json(body.as_object().unwrap()).unwrap();
//! assert_eq!(canonical, br#"{"title":"hello"}"#.to_vec());
//!
//! let generator = RevisionIdGenerator::new();
//! let first = generator.generate(Some(canonical.as_slice()), false, None).unwrap();
//! assert_eq!(first.generation(), 1);
//!
//! let first_id = first.to_string();
//! let second = generator.generate(Some(canonical.as_slice()), true, Some(first_id.as_str())).unwrap();
//! assert_eq!(second.generation(), 2);
//!
//! let second_id = second.to_string();
//! let history = compress_history([&second_id, &first_id]).unwrap();
//! assert_eq!(history.len(), 2);
//! ```

pub mod error;
pub mod revision;
pub mod sync;

// Re-export main types at crate root
pub use error::{RevisionError, RevisionResult};
pub use revision::{
    parse_generation, parse_suffix, DocumentProperties, Revision, RevisionBuilder, RevisionId,
    MAX_GENERATION,
};
pub use sync::{
    canonical_json, canonical_revision_json, compress_history, compress_revisions,
    generate_rev_id, CompactHistory, DigestAlgorithm, Md5Digest, RevisionDigest,
    RevisionIdGenerator, Sha256Digest,
};
