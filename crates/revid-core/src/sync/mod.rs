//! Revision identification primitives for replication.
//!
//! Provides canonical JSON encoding of document bodies, content-derived
//! revision ID generation, and the compact ancestor-chain encoding used
//! when peers negotiate which revisions they already hold.
//!
//! Canonical encoding strips metadata keys and sorts object keys so that
//! two replicas minting an ID for the same edit hash the same bytes. The
//! digest primitive is pluggable but must match across a deployment.

mod canonical;
mod digest;
mod generate;
mod history;

pub use canonical::{
    canonical_json, canonical_revision_json, RESERVED_KEYS_REMOVED, RESERVED_KEYS_RETAINED,
};
pub use digest::{DigestAlgorithm, Md5Digest, RevisionDigest, Sha256Digest};
pub use generate::{generate_rev_id, RevisionIdGenerator, MAX_PREV_ID_LEN};
pub use history::{compress_history, compress_revisions, CompactHistory};

// JSON-based entry points for host bridges
pub use canonical::canonical_json_json;
pub use generate::generate_rev_id_json;
pub use history::compress_history_json;

/// `{"error":"<message>"}` with the message JSON-escaped.
fn error_json(message: impl Into<String>) -> String {
    serde_json::json!({ "error": message.into() }).to_string()
}
