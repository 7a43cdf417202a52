//! Revision IDs and the revision data model
//!
//! A revision ID is `<generation>-<suffix>`: the generation counts edits
//! along a branch and the suffix is an opaque token (a lowercase hex digest
//! when minted by this crate).
//!
//! # Example
//!
//! ```rust
//! use revid_core::revision::{parse_generation, parse_suffix, RevisionId};
//!
//! assert_eq!(parse_generation("3-abc"), Some(3));
//! assert_eq!(parse_suffix("3-abc"), Some("abc"));
//!
//! let id: RevisionId = "3-abc".parse().unwrap();
//! assert_eq!(id.to_string(), "3-abc");
//! ```

mod id;
mod types;

pub use id::{parse_generation, parse_suffix, RevisionId, MAX_GENERATION};
pub use types::{DocumentProperties, Revision, RevisionBuilder};
