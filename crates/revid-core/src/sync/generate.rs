//! Revision ID generation.
//!
//! The digest input is laid out as:
//!
//! ```text
//! [len(prev_id): u8][prev_id: UTF-8][deleted: 0|1][canonical JSON]
//! ```
//!
//! The length prefix keeps different (prev_id, deleted, body) splits from
//! producing the same byte string. The lowercase hex digest becomes the
//! suffix and the generation is one more than the previous revision's.

use serde::Deserialize;

use super::canonical::{canonical_json, canonical_revision_json};
use super::digest::{Md5Digest, RevisionDigest};
use super::error_json;
use crate::error::{RevisionError, RevisionResult};
use crate::revision::{
    parse_generation, DocumentProperties, Revision, RevisionId, MAX_GENERATION,
};

/// Longest previous revision ID, in bytes, the length prefix can describe.
pub const MAX_PREV_ID_LEN: usize = u8::MAX as usize;

/// Mints revision IDs with a fixed digest primitive.
#[derive(Debug, Clone, Default)]
pub struct RevisionIdGenerator<D = Md5Digest> {
    digest: D,
}

impl RevisionIdGenerator<Md5Digest> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: RevisionDigest> RevisionIdGenerator<D> {
    pub fn with_digest(digest: D) -> Self {
        Self { digest }
    }

    pub fn digest(&self) -> &D {
        &self.digest
    }

    /// Compute the ID of the revision following `prev_id`.
    ///
    /// `json` is the canonical body; `None` is legal (e.g. a bodiless
    /// tombstone) and contributes no bytes. `prev_id` of `None` starts a new
    /// document at generation 1.
    pub fn generate(
        &self,
        json: Option<&[u8]>,
        deleted: bool,
        prev_id: Option<&str>,
    ) -> RevisionResult<RevisionId> {
        let generation = match prev_id {
            None => 0,
            Some(prev) => match parse_generation(prev) {
                Some(g) if g > 0 => g,
                _ => {
                    tracing::warn!(prev_id = %prev, "invalid previous revision ID");
                    return Err(RevisionError::InvalidPreviousId(prev.to_string()));
                }
            },
        };

        let prev_bytes = prev_id.map(str::as_bytes).unwrap_or_default();
        if prev_bytes.len() > MAX_PREV_ID_LEN {
            tracing::warn!(len = prev_bytes.len(), "previous revision ID too long");
            return Err(RevisionError::PreviousIdTooLong {
                len: prev_bytes.len(),
            });
        }

        let next = generation
            .checked_add(1)
            .filter(|g| *g <= MAX_GENERATION)
            .ok_or_else(|| {
                RevisionError::GenerationOverflow(prev_id.unwrap_or_default().to_string())
            })?;

        let body = json.unwrap_or_default();
        let mut input = Vec::with_capacity(2 + prev_bytes.len() + body.len());
        input.push(prev_bytes.len() as u8);
        input.extend_from_slice(prev_bytes);
        input.push(u8::from(deleted));
        input.extend_from_slice(body);

        let suffix = hex::encode(self.digest.digest(&input));
        tracing::debug!(
            generation = next,
            digest = self.digest.name(),
            deleted,
            "minted revision ID"
        );

        RevisionId::new(next, suffix)
            .ok_or_else(|| RevisionError::MalformedId(format!("{}-", next)))
    }

    /// Canonically encode `properties` and mint the next revision ID.
    pub fn for_document(
        &self,
        properties: Option<&DocumentProperties>,
        deleted: bool,
        prev_id: Option<&str>,
    ) -> RevisionResult<RevisionId> {
        let json = properties.map(canonical_json).transpose()?;
        self.generate(json.as_deref(), deleted, prev_id)
    }

    /// Mint the ID for `revision`, whose parent is `prev_id`.
    ///
    /// The revision's own `rev_id` is ignored; it is what is being computed.
    pub fn for_revision(
        &self,
        revision: &Revision,
        prev_id: Option<&str>,
    ) -> RevisionResult<RevisionId> {
        let json = canonical_revision_json(revision)?;
        self.generate(json.as_deref(), revision.deleted, prev_id)
    }
}

/// Mint a revision ID with the default MD5 digest.
pub fn generate_rev_id(
    json: Option<&[u8]>,
    deleted: bool,
    prev_id: Option<&str>,
) -> RevisionResult<RevisionId> {
    RevisionIdGenerator::new().generate(json, deleted, prev_id)
}

/// JSON entry point for host bridges: mint a revision ID with MD5.
///
/// Input: `{"properties":{...}|null,"deleted":false,"prev_id":"1-abc"|null}`
/// Output: `{"rev_id":"2-<hex>"}` or `{"error":"..."}`
pub fn generate_rev_id_json(input: &str) -> String {
    #[derive(Deserialize)]
    struct Input {
        #[serde(default)]
        properties: Option<DocumentProperties>,
        #[serde(default)]
        deleted: bool,
        #[serde(default)]
        prev_id: Option<String>,
    }

    let parsed: Input = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json(format!("invalid JSON: {}", e)),
    };

    match RevisionIdGenerator::new().for_document(
        parsed.properties.as_ref(),
        parsed.deleted,
        parsed.prev_id.as_deref(),
    ) {
        Ok(rev_id) => serde_json::json!({ "rev_id": rev_id }).to_string(),
        Err(e) => error_json(e.to_string()),
    }
}
