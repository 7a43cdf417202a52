//! Revision type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{parse_generation, parse_suffix};

/// Top-level properties of a document body, keyed by property name.
pub type DocumentProperties = Map<String, Value>;

/// One revision of a document as handed over by a store.
///
/// The store owns persistence and tree placement; this type only carries the
/// fields that take part in revision identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Document identifier
    pub doc_id: String,

    /// Revision ID (`<generation>-<suffix>`), empty until one is assigned
    #[serde(default)]
    pub rev_id: String,

    /// Tombstone flag
    #[serde(default)]
    pub deleted: bool,

    /// Document body, absent for bodiless tombstones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<DocumentProperties>,
}

impl Revision {
    /// Generation of `rev_id`, `None` if it is unparseable.
    pub fn generation(&self) -> Option<u32> {
        parse_generation(&self.rev_id)
    }

    /// Suffix of `rev_id`, `None` if it has no `-`.
    pub fn suffix(&self) -> Option<&str> {
        parse_suffix(&self.rev_id)
    }

    /// Look up a top-level property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }
}

/// Builder for creating revisions
#[derive(Debug, Default)]
pub struct RevisionBuilder {
    revision: Revision,
}

impl RevisionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.revision.doc_id = doc_id.into();
        self
    }

    pub fn rev_id(mut self, rev_id: impl Into<String>) -> Self {
        self.revision.rev_id = rev_id.into();
        self
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.revision.deleted = deleted;
        self
    }

    /// Set a single top-level property, creating the body if needed.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.revision
            .properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the whole body.
    pub fn properties(mut self, properties: DocumentProperties) -> Self {
        self.revision.properties = Some(properties);
        self
    }

    pub fn build(self) -> Revision {
        self.revision
    }
}
