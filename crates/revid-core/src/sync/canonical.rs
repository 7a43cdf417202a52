//! Canonical JSON encoding of document properties.
//!
//! Only content-relevant top-level keys are kept, and object keys are
//! written in ascending byte order at every nesting level, so two replicas
//! holding the same properties produce the same bytes no matter how the map
//! was built.

use serde_json::Value;
use std::collections::BTreeMap;

use super::error_json;
use crate::error::{RevisionError, RevisionResult};
use crate::revision::{DocumentProperties, Revision};

/// Reserved keys describing revision metadata; dropped before hashing.
pub const RESERVED_KEYS_REMOVED: [&str; 8] = [
    "_id",
    "_rev",
    "_deleted",
    "_revisions",
    "_revs_info",
    "_conflicts",
    "_deleted_conflicts",
    "_local_seq",
];

/// Reserved keys that are part of the content and therefore hashed.
pub const RESERVED_KEYS_RETAINED: [&str; 2] = ["_attachments", "_removed"];

/// Encode document properties as canonical JSON bytes.
///
/// Fails with [`RevisionError::InvalidReservedKey`] if a top-level key starts
/// with `_` and belongs to neither reserved set; nothing is emitted in that
/// case.
pub fn canonical_json(properties: &DocumentProperties) -> RevisionResult<Vec<u8>> {
    let kept = content_properties(properties)?;

    let mut out = Vec::with_capacity(64);
    out.push(b'{');
    for (i, (key, value)) in kept.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        serde_json::to_writer(&mut out, key)?;
        out.push(b':');
        write_value(value, &mut out)?;
    }
    out.push(b'}');
    Ok(out)
}

/// Canonical JSON of a revision's body; `Ok(None)` for a bodiless revision.
pub fn canonical_revision_json(revision: &Revision) -> RevisionResult<Option<Vec<u8>>> {
    revision.properties.as_ref().map(canonical_json).transpose()
}

/// Filter top-level keys. The BTreeMap gives the sorted top-level order.
fn content_properties(
    properties: &DocumentProperties,
) -> RevisionResult<BTreeMap<&str, &Value>> {
    let mut kept = BTreeMap::new();
    for (key, value) in properties {
        if key.starts_with('_') {
            if RESERVED_KEYS_REMOVED.contains(&key.as_str()) {
                continue;
            }
            if !RESERVED_KEYS_RETAINED.contains(&key.as_str()) {
                tracing::warn!(key = %key, "invalid top-level key in document properties");
                return Err(RevisionError::InvalidReservedKey(key.clone()));
            }
        }
        kept.insert(key.as_str(), value);
    }
    Ok(kept)
}

fn write_value(value: &Value, out: &mut Vec<u8>) -> RevisionResult<()> {
    match value {
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_value(item, out)?;
            }
            out.push(b'}');
        }
        // Scalars have a single compact encoding in serde_json
        scalar => serde_json::to_writer(&mut *out, scalar)?,
    }
    Ok(())
}

/// JSON entry point for host bridges: canonical JSON of a property map.
///
/// Input: `{"properties":{...}}`
/// Output: `{"canonical":"<json text>"}` or `{"error":"..."}`
pub fn canonical_json_json(input: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Input {
        properties: DocumentProperties,
    }

    let parsed: Input = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json(format!("invalid JSON: {}", e)),
    };

    match canonical_json(&parsed.properties) {
        // Canonical output is built from valid UTF-8 pieces only
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => serde_json::json!({ "canonical": text }).to_string(),
            Err(e) => error_json(format!("serialization failed: {}", e)),
        },
        Err(e) => error_json(e.to_string()),
    }
}
