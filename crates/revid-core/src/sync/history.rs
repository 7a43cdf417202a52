//! Compact encoding of revision ancestor chains for sync negotiation.
//!
//! A chain whose generations descend by exactly one at every step is sent
//! as `{"start":N,"ids":[suffix...]}`. Anything else is sent verbatim as
//! `{"ids":[rev_id...]}`. Compaction is all or nothing: one bad entry
//! anywhere sends the whole chain verbatim.

use serde::{Deserialize, Serialize};

use super::error_json;
use crate::revision::{parse_generation, parse_suffix, Revision};

/// Wire form of a revision ancestor chain, newest first.
///
/// The two shapes are told apart by the presence of `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompactHistory {
    /// `ids[i]` is the suffix of generation `start - i`
    Contiguous { start: u32, ids: Vec<String> },
    /// Full revision IDs as given
    Literal { ids: Vec<String> },
}

impl CompactHistory {
    /// Number of revisions described.
    pub fn len(&self) -> usize {
        match self {
            CompactHistory::Contiguous { ids, .. } | CompactHistory::Literal { ids } => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full revision IDs, newest first.
    ///
    /// Returns `None` for a contiguous history that would run below
    /// generation 1, which only a malformed peer message can produce.
    pub fn expand(&self) -> Option<Vec<String>> {
        match self {
            CompactHistory::Contiguous { start, ids } => ids
                .iter()
                .enumerate()
                .map(|(i, suffix)| {
                    let offset = u32::try_from(i).ok()?;
                    let generation = start.checked_sub(offset).filter(|g| *g > 0)?;
                    Some(format!("{}-{}", generation, suffix))
                })
                .collect(),
            CompactHistory::Literal { ids } => Some(ids.clone()),
        }
    }
}

/// Compact an ancestor chain, newest first.
///
/// Returns `None` for an empty chain.
///
/// ```rust
/// use revid_core::sync::{compress_history, CompactHistory};
///
/// let compact = compress_history(["3-abc", "2-def", "1-ghi"]).unwrap();
/// assert_eq!(
///     compact,
///     CompactHistory::Contiguous {
///         start: 3,
///         ids: vec!["abc".into(), "def".into(), "ghi".into()],
///     }
/// );
///
/// let literal = compress_history(["5-abc", "3-def"]).unwrap();
/// assert_eq!(
///     literal,
///     CompactHistory::Literal { ids: vec!["5-abc".into(), "3-def".into()] }
/// );
/// ```
pub fn compress_history<I, S>(history: I) -> Option<CompactHistory>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let history: Vec<S> = history.into_iter().collect();
    if history.is_empty() {
        return None;
    }

    match contiguous_run(&history) {
        Some((start, ids)) => {
            tracing::debug!(start, len = ids.len(), "compacted revision history");
            Some(CompactHistory::Contiguous { start, ids })
        }
        None => {
            tracing::debug!(len = history.len(), "revision history sent verbatim");
            Some(CompactHistory::Literal {
                ids: history.iter().map(|id| id.as_ref().to_string()).collect(),
            })
        }
    }
}

/// Compact the revision IDs of an ancestor chain of revisions.
pub fn compress_revisions(history: &[Revision]) -> Option<CompactHistory> {
    compress_history(history.iter().map(|rev| rev.rev_id.as_str()))
}

/// `(start, suffixes)` if every entry is usable and generations step down by one.
fn contiguous_run<S: AsRef<str>>(history: &[S]) -> Option<(u32, Vec<String>)> {
    let mut start = None;
    let mut last: Option<u32> = None;
    let mut suffixes = Vec::with_capacity(history.len());

    for rev_id in history {
        let rev_id = rev_id.as_ref();
        let generation = parse_generation(rev_id).filter(|g| *g > 0)?;
        let suffix = parse_suffix(rev_id).filter(|s| !s.is_empty())?;

        match last {
            None => start = Some(generation),
            Some(prev) if prev.checked_sub(1) == Some(generation) => {}
            Some(_) => return None,
        }
        last = Some(generation);
        suffixes.push(suffix.to_string());
    }

    start.map(|start| (start, suffixes))
}

/// JSON entry point for host bridges: compact an ancestor chain.
///
/// Input: `{"history":["3-abc","2-def",...]}`
/// Output: `{"start":3,"ids":[...]}`, `{"ids":[...]}`, `null` for an empty
/// chain, or `{"error":"..."}`
pub fn compress_history_json(input: &str) -> String {
    #[derive(Deserialize)]
    struct Input {
        #[serde(default)]
        history: Option<Vec<String>>,
    }

    let parsed: Input = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json(format!("invalid JSON: {}", e)),
    };

    let compact = parsed.history.and_then(compress_history);
    match serde_json::to_string(&compact) {
        Ok(json) => json,
        Err(e) => error_json(format!("serialization failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn contiguous_chain() {
        assert_eq!(
            compress_history(["3-abc", "2-def", "1-ghi"]),
            Some(CompactHistory::Contiguous {
                start: 3,
                ids: ids(&["abc", "def", "ghi"]),
            })
        );
    }

    #[test]
    fn single_entry_is_contiguous() {
        assert_eq!(
            compress_history(["7-abc"]),
            Some(CompactHistory::Contiguous {
                start: 7,
                ids: ids(&["abc"]),
            })
        );
    }

    #[test]
    fn gap_falls_back_to_literal() {
        assert_eq!(
            compress_history(["5-abc", "3-def"]),
            Some(CompactHistory::Literal {
                ids: ids(&["5-abc", "3-def"]),
            })
        );
    }

    #[test]
    fn ascending_falls_back_to_literal() {
        assert_eq!(
            compress_history(["1-a", "2-b"]),
            Some(CompactHistory::Literal {
                ids: ids(&["1-a", "2-b"]),
            })
        );
    }

    #[test]
    fn late_break_abandons_whole_run() {
        // The leading three entries would compact on their own
        let chain = ["9-a", "8-b", "7-c", "3-d", "2-e"];
        assert_eq!(
            compress_history(chain),
            Some(CompactHistory::Literal { ids: ids(&chain) })
        );
    }

    #[test]
    fn unusable_entries_fall_back_to_literal() {
        for chain in [
            vec!["2-abc", "1-"],
            vec!["2-abc", "junk"],
            vec!["1-abc", "0-def"],
            vec!["x-abc"],
        ] {
            assert_eq!(
                compress_history(&chain),
                Some(CompactHistory::Literal { ids: ids(&chain) })
            );
        }
    }

    #[test]
    fn step_must_be_exactly_one() {
        for chain in [vec!["3-a", "3-b"], vec!["3-a", "1-b"], vec!["2-a", "1-b", "1-c"]] {
            assert_eq!(
                compress_history(&chain),
                Some(CompactHistory::Literal { ids: ids(&chain) })
            );
        }
        assert_eq!(
            compress_history(["2-a", "1-b"]),
            Some(CompactHistory::Contiguous {
                start: 2,
                ids: ids(&["a", "b"]),
            })
        );
    }

    #[test]
    fn generation_beyond_i32_range_is_unusable() {
        let chain = ["3000000000-a", "2999999999-b"];
        assert_eq!(
            compress_history(chain),
            Some(CompactHistory::Literal { ids: ids(&chain) })
        );
    }

    #[test]
    fn empty_chain_has_no_result() {
        assert_eq!(compress_history(Vec::<String>::new()), None);
        assert_eq!(compress_revisions(&[]), None);
    }

    #[test]
    fn suffix_with_dashes_kept_whole() {
        assert_eq!(
            compress_history(["2-a-b", "1-c-d"]),
            Some(CompactHistory::Contiguous {
                start: 2,
                ids: ids(&["a-b", "c-d"]),
            })
        );
    }

    #[test]
    fn revisions_compacted_by_rev_id() {
        let chain: Vec<Revision> = ["2-b", "1-a"]
            .iter()
            .map(|id| crate::RevisionBuilder::new().doc_id("doc").rev_id(*id).build())
            .collect();
        assert_eq!(
            compress_revisions(&chain),
            Some(CompactHistory::Contiguous {
                start: 2,
                ids: ids(&["b", "a"]),
            })
        );
    }

    #[test]
    fn expand_reconstructs_ids() {
        let chain = ["4-w", "3-x", "2-y", "1-z"];
        let compact = compress_history(chain).unwrap();
        assert_eq!(compact.len(), 4);
        assert_eq!(compact.expand(), Some(ids(&chain)));

        let literal = compress_history(["5-abc", "3-def"]).unwrap();
        assert_eq!(literal.expand(), Some(ids(&["5-abc", "3-def"])));
    }

    #[test]
    fn expand_rejects_underflow() {
        let bogus = CompactHistory::Contiguous {
            start: 1,
            ids: ids(&["a", "b"]),
        };
        assert_eq!(bogus.expand(), None);
    }

    #[test]
    fn wire_shapes() {
        let contiguous = compress_history(["2-b", "1-a"]).unwrap();
        assert_eq!(
            serde_json::to_value(&contiguous).unwrap(),
            json!({"start": 2, "ids": ["b", "a"]})
        );

        let literal = compress_history(["2-b", "9-a"]).unwrap();
        let value = serde_json::to_value(&literal).unwrap();
        assert_eq!(value, json!({"ids": ["2-b", "9-a"]}));
        assert!(value.get("start").is_none());
    }

    #[test]
    fn parses_both_wire_shapes() {
        let contiguous: CompactHistory =
            serde_json::from_str(r#"{"start":3,"ids":["c","b","a"]}"#).unwrap();
        assert_eq!(
            contiguous,
            CompactHistory::Contiguous {
                start: 3,
                ids: ids(&["c", "b", "a"]),
            }
        );

        let literal: CompactHistory = serde_json::from_str(r#"{"ids":["3-c","1-a"]}"#).unwrap();
        assert_eq!(
            literal,
            CompactHistory::Literal {
                ids: ids(&["3-c", "1-a"]),
            }
        );
    }

    #[test]
    fn json_entry_point() {
        assert_eq!(
            compress_history_json(r#"{"history":["3-abc","2-def","1-ghi"]}"#),
            r#"{"start":3,"ids":["abc","def","ghi"]}"#
        );
        assert_eq!(
            compress_history_json(r#"{"history":["5-abc","3-def"]}"#),
            r#"{"ids":["5-abc","3-def"]}"#
        );
        assert_eq!(compress_history_json(r#"{"history":[]}"#), "null");
        assert_eq!(compress_history_json(r#"{"history":null}"#), "null");
    }

    #[test]
    fn json_entry_point_errors() {
        let parsed: serde_json::Value =
            serde_json::from_str(&compress_history_json("{")).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("invalid JSON"));
    }
}
