//! Revision ID codec.
//!
//! A revision ID has the textual form `<generation>-<suffix>`. The string is
//! split at the *first* `-`; everything after it is the opaque suffix, so a
//! suffix may itself contain dashes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::RevisionError;

/// Largest generation any peer can parse; generations are 32-bit signed on
/// the wire.
pub const MAX_GENERATION: u32 = i32::MAX as u32;

/// Parse the generation number of a revision ID.
///
/// Returns `None` when there is no `-` or the prefix is not a base-10
/// integer in `0..=MAX_GENERATION`. No whitespace trimming is done.
///
/// ```rust
/// use revid_core::revision::parse_generation;
///
/// assert_eq!(parse_generation("12-abc"), Some(12));
/// assert_eq!(parse_generation("abc"), None);
/// assert_eq!(parse_generation(" 1-abc"), None);
/// ```
pub fn parse_generation(rev_id: &str) -> Option<u32> {
    let (prefix, _) = rev_id.split_once('-')?;
    let generation: i32 = prefix.parse().ok()?;
    u32::try_from(generation).ok()
}

/// Return the suffix of a revision ID: everything after the first `-`.
///
/// `"3-"` yields `Some("")`; callers must treat the empty suffix as unusable.
pub fn parse_suffix(rev_id: &str) -> Option<&str> {
    rev_id.split_once('-').map(|(_, suffix)| suffix)
}

/// A well-formed revision ID: generation ≥ 1 and a non-empty suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionId {
    generation: u32,
    suffix: String,
}

impl RevisionId {
    /// Build from parts. Returns `None` for a generation outside
    /// `1..=MAX_GENERATION` or an empty suffix.
    pub fn new(generation: u32, suffix: impl Into<String>) -> Option<Self> {
        let suffix = suffix.into();
        if !(1..=MAX_GENERATION).contains(&generation) || suffix.is_empty() {
            return None;
        }
        Some(Self { generation, suffix })
    }

    /// Parse a `<generation>-<suffix>` string.
    pub fn parse(rev_id: &str) -> Option<Self> {
        let generation = parse_generation(rev_id)?;
        let suffix = parse_suffix(rev_id)?;
        Self::new(generation, suffix)
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.generation, self.suffix)
    }
}

impl FromStr for RevisionId {
    type Err = RevisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RevisionError::MalformedId(s.to_string()))
    }
}

/// Higher generation wins; ties are broken by comparing suffixes bytewise.
impl Ord for RevisionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.generation
            .cmp(&other.generation)
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}

impl PartialOrd for RevisionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for RevisionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RevisionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
