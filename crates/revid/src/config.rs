//! Revision configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use revid_core::{compress_history, CompactHistory, DigestAlgorithm, RevisionIdGenerator};

use crate::error::{Error, Result};

/// Settings shared by every replica in a deployment.
///
/// `digest` must be identical on all peers or the same edit will mint
/// different revision IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevisionConfig {
    /// Digest primitive used for revision suffixes
    pub digest: DigestAlgorithm,

    /// Keep at most this many ancestors (newest first) when compacting a
    /// history; `None` keeps all of them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
}

impl RevisionConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: RevisionConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        let config = Self::from_json(&input)?;
        ::tracing::debug!(
            path = %path.display(),
            digest = ?config.digest,
            max_history = ?config.max_history,
            "loaded revision config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history == Some(0) {
            return Err(Error::Config("max_history must be at least 1".into()));
        }
        Ok(())
    }

    /// Generator bound to the configured digest.
    pub fn generator(&self) -> RevisionIdGenerator<DigestAlgorithm> {
        RevisionIdGenerator::with_digest(self.digest)
    }

    /// Truncate `history` to `max_history` entries, then compact it.
    pub fn compress_history<I, S>(&self, history: I) -> Option<CompactHistory>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let limit = self.max_history.unwrap_or(usize::MAX);
        compress_history(history.into_iter().take(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use revid_core::RevisionDigest;

    #[test]
    fn defaults() {
        let config = RevisionConfig::from_json("{}").unwrap();
        assert_eq!(config, RevisionConfig::default());
        assert_eq!(config.digest, DigestAlgorithm::Md5);
        assert_eq!(config.max_history, None);
    }

    #[test]
    fn parses_fields() {
        let config = RevisionConfig::from_json(r#"{"digest":"sha256","max_history":10}"#).unwrap();
        assert_eq!(config.digest, DigestAlgorithm::Sha256);
        assert_eq!(config.max_history, Some(10));
        assert_eq!(config.generator().digest().name(), "sha256");
    }

    #[test]
    fn rejects_zero_history() {
        let err = RevisionConfig::from_json(r#"{"max_history":0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_unknown_fields_and_digests() {
        assert!(matches!(
            RevisionConfig::from_json(r#"{"digets":"md5"}"#),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            RevisionConfig::from_json(r#"{"digest":"crc32"}"#),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn truncates_before_compacting() {
        let config = RevisionConfig {
            max_history: Some(2),
            ..Default::default()
        };
        assert_eq!(
            config.compress_history(["4-d", "3-c", "1-a"]),
            Some(CompactHistory::Contiguous {
                start: 4,
                ids: vec!["d".into(), "c".into()],
            })
        );
    }

    #[test]
    fn unlimited_history() {
        let config = RevisionConfig::default();
        assert_eq!(
            config.compress_history(["4-d", "3-c", "1-a"]),
            Some(CompactHistory::Literal {
                ids: vec!["4-d".into(), "3-c".into(), "1-a".into()],
            })
        );
    }

    #[test]
    fn serializes_without_absent_limit() {
        let json = serde_json::to_string(&RevisionConfig::default()).unwrap();
        assert_eq!(json, r#"{"digest":"md5"}"#);
    }
}
