//! Digest primitives used to mint revision suffixes.
//!
//! Every replica in a deployment must use the same primitive, otherwise the
//! same edit produces different revision IDs on different peers. MD5 is the
//! interoperable default.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A fixed-width deterministic hash over a byte string.
pub trait RevisionDigest {
    /// Hash `input` in one shot.
    fn digest(&self, input: &[u8]) -> Vec<u8>;

    /// Short lowercase name, used in logs and configuration.
    fn name(&self) -> &'static str;
}

/// 128-bit MD5, the interoperable default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Md5Digest;

impl RevisionDigest for Md5Digest {
    fn digest(&self, input: &[u8]) -> Vec<u8> {
        Md5::digest(input).to_vec()
    }

    fn name(&self) -> &'static str {
        "md5"
    }
}

/// 256-bit SHA-256.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Digest;

impl RevisionDigest for Sha256Digest {
    fn digest(&self, input: &[u8]) -> Vec<u8> {
        Sha256::digest(input).to_vec()
    }

    fn name(&self) -> &'static str {
        "sha256"
    }
}

/// Digest selected at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl RevisionDigest for DigestAlgorithm {
    fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Md5 => Md5Digest.digest(input),
            DigestAlgorithm::Sha256 => Sha256Digest.digest(input),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => Md5Digest.name(),
            DigestAlgorithm::Sha256 => Sha256Digest.name(),
        }
    }
}
