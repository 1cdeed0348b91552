//! 256-bit digest value type and the fixed BLAKE3 hashing primitives
//!
//! A `Digest` is held as raw bytes internally and crosses every interface
//! boundary as 64 lowercase hexadecimal characters.

use crate::error::MerkleError;
use blake3::Hasher;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// Digest length in canonical hex characters
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A 256-bit BLAKE3 digest
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a digest from its textual form
    ///
    /// Input of any case is lowercased first and then validated, so
    /// `"AB01..."` and `"ab01..."` parse to the same digest. Anything that
    /// is not exactly 64 hex characters is rejected with a format error;
    /// input is never truncated or padded.
    pub fn from_hex(input: &str) -> Result<Self, MerkleError> {
        let normalized = input.to_ascii_lowercase();

        if normalized.len() != DIGEST_HEX_LEN {
            return Err(MerkleError::Format(format!(
                "digest must be {} hex characters, got {}",
                DIGEST_HEX_LEN,
                normalized.len()
            )));
        }
        if !normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MerkleError::Format(format!(
                "digest contains non-hexadecimal characters: {:?}",
                input
            )));
        }

        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(&normalized, &mut bytes)
            .map_err(|e| MerkleError::Format(format!("invalid digest {:?}: {}", input, e)))?;
        Ok(Self(bytes))
    }

    /// Canonical lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_hex(s)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<blake3::Hash> for Digest {
    fn from(hash: blake3::Hash) -> Self {
        Self(*hash.as_bytes())
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = MerkleError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| {
            MerkleError::Format(format!(
                "digest must be {} bytes, got {}",
                DIGEST_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Hash one chunk of source bytes into a leaf digest
///
/// The digest covers exactly the bytes given; short final chunks are not padded.
#[inline]
pub fn hash_leaf(bytes: &[u8]) -> Digest {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Hash two child digests into their parent
///
/// Concatenates the decoded 32-byte values (`left || right`), never their
/// hex text. Every implementation that wants to reproduce a root must do the same.
#[inline]
pub fn hash_parent(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Hasher::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hasher.finalize().into()
}
