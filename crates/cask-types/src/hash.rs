use std::fmt;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::TypeError;

/// Content-addressed identifier for a stored chunk.
///
/// A `ChunkHash` is the SHA-1 digest of a chunk's bytes. Identical content
/// always produces the same `ChunkHash`, making chunks deduplicatable: the
/// digest is used directly as the chunk's storage key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkHash([u8; 20]);

impl ChunkHash {
    /// Digest length in bytes.
    pub const LEN: usize = 20;

    /// Compute a `ChunkHash` from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Create a `ChunkHash` from a pre-computed digest.
    pub const fn from_digest(digest: [u8; 20]) -> Self {
        Self(digest)
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != Self::LEN {
            return Err(TypeError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ChunkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkHash({})", self.short_hex())
    }
}

impl fmt::Display for ChunkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 20]> for ChunkHash {
    fn from(digest: [u8; 20]) -> Self {
        Self(digest)
    }
}

impl From<ChunkHash> for [u8; 20] {
    fn from(hash: ChunkHash) -> Self {
        hash.0
    }
}
