//! BLAKE3 content hashing for derived views
//!
//! A filtered view is identified by the hash of the rows it contains, so two
//! views built from different filter keys but holding the same rows compare
//! equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A BLAKE3 content hash (32 bytes)
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// First 12 hex characters, for log lines
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<blake3::Hash> for ContentHash {
    fn from(hash: blake3::Hash) -> Self {
        Self(*hash.as_bytes())
    }
}

/// Streaming hasher fed one row field at a time
#[derive(Default)]
pub struct IncrementalHasher {
    inner: blake3::Hasher,
}

impl IncrementalHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a length-prefixed string so adjacent fields cannot alias
    pub fn update_str(&mut self, value: &str) {
        self.update_u64(value.len() as u64);
        self.inner.update(value.as_bytes());
    }

    /// Feed a little-endian u64
    pub fn update_u64(&mut self, value: u64) {
        self.inner.update(&value.to_le_bytes());
    }

    pub fn finalize(self) -> ContentHash {
        self.inner.finalize().into()
    }
}
