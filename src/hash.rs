//! The 128-bit item digest underlying every sketch insertion.
//!
//! Items are hashed with XXH3-128 (seed 0). The streaming state is a few
//! hundred bytes and clones in O(1), which is what makes [`crate::Entry`]
//! forkable without replaying previously-fed bytes. The digest of `a || b`
//! equals the digest of feeding `a` then `b`, so chunked ingestion and
//! whole-slice ingestion are interchangeable.

use xxhash_rust::xxh3::{xxh3_128, Xxh3};

/// Incremental 128-bit digest over a byte stream.
#[derive(Clone)]
pub(crate) struct ItemHash {
    state: Xxh3,
}

impl ItemHash {
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Append bytes to the stream. No length framing, no separators.
    pub fn update(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Digest of everything fed so far. Pure read; the stream may continue
    /// afterwards as if this had never been called.
    pub fn digest(&self) -> u128 {
        self.state.digest128()
    }
}

impl Default for ItemHash {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot digest of a complete item.
pub(crate) fn digest_of(bytes: &[u8]) -> u128 {
    xxh3_128(bytes)
}
