//! A streaming per-item digest with a forkable state.

use std::fmt;

use crate::hash::ItemHash;
use crate::value::Value;

/// The digest of an [`Entry`] that has never been fed.
pub const EMPTY_DIGEST: u128 = 0x99aa06d3014798d86001c324468d497f;

/// One logical item under construction.
///
/// An `Entry` accumulates bytes for a single item (say, a large file
/// streamed in chunks) and can be handed to [`crate::Sketch::add_entry`]
/// any number of times without being consumed. [`Entry::digest`] is a pure
/// read: it never disturbs the stream, so an entry can be inspected
/// mid-stream and continued afterwards.
///
/// [`Entry::fork`] snapshots the current state in O(1), without replaying
/// previously-fed bytes. This makes prefix-sharing cheap: feed the common
/// prefix once, then fork per distinct suffix.
///
/// Entries compare equal exactly when their current digests are equal.
/// They deliberately do not implement [`std::hash::Hash`]; a mutable
/// value type makes a treacherous map key.
///
/// ```
/// use hyperminhash::Entry;
///
/// let mut e = Entry::new();
/// e.add_bytes(b"a");
/// let f = e.fork();
/// e.add_bytes(b"a");
/// assert_ne!(e, f);
/// assert_eq!(e.digest(), 0xb9fe94d346d39b20369242a646a19333);
/// ```
#[derive(Clone)]
pub struct Entry {
    hash: ItemHash,
    fed: bool,
}

impl Entry {
    /// An entry over the empty byte stream; its digest is [`EMPTY_DIGEST`].
    pub fn new() -> Self {
        Self {
            hash: ItemHash::new(),
            fed: false,
        }
    }

    /// Append raw bytes. No length framing: feeding `b"ab"` once and
    /// feeding `b"a"` then `b"b"` produce the same entry.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.hash.update(bytes);
        self.fed = true;
    }

    /// Append the canonical encoding of a typed value.
    pub fn add<'a, V: Into<Value<'a>>>(&mut self, value: V) {
        value.into().feed(&mut self.hash);
        self.fed = true;
    }

    /// An independent copy of the current state. The two entries may
    /// diverge afterwards; neither observes the other.
    pub fn fork(&self) -> Entry {
        self.clone()
    }

    /// The 128-bit digest of everything fed so far.
    pub fn digest(&self) -> u128 {
        self.hash.digest()
    }

    /// Whether nothing has been fed. Note a zero-length `add_bytes` counts
    /// as feeding even though it leaves the digest at [`EMPTY_DIGEST`].
    pub fn is_empty(&self) -> bool {
        !self.fed
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.digest() == other.digest()
    }
}

impl Eq for Entry {}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry(digest={:032x})", self.digest())
    }
}
