//! The HyperMinHash sketch.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use serde::de::{Error as DeError, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::entry::Entry;
use crate::error::HyperMinHashError;
use crate::estimator;
use crate::registers::{Registers, SERIALIZED_LEN};
use crate::value::Value;

/// A [HyperMinHash][paper] sketch: a fixed 32 KiB register array that
/// estimates the number of distinct items fed to it, and composes with
/// other sketches to estimate union and intersection cardinalities and
/// Jaccard similarity, without ever materializing the underlying sets.
///
/// Compared to a plain [HLL][hll-wiki] sketch with the same register
/// count, every register additionally keeps ten low-order digest bits;
/// those are what make the intersection and similarity estimates usable.
/// Relative error on cardinalities is on the order of 1% across the whole
/// supported range.
///
/// Two values count as the same item exactly when their canonical byte
/// encodings are equal, see [`Value`]. Sketches compare register-wise:
/// `==` is exact equality, and the `<`/`<=` family reports pointwise
/// domination (a sketch that has seen a superset of another's items
/// always dominates it). Sketches over unrelated item sets are typically
/// incomparable, in which case every ordering operator returns `false`.
///
/// Sketches are mutable value types and deliberately do not implement
/// [`std::hash::Hash`].
///
/// [paper]: https://arxiv.org/abs/1710.08436
/// [hll-wiki]: https://en.wikipedia.org/wiki/HyperLogLog
#[derive(Clone, PartialEq, Eq)]
pub struct Sketch {
    registers: Registers,
}

impl Sketch {
    /// Size of every serialized sketch, in bytes.
    pub const SERIALIZED_LEN: usize = SERIALIZED_LEN;

    /// Create a sketch representing the empty set.
    pub fn new() -> Self {
        Self {
            registers: Registers::new(),
        }
    }

    /// Observe a value as one item. Two values must have the exact same
    /// bytes and lengths to be considered equal.
    pub fn add_bytes(&mut self, value: &[u8]) {
        self.registers.insert(crate::hash::digest_of(value));
    }

    /// Observe the canonical encoding of a typed value as one item.
    pub fn add<'a, V: Into<Value<'a>>>(&mut self, value: V) {
        self.registers.insert(value.into().digest());
    }

    /// Observe the item accumulated in `entry`. The entry is read, not
    /// consumed; it may keep growing and be added again later.
    pub fn add_entry(&mut self, entry: &Entry) {
        self.registers.insert(entry.digest());
    }

    /// Estimate of the number of distinct items observed. Zero exactly
    /// when the sketch is untouched, never negative.
    pub fn cardinality(&self) -> f64 {
        estimator::cardinality(self.registers.as_cells())
    }

    /// [`Sketch::cardinality`] rounded to the nearest integer.
    pub fn len(&self) -> u64 {
        self.cardinality().round() as u64
    }

    /// Exact (not estimated): true iff no item was ever observed.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Fold `other` into `self`, which afterwards represents the union
    /// of both item sets. Commutative and idempotent register-wise.
    pub fn merge(&mut self, other: &Sketch) {
        self.registers.merge(&other.registers);
    }

    /// Cardinality estimate of the union of both sketches; neither input
    /// is modified.
    pub fn union_estimate(&self, other: &Sketch) -> f64 {
        let mut union = self.clone();
        union.merge(other);
        union.cardinality()
    }

    /// Jaccard similarity estimate in `[0, 1]`. Two empty sketches have
    /// similarity zero.
    pub fn similarity(&self, other: &Sketch) -> f64 {
        estimator::similarity(self.registers.as_cells(), other.registers.as_cells())
    }

    /// Estimate of the number of items both sketches observed; never
    /// negative, and zero whenever either sketch is empty.
    pub fn intersection(&self, other: &Sketch) -> f64 {
        self.similarity(other) * self.union_estimate(other)
    }

    /// Serialize to the fixed [`Sketch::SERIALIZED_LEN`]-byte wire form.
    pub fn save(&self) -> Vec<u8> {
        codec::encode(&self.registers)
    }

    /// Reconstruct a sketch from [`Sketch::save`] output. Fails with a
    /// `FormatError` unless `buf` is exactly [`Sketch::SERIALIZED_LEN`]
    /// bytes; any content of that length is a valid register array.
    pub fn load(buf: &[u8]) -> Result<Self, HyperMinHashError> {
        Ok(Self {
            registers: codec::decode(buf)?,
        })
    }

    /// Serialize to base64 with no newlines or `=` padding, for
    /// line-oriented transport of sketches between processes.
    pub fn to_base64(&self) -> String {
        base64::encode_config(self.save(), base64::STANDARD_NO_PAD)
    }

    /// Reconstruct a sketch from [`Sketch::to_base64`] output.
    pub fn from_base64(s: &str) -> Result<Self, HyperMinHashError> {
        let bytes = base64::decode_config(s, base64::STANDARD_NO_PAD)?;
        Self::load(&bytes)
    }
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sketch(len={})", self.len())
    }
}

impl PartialOrd for Sketch {
    /// Pointwise register domination; a partial order. Sketches where
    /// neither side dominates compare as neither `<` nor `>` (both
    /// operators return `false`).
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.registers.partial_cmp(&other.registers)
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for Sketch {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sketch = Sketch::new();
        sketch.extend(iter);
        sketch
    }
}

impl<T: AsRef<[u8]>> Extend<T> for Sketch {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add_bytes(item.as_ref());
        }
    }
}

impl Serialize for Sketch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.save())
    }
}

struct BlobVisitor;

impl<'de> Visitor<'de> for BlobVisitor {
    type Value = Sketch;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {}-byte serialized sketch", Sketch::SERIALIZED_LEN)
    }

    fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Sketch, E> {
        Sketch::load(v).map_err(E::custom)
    }

    fn visit_byte_buf<E: DeError>(self, v: Vec<u8>) -> Result<Sketch, E> {
        self.visit_bytes(&v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Sketch, A::Error> {
        let mut buf = Vec::with_capacity(seq.size_hint().unwrap_or(Sketch::SERIALIZED_LEN));
        while let Some(byte) = seq.next_element::<u8>()? {
            buf.push(byte);
        }
        Sketch::load(&buf).map_err(DeError::custom)
    }
}

impl<'de> Deserialize<'de> for Sketch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(BlobVisitor)
    }
}
