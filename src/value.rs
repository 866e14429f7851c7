//! Canonical byte encodings for the values a sketch accepts.
//!
//! The sketch core only ever hashes bytes. `Value` is the closed set of
//! input types for which a stable encoding exists: raw bytes are hashed
//! as-is, text as its UTF-8 bytes, integers as their 64-bit little-endian
//! two's complement. Two values are counted as the same item exactly when
//! their encodings are byte-identical, so `Text("foo")` and `Bytes(b"foo")`
//! coincide while `Integer(1)` and `Text("1")` do not.

use std::convert::TryFrom;

use crate::error::HyperMinHashError;
use crate::hash::{digest_of, ItemHash};

/// A value with a canonical byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    Integer(i64),
}

impl Value<'_> {
    /// Append this value's encoding to a streaming digest.
    pub(crate) fn feed(&self, hash: &mut ItemHash) {
        match *self {
            Value::Bytes(b) => hash.update(b),
            Value::Text(s) => hash.update(s.as_bytes()),
            Value::Integer(i) => hash.update(&i.to_le_bytes()),
        }
    }

    /// One-shot digest of this value's encoding.
    pub(crate) fn digest(&self) -> u128 {
        match *self {
            Value::Bytes(b) => digest_of(b),
            Value::Text(s) => digest_of(s.as_bytes()),
            Value::Integer(i) => digest_of(&i.to_le_bytes()),
        }
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(value: &'a [u8]) -> Self {
        Value::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Value<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(value)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value<'static> {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value<'static> {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<u32> for Value<'static> {
    fn from(value: u32) -> Self {
        Value::Integer(value.into())
    }
}

/// Floats are rejected: `0.0`/`-0.0` and the NaN payloads make any byte
/// encoding either unstable or surprising for distinct counting.
impl TryFrom<f64> for Value<'static> {
    type Error = HyperMinHashError;

    fn try_from(_: f64) -> Result<Self, Self::Error> {
        Err(HyperMinHashError::TypeError(
            "floating point values have no canonical byte encoding".to_owned(),
        ))
    }
}

impl TryFrom<f32> for Value<'static> {
    type Error = HyperMinHashError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Value::try_from(f64::from(value))
    }
}
