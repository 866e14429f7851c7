use std::fmt::{Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum HyperMinHashError {
    /// A value has no canonical byte encoding (e.g. floating point).
    TypeError(String),
    /// A serialized sketch is malformed.
    FormatError(String),
    /// An underlying reader failed while feeding a sketch or entry.
    IoError(io::Error),
}

impl Display for HyperMinHashError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HyperMinHashError::TypeError(err) => {
                f.write_fmt(format_args!("TypeError: {}", err))
            }
            HyperMinHashError::FormatError(err) => {
                f.write_fmt(format_args!("FormatError: {}", err))
            }
            HyperMinHashError::IoError(err) => f.write_fmt(format_args!("IoError: {}", err)),
        }
    }
}

impl std::error::Error for HyperMinHashError {}

impl From<io::Error> for HyperMinHashError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

impl From<base64::DecodeError> for HyperMinHashError {
    fn from(value: base64::DecodeError) -> Self {
        Self::FormatError(format!("{}", value))
    }
}
