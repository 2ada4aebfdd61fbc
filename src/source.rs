//! Byte-source selection: user-supplied bytes or the bundled sample dataset.
//!
//! A [`ByteSource`] is immutable and re-readable, so the resolver can retry
//! a failed interpretation from the start of the data. The bundled sample is
//! a small bank-transaction table embedded at build time; it is selected
//! with a fixed `,` delimiter whenever no user bytes are supplied.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{IngestError, IngestResult};

/// The bundled sample dataset (bank transactions, comma-delimited).
const SAMPLE_DATA: &[u8] = include_bytes!("../data/sample.csv");

/// Where a [`ByteSource`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceOrigin {
    /// Bytes supplied by the caller.
    UserSupplied,
    /// The bundled sample dataset.
    DefaultSample,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::UserSupplied => f.write_str("user-supplied"),
            SourceOrigin::DefaultSample => f.write_str("default-sample"),
        }
    }
}

/// Single-byte field delimiter for delimited-text interpretation.
///
/// Ignored when the spreadsheet interpretation is taken. Only constructible
/// through [`Delimiter::parse`] (or the fixed [`Delimiter::COMMA`]), so a
/// held `Delimiter` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delimiter(u8);

impl Delimiter {
    /// The delimiter used for the bundled sample dataset.
    pub const COMMA: Delimiter = Delimiter(b',');

    /// Validate raw user input as a delimiter.
    ///
    /// Accepts exactly one ASCII character; anything else (empty input, more
    /// than one character, a non-ASCII character) is [`IngestError::InvalidDelimiter`].
    pub fn parse(input: &str) -> IngestResult<Self> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Ok(Self(c as u8)),
            _ => Err(IngestError::InvalidDelimiter {
                got: input.to_string(),
            }),
        }
    }

    /// The delimiter byte.
    pub fn byte(self) -> u8 {
        self.0
    }

    /// The delimiter as a char.
    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Immutable, re-readable raw input plus its origin tag.
#[derive(Debug, Clone)]
pub struct ByteSource {
    bytes: Arc<[u8]>,
    origin: SourceOrigin,
}

impl ByteSource {
    /// Wrap caller-supplied bytes.
    pub fn user(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
            origin: SourceOrigin::UserSupplied,
        }
    }

    /// Open the bundled sample dataset.
    pub fn sample() -> Self {
        Self {
            bytes: SAMPLE_DATA.into(),
            origin: SourceOrigin::DefaultSample,
        }
    }

    /// The full byte content, readable from the start any number of times.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Origin tag.
    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    /// Byte length of the source.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the source has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Resolve the byte source and delimiter to operate on.
///
/// `Some((bytes, delimiter))` passes the user input through unchanged with
/// origin [`SourceOrigin::UserSupplied`]; `None` selects the bundled sample
/// dataset with [`Delimiter::COMMA`]. Delimiter validation happens before
/// this point (see [`crate::session::IngestionSession::run`]); pairing the
/// bytes with an already-validated [`Delimiter`] keeps "user bytes without a
/// delimiter" unrepresentable here.
pub fn select(user: Option<(Vec<u8>, Delimiter)>) -> (ByteSource, Delimiter) {
    match user {
        Some((bytes, delimiter)) => (ByteSource::user(bytes), delimiter),
        None => (ByteSource::sample(), Delimiter::COMMA),
    }
}
