//! Format resolution: ordered, short-circuiting selection between the
//! delimited-text and spreadsheet interpretations.
//!
//! The delimited attempt runs first (cheap, covers plain text exports). A
//! binary spreadsheet container reliably fails the UTF-8 decode, so a
//! decode-class failure is the only trigger for the spreadsheet attempt; a
//! structural failure of decoded text propagates unchanged, with no
//! fallback.

use std::fmt;

use serde::Serialize;

use crate::error::{DelimitedError, IngestError, IngestResult};
use crate::source::{ByteSource, Delimiter};
use crate::table::Table;

use super::{delimited, spreadsheet};

/// Which interpretation produced the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolvedFormat {
    /// Delimited text parsed with the caller's delimiter.
    Delimited,
    /// Binary spreadsheet workbook.
    Spreadsheet,
}

impl fmt::Display for ResolvedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedFormat::Delimited => f.write_str("delimited"),
            ResolvedFormat::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// Interpret `source` as a table.
pub fn resolve(source: &ByteSource, delimiter: Delimiter) -> IngestResult<Table> {
    resolve_with_format(source, delimiter).map(|(table, _)| table)
}

/// Interpret `source` as a table, also reporting which interpretation won.
pub fn resolve_with_format(
    source: &ByteSource,
    delimiter: Delimiter,
) -> IngestResult<(Table, ResolvedFormat)> {
    match delimited::parse_delimited(source.as_bytes(), delimiter) {
        Ok(table) => Ok((table, ResolvedFormat::Delimited)),
        Err(DelimitedError::Malformed(message)) => {
            Err(IngestError::MalformedDelimited { message })
        }
        Err(DelimitedError::Decode(_)) => {
            // Not text under the assumed encoding; retry from the start of
            // the source as a workbook.
            match spreadsheet::parse_workbook(source.as_bytes()) {
                Ok(table) => Ok((table, ResolvedFormat::Spreadsheet)),
                Err(cause) => Err(IngestError::UnreadableFormat {
                    cause: cause.to_string(),
                }),
            }
        }
    }
}
