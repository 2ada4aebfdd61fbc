//! Format resolution and the two interpretations it arbitrates between.
//!
//! Most callers should use [`resolve()`](resolve::resolve), which:
//!
//! - attempts the delimited-text interpretation first
//! - falls back to the spreadsheet interpretation only on a decode-class
//!   failure
//! - surfaces a terminal [`crate::error::IngestError::UnreadableFormat`]
//!   when both fail
//!
//! Format-specific parsers are also available under:
//! - [`delimited`]
//! - [`spreadsheet`]

pub mod delimited;
pub mod observability;
pub mod resolve;
pub mod spreadsheet;

pub use observability::{
    CompositeObserver, FileObserver, IngestContext, IngestObserver, IngestStats, Severity,
    StdErrObserver,
};
pub use resolve::{resolve, resolve_with_format, ResolvedFormat};

/// Turn raw header cells into unique, non-empty column names.
///
/// Empty headers become `column_N` (1-based position); duplicates get a
/// `_N` suffix, counted from 2, in order of appearance.
pub(crate) fn normalize_header_names<I, S>(raw: I) -> Vec<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = Vec::new();
    for (idx, cell) in raw.enumerate() {
        let base = cell.as_ref().trim();
        let base = if base.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            base.to_string()
        };

        let mut name = base.clone();
        let mut n = 2;
        while names.iter().any(|existing| *existing == name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        names.push(name);
    }
    names
}
