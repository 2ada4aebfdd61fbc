//! `tabular-ingest` is a small library for turning an arbitrary user-supplied
//! file (or a bundled sample dataset) into a uniform in-memory
//! [`table::Table`], and deriving a deterministic row-limited preview of it.
//!
//! The primary entrypoint is [`session::IngestionSession::run`], which takes
//! raw bytes plus a single-character field delimiter and drives the full
//! pipeline: source selection, format resolution, preview projection.
//!
//! ## Format resolution
//!
//! The byte source is first interpreted as delimited text using the caller's
//! delimiter. If (and only if) that attempt fails because the bytes are not
//! valid UTF-8, as a binary spreadsheet container always will, the source
//! is re-read from the start as a workbook (`.xlsx`, `.xls`, `.xlsb`,
//! `.ods`). A structural failure of decoded text is surfaced as-is with no
//! fallback, and when both interpretations fail the result is a single
//! terminal [`error::IngestError::UnreadableFormat`].
//!
//! ## Column types
//!
//! Each column of the resulting table holds one inferred type
//! ([`table::ColumnType::Int`], [`table::ColumnType::Float`],
//! [`table::ColumnType::DateTime`], or [`table::ColumnType::Text`]), with
//! empty cells stored as [`table::CellValue::Null`]. Delimited text infers
//! from the values; workbooks infer from the native cell kinds.
//!
//! ## Quick example
//!
//! ```rust
//! use tabular_ingest::session::{IngestionSession, SessionOptions};
//!
//! # fn main() -> Result<(), tabular_ingest::IngestError> {
//! let session = IngestionSession::new(SessionOptions::default());
//!
//! let out = session.run(Some(b"a,b\n1,2\n3,4\n".to_vec()), Some(","))?;
//! assert_eq!(out.columns, vec!["a".to_string(), "b".to_string()]);
//! assert_eq!(out.table.row_count(), 2);
//!
//! // No bytes: the bundled sample dataset is ingested with `,`.
//! let sample = session.run(None, None)?;
//! assert!(sample.table.row_count() > 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`session`]: per-interaction orchestration and options
//! - [`ingest`]: format resolution and the two format parsers
//! - [`source`]: byte-source selection, delimiter validation, sample data
//! - [`table`]: the in-memory tabular store
//! - [`preview`]: row-limited projections
//! - [`cache`]: optional fingerprint-keyed memoization of parse results
//! - [`error`]: error types used across the pipeline

pub mod cache;
pub mod error;
pub mod ingest;
pub mod preview;
pub mod session;
pub mod source;
pub mod table;

pub use error::{IngestError, IngestResult};
