use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Terminal error surface of the ingestion pipeline.
///
/// Every variant carries owned data, so outcomes can be cloned into the
/// optional parse cache and replayed to concurrent callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    /// User bytes were supplied without a valid single-character delimiter.
    /// Raised before any parse attempt.
    #[error("delimiter must be exactly one character, got {got:?}")]
    InvalidDelimiter { got: String },

    /// The input decoded as text but its delimited structure is invalid
    /// (ragged rows, missing header, apparent delimiter mismatch). Surfaced
    /// immediately; the spreadsheet fallback is not attempted.
    #[error("malformed delimited data: {message}")]
    MalformedDelimited { message: String },

    /// Neither the delimited-text nor the spreadsheet interpretation
    /// succeeded. Carries the cause of the spreadsheet attempt.
    #[error("unreadable format: {cause}")]
    UnreadableFormat { cause: String },
}

/// Failure of the delimited-text interpretation.
///
/// The resolver pattern-matches on this: only [`DelimitedError::Decode`]
/// triggers the spreadsheet fallback, so structural errors are never masked
/// as a format mismatch.
#[derive(Debug, Error)]
pub enum DelimitedError {
    /// The bytes are not valid UTF-8 under the assumed encoding. Not a
    /// terminal failure; the resolver retries the source as a spreadsheet.
    #[error("input is not valid utf-8 text: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The text decoded but could not be read as a delimited table.
    #[error("{0}")]
    Malformed(String),
}

/// Failure of the binary spreadsheet interpretation.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The workbook container could not be opened or read.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook opened but has no usable sheet content.
    #[error("{0}")]
    Sheet(String),
}
