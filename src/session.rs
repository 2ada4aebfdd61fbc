//! Per-interaction orchestration: select a source, resolve its format,
//! derive the preview.
//!
//! An [`IngestionSession`] owns no state across interactions beyond its
//! options; every [`IngestionSession::run`] call is self-contained and
//! rebuilds the table from scratch (or fetches it from the shared
//! [`ParseCache`] when one is configured, a pure latency optimization).

use std::fmt;
use std::sync::Arc;

use crate::cache::ParseCache;
use crate::error::{IngestError, IngestResult};
use crate::ingest::observability::{IngestContext, IngestObserver, IngestStats, Severity};
use crate::ingest::resolve::resolve_with_format;
use crate::preview::{preview, Preview, DEFAULT_PREVIEW_ROWS};
use crate::source::{select, Delimiter, SourceOrigin};
use crate::table::Table;

/// Options controlling session behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct SessionOptions {
    /// Row cap for the preview projection.
    pub preview_rows: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
    /// Optional shared parse cache keyed by content fingerprint.
    pub cache: Option<Arc<ParseCache>>,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("preview_rows", &self.preview_rows)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("cache_set", &self.cache.is_some())
            .finish()
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            observer: None,
            alert_at_or_above: Severity::Critical,
            cache: None,
        }
    }
}

/// Result of a successful ingestion interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// The parsed table, for further processing by collaborators.
    pub table: Table,
    /// Row-limited projection of the table.
    pub preview: Preview,
    /// Full ordered column-name list.
    pub columns: Vec<String>,
}

impl IngestOutcome {
    /// Column names joined for display, e.g. `date | description | amount`.
    pub fn columns_joined(&self) -> String {
        self.columns.join(" | ")
    }
}

/// Orchestrates one ingestion interaction at a time.
#[derive(Debug, Clone, Default)]
pub struct IngestionSession {
    options: SessionOptions,
}

impl IngestionSession {
    /// Create a session with the given options.
    pub fn new(options: SessionOptions) -> Self {
        Self { options }
    }

    /// Run one interaction.
    ///
    /// - With `user_bytes` present, `user_delimiter` must be exactly one
    ///   character; it is validated before any byte of the source is read.
    /// - Without `user_bytes`, the bundled sample dataset is ingested with a
    ///   `,` delimiter and `user_delimiter` is ignored.
    ///
    /// The first failure terminates the interaction; no partial result is
    /// returned. Re-running with equal inputs yields a content-equal
    /// outcome.
    pub fn run(
        &self,
        user_bytes: Option<Vec<u8>>,
        user_delimiter: Option<&str>,
    ) -> IngestResult<IngestOutcome> {
        let user = match user_bytes {
            Some(bytes) => {
                let raw = user_delimiter.unwrap_or("");
                match Delimiter::parse(raw) {
                    Ok(delimiter) => Some((bytes, delimiter)),
                    Err(err) => {
                        let ctx = IngestContext {
                            origin: SourceOrigin::UserSupplied,
                            delimiter: None,
                            format: None,
                        };
                        self.report_failure(&ctx, &err);
                        return Err(err);
                    }
                }
            }
            None => None,
        };

        let (source, delimiter) = select(user);
        let mut ctx = IngestContext {
            origin: source.origin(),
            delimiter: Some(delimiter),
            format: None,
        };

        let resolved = match &self.options.cache {
            Some(cache) => cache
                .resolve(&source, delimiter)
                .map(|(table, format)| ((*table).clone(), format)),
            None => resolve_with_format(&source, delimiter),
        };

        match resolved {
            Ok((table, format)) => {
                ctx.format = Some(format);
                if let Some(obs) = self.options.observer.as_ref() {
                    obs.on_success(
                        &ctx,
                        IngestStats {
                            rows: table.row_count(),
                            columns: table.column_count(),
                        },
                    );
                }

                let preview = preview(&table, self.options.preview_rows);
                let columns = table.column_names().map(str::to_owned).collect();
                Ok(IngestOutcome {
                    table,
                    preview,
                    columns,
                })
            }
            Err(err) => {
                self.report_failure(&ctx, &err);
                Err(err)
            }
        }
    }

    fn report_failure(&self, ctx: &IngestContext, error: &IngestError) {
        if let Some(obs) = self.options.observer.as_ref() {
            let severity = severity_for_error(error);
            obs.on_failure(ctx, severity, error);
            if severity >= self.options.alert_at_or_above {
                obs.on_alert(ctx, severity, error);
            }
        }
    }
}

fn severity_for_error(error: &IngestError) -> Severity {
    match error {
        IngestError::InvalidDelimiter { .. } => Severity::Warning,
        IngestError::MalformedDelimited { .. } => Severity::Error,
        IngestError::UnreadableFormat { .. } => Severity::Critical,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// Useful when ingestion work is queued behind a job system.
#[derive(Clone)]
pub struct IngestRequest {
    /// Raw bytes to ingest; `None` selects the bundled sample dataset.
    pub bytes: Option<Vec<u8>>,
    /// Raw delimiter input, validated at run time.
    pub delimiter: Option<String>,
    /// Options controlling the session.
    pub options: SessionOptions,
}

impl fmt::Debug for IngestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestRequest")
            .field("bytes_len", &self.bytes.as_ref().map(Vec::len))
            .field("delimiter", &self.delimiter)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestRequest {
    /// Execute the request through a fresh [`IngestionSession`].
    pub fn run(&self) -> IngestResult<IngestOutcome> {
        IngestionSession::new(self.options.clone())
            .run(self.bytes.clone(), self.delimiter.as_deref())
    }
}
