use std::sync::{Arc, Mutex};

use tabular_ingest::error::IngestError;
use tabular_ingest::ingest::{IngestContext, IngestObserver, IngestStats, Severity};
use tabular_ingest::session::{IngestRequest, IngestionSession, SessionOptions};
use tabular_ingest::table::ColumnType;

const PEOPLE_CSV: &[u8] = b"a,b\n1,2\n3,4\n";

fn default_session() -> IngestionSession {
    IngestionSession::new(SessionOptions::default())
}

#[test]
fn run_with_user_bytes_returns_table_preview_and_columns() {
    let out = default_session()
        .run(Some(PEOPLE_CSV.to_vec()), Some(","))
        .unwrap();

    assert_eq!(out.columns, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(out.table.row_count(), 2);
    assert_eq!(out.preview.row_count(), 2);
    assert_eq!(out.preview.column_names, out.columns);
    assert_eq!(out.columns_joined(), "a | b");
}

#[test]
fn run_rejects_empty_delimiter_before_parsing() {
    let err = default_session()
        .run(Some(PEOPLE_CSV.to_vec()), Some(""))
        .unwrap_err();
    assert!(matches!(err, IngestError::InvalidDelimiter { .. }));
}

#[test]
fn run_rejects_missing_delimiter_when_bytes_present() {
    let err = default_session()
        .run(Some(PEOPLE_CSV.to_vec()), None)
        .unwrap_err();
    assert!(matches!(err, IngestError::InvalidDelimiter { .. }));
}

#[test]
fn run_rejects_multi_character_delimiter() {
    let err = default_session()
        .run(Some(PEOPLE_CSV.to_vec()), Some(";;"))
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("exactly one character"));
}

#[test]
fn run_without_bytes_ingests_bundled_sample() {
    let out = default_session().run(None, None).unwrap();

    assert!(out.table.row_count() > 0);
    assert_eq!(
        out.columns,
        vec![
            "date".to_string(),
            "description".to_string(),
            "amount".to_string(),
            "balance".to_string(),
        ]
    );
    assert_eq!(
        out.table.column("date").unwrap().column_type,
        ColumnType::DateTime
    );
    assert_eq!(
        out.table.column("description").unwrap().column_type,
        ColumnType::Text
    );
    assert_eq!(
        out.table.column("amount").unwrap().column_type,
        ColumnType::Float
    );
}

#[test]
fn run_is_idempotent_by_content() {
    let session = default_session();
    let first = session.run(Some(PEOPLE_CSV.to_vec()), Some(",")).unwrap();
    let second = session.run(Some(PEOPLE_CSV.to_vec()), Some(",")).unwrap();
    assert_eq!(first, second);

    let sample_a = session.run(None, None).unwrap();
    let sample_b = session.run(None, None).unwrap();
    assert_eq!(sample_a.table, sample_b.table);
}

#[test]
fn ingest_request_runs_like_a_session() {
    let request = IngestRequest {
        bytes: Some(PEOPLE_CSV.to_vec()),
        delimiter: Some(",".to_string()),
        options: SessionOptions::default(),
    };
    let out = request.run().unwrap();
    assert_eq!(out.table.row_count(), 2);
}

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestStats>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl IngestObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestContext, stats: IngestStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestContext, severity: Severity, _error: &IngestError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestContext, severity: Severity, _error: &IngestError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn observed_session(obs: Arc<RecordingObserver>) -> IngestionSession {
    IngestionSession::new(SessionOptions {
        observer: Some(obs),
        alert_at_or_above: Severity::Critical,
        ..Default::default()
    })
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let session = observed_session(obs.clone());

    session.run(Some(PEOPLE_CSV.to_vec()), Some(",")).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![IngestStats { rows: 2, columns: 2 }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_structural_error() {
    let obs = Arc::new(RecordingObserver::default());
    let session = observed_session(obs.clone());

    // Wrong delimiter: structural failure, Error severity, below the
    // Critical alert threshold.
    let _ = session
        .run(Some(PEOPLE_CSV.to_vec()), Some(";"))
        .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_alert_on_unreadable_format() {
    let obs = Arc::new(RecordingObserver::default());
    let session = observed_session(obs.clone());

    let _ = session
        .run(Some(vec![0x00, 0xff, 0xfe, 0x80]), Some(","))
        .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Critical]);
    assert_eq!(alerts, vec![Severity::Critical]);
}

#[test]
fn observer_classifies_invalid_delimiter_as_warning() {
    let obs = Arc::new(RecordingObserver::default());
    let session = observed_session(obs.clone());

    let _ = session
        .run(Some(PEOPLE_CSV.to_vec()), Some(""))
        .unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Warning]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}
