//! Integration tests for logging and tracing

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vacancy_stats::fetcher::{
    ExhaustionStrategy, FailurePolicy, FetcherError, PageResult, PaginationHelper,
};

/// In-memory log sink
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_tracing_subscriber_initialization() {
    // Using try_init to avoid error if already initialized
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vacancy_stats=debug")),
        )
        .with_test_writer()
        .try_init();

    // Either succeeds or fails because already initialized
    let _ = result;
    info!("subscriber ready");
    warn!("warning level");
    error!("error level");
}

#[test]
fn test_env_filter_directives() {
    for directive in [
        "info",
        "vacancy_stats=debug",
        "warn,vacancy_stats::fetcher=trace",
    ] {
        assert!(
            directive.parse::<EnvFilter>().is_ok(),
            "{directive} should parse"
        );
    }
}

#[test]
fn test_json_format_fields() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        info!(language = "Python", found = 5u64, "statistics collected");
    });

    let line = buffer.contents();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["level"], "INFO");
    assert_eq!(value["fields"]["message"], "statistics collected");
    assert_eq!(value["fields"]["language"], "Python");
    assert_eq!(value["fields"]["found"], 5);
}

/// A page skipped in resilient mode is reported at warn level
#[tokio::test(flavor = "current_thread")]
async fn test_resilient_skip_logs_warning() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("vacancy_stats=warn"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let outcome = PaginationHelper::paginate(
        "mock",
        "Программист Go",
        10,
        ExhaustionStrategy::DerivedFromTotal,
        FailurePolicy::Resilient,
        |page| async move {
            if page == 1 {
                Err(FetcherError::NetworkError("timed out".to_string()))
            } else {
                Ok(PageResult {
                    items: Vec::new(),
                    found: 30,
                    total_pages: None,
                    more: None,
                })
            }
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.pages_failed, 1);
    let logs = buffer.contents();
    assert!(logs.contains("WARN"), "missing warning: {logs}");
    assert!(logs.contains("page 1"), "warning should name the page: {logs}");
    assert!(logs.contains("timed out"));
}

/// Strict mode does not warn: the error is returned instead
#[tokio::test(flavor = "current_thread")]
async fn test_strict_failure_not_logged_as_skip() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("vacancy_stats=warn"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let result = PaginationHelper::paginate(
        "mock",
        "Программист Go",
        10,
        ExhaustionStrategy::DerivedFromTotal,
        FailurePolicy::Strict,
        |page| async move {
            if page == 1 {
                Err(FetcherError::NetworkError("timed out".to_string()))
            } else {
                Ok(PageResult {
                    items: Vec::new(),
                    found: 30,
                    total_pages: None,
                    more: None,
                })
            }
        },
    )
    .await;

    assert!(result.is_err());
    assert!(!buffer.contents().contains("continuing without it"));
}
