//! Structured logging for batch records.
//!
//! Every record runs inside a `record` span carrying its input line number
//! and URL. Events emitted inside the span, including collaborator logs,
//! inherit those fields, so they are not repeated on each event.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `LOG_FORMAT=json` switches to JSON lines; otherwise human-readable
/// ANSI output. `RUST_LOG` overrides the default `reelsync=info` filter.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelsync=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Logger for one input record.
#[derive(Debug, Clone)]
pub struct RecordLogger {
    line: usize,
    url: String,
}

impl RecordLogger {
    /// `line` is the 1-based line number in the input file.
    pub fn new(line: usize, url: &str) -> Self {
        Self {
            line,
            url: url.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!("Record started: {}", message);
    }

    pub fn log_progress(&self, message: &str) {
        info!("{}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!("{}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!("Record failed: {}", message);
    }

    pub fn log_completion(&self, message: &str) {
        info!("Record completed: {}", message);
    }

    pub fn create_span(&self) -> Span {
        tracing::info_span!("record", line = self.line, url = %self.url)
    }
}
