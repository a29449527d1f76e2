use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;

/// JSONL audit stream for cookie mutations.
///
/// Active file:
/// - <log_dir>/cookies.jsonl
///
/// Rolling:
/// - hourly rolling handled by tracing-appender
#[derive(Clone)]
pub struct MutationSink {
    writer: NonBlocking,
}

// Keep the guard alive for process lifetime, otherwise lines may drop.
static SINK_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

#[derive(Serialize)]
struct MutationLine<'a> {
    #[serde(rename = "@timestamp")]
    ts: DateTime<Utc>,
    dataset: &'static str,
    op: &'a str,
    name: &'a str,
    /// Lookup outcome; absent for deletes, which are fire-and-forget.
    found: Option<bool>,
}

impl MutationSink {
    pub fn new(log_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("create log_dir failed: {}", log_dir.display()))?;

        let appender = tracing_appender::rolling::hourly(log_dir, "cookies.jsonl");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = SINK_GUARD.set(guard);

        Ok(Self { writer })
    }

    /// Write one mutation line. Failures are dropped: the audit stream
    /// must never break the data path.
    pub fn record(&self, op: &str, name: &str, found: Option<bool>) {
        let line = MutationLine {
            ts: Utc::now(),
            dataset: "cookies",
            op,
            name,
            found,
        };

        if let Ok(json) = serde_json::to_string(&line) {
            let mut w = self.writer.make_writer();
            let _ = w.write_all(json.as_bytes());
            let _ = w.write_all(b"\n");
        }
    }
}
