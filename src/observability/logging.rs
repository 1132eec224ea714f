//! CSV access log with a single writer task.
//!
//! # Responsibilities
//! - One line per request, eight comma-separated fields, appended to a
//!   file or stdout
//! - Handlers never block on disk I/O: records travel over an unbounded
//!   channel to a dedicated writer task that serializes all writes
//!
//! Commas inside a field are escaped as `&#44;` so the line stays
//! splittable on plain commas.

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// One access-log entry.
#[derive(Debug, Clone)]
pub struct AccessRecord {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub remote_addr: String,
    pub host: String,
    pub uri: String,
    pub referer: String,
    /// Handler-supplied detail, e.g. which document a request resolved to.
    pub detail: Option<String>,
    /// Authenticated username, when the request carried one.
    pub username: Option<String>,
}

impl AccessRecord {
    /// Render the record as one CSV line, newline included.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.status,
            escape_field(&self.remote_addr),
            escape_field(&self.host),
            escape_field(&self.uri),
            escape_field(&self.referer),
            escape_field(self.detail.as_deref().unwrap_or_default()),
            escape_field(self.username.as_deref().unwrap_or_default()),
        )
    }
}

fn escape_field(field: &str) -> String {
    field.replace(',', "&#44;")
}

/// Cheaply cloneable handle to the access-log writer task.
#[derive(Clone)]
pub struct RequestLogger {
    tx: mpsc::UnboundedSender<AccessRecord>,
}

impl RequestLogger {
    /// Log to stdout.
    pub fn stdout() -> Self {
        Self::spawn(Box::new(tokio::io::stdout()))
    }

    /// Append to the given file, creating it if needed.
    pub async fn to_file(path: &str) -> Result<Self, std::io::Error> {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self::spawn(Box::new(file)))
    }

    /// Queue a record for writing. Never blocks; if the writer task has
    /// gone away the record is dropped with a diagnostic.
    pub fn record(&self, record: AccessRecord) {
        if self.tx.send(record).is_err() {
            tracing::error!("access log writer is gone, dropping record");
        }
    }

    /// A logger whose records land in the returned receiver instead of a
    /// writer. Intended for tests asserting on logged fields.
    pub fn capture() -> (Self, mpsc::UnboundedReceiver<AccessRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn spawn(mut writer: Box<dyn AsyncWrite + Send + Unpin>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<AccessRecord>();
        tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                let line = record.to_line();
                if let Err(e) = writer.write_all(line.as_bytes()).await {
                    tracing::error!(error = %e, "failed to write access log line");
                    continue;
                }
                if let Err(e) = writer.flush().await {
                    tracing::error!(error = %e, "failed to flush access log");
                }
            }
        });
        Self { tx }
    }
}
