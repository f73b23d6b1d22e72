//! JSONL file writer for round events.
//!
//! Each [`SummaryEvent`] becomes a single JSON line that starts with its
//! `type`, `room` and `timestamp`, followed by the payload fields.

use gurubu_application::ports::summary_logger::{SummaryEvent, SummaryLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL round logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Every line is flushed as it is
/// written.
pub struct JsonlSummaryLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlSummaryLogger {
    /// Open (or create) the log file for appending.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create summary log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open summary log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One line of the round log: the room and event header, then the payload fields
fn round_record(event: SummaryEvent, timestamp: String) -> Map<String, Value> {
    let mut record = Map::new();
    record.insert("type".into(), Value::from(event.event_type));
    record.insert("room".into(), Value::from(event.room.as_str()));
    record.insert("timestamp".into(), Value::from(timestamp));

    match event.payload {
        Value::Object(fields) => {
            // Header fields win over payload fields of the same name
            for (key, value) in fields {
                record.entry(key).or_insert(value);
            }
        }
        Value::Null => {}
        other => {
            record.insert("data".into(), other);
        }
    }
    record
}

impl SummaryLogger for JsonlSummaryLogger {
    fn log(&self, event: SummaryEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let record = round_record(event, timestamp);

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        // Flushed per line so a crashed run still leaves complete rounds behind
        match self.writer.lock() {
            Ok(mut writer) => {
                if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                    warn!("Could not write round log {}: {}", self.path.display(), e);
                }
            }
            Err(_) => warn!("Round log writer is poisoned; dropping event"),
        }
    }
}
