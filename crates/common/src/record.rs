// Activity records: one appended log line, reused as the commit message.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// ISO-8601 local timestamp with second precision, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Separator between the timestamp and the note in a log line.
pub const NOTE_SEPARATOR: &str = " — ";

/// Prefix of every commit message.
pub const COMMIT_LABEL: &str = "Automated activity";

/// A timestamp + note pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityRecord {
    pub timestamp: NaiveDateTime,
    pub note: String,
}

impl ActivityRecord {
    /// Build a record, truncating the timestamp to whole seconds.
    pub fn new(timestamp: NaiveDateTime, note: impl Into<String>) -> Self {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self { timestamp, note: note.into() }
    }

    pub fn timestamp_iso(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `<timestamp> — <note>`, without trailing newline.
    pub fn log_line(&self) -> String {
        format!("{}{NOTE_SEPARATOR}{}", self.timestamp_iso(), self.note)
    }

    /// `Automated activity: <timestamp> — <note>`.
    pub fn commit_message(&self) -> String {
        format!("{COMMIT_LABEL}: {}", self.log_line())
    }

    /// Parse a line previously produced by [`ActivityRecord::log_line`].
    pub fn parse_line(line: &str) -> Option<Self> {
        let (timestamp, note) = line.trim_end_matches(['\r', '\n']).split_once(NOTE_SEPARATOR)?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
        if note.is_empty() {
            return None;
        }
        Some(Self::new(timestamp, note))
    }
}
