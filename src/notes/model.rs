use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Identity of a saved note: milliseconds since the epoch at creation time.
pub type NoteId = i64;

/// Storage key under which the whole collection snapshot lives.
pub const STORAGE_KEY: &str = "staffingly-notes";

/// Default format for the "Date and Time" field, close to an en-US locale string
/// (e.g. `3/14/2025, 9:05:07 AM`).
pub const DEFAULT_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A persisted contact/notes record.
///
/// Field names are part of the snapshot format and must stay exactly
/// `{id, datetime, name, phone, email, notes}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub datetime: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl Note {
    /// Fields in export/search order: datetime, name, phone, email, notes.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.datetime,
            &self.name,
            &self.phone,
            &self.email,
            &self.notes,
        ]
    }

    /// True when `needle` (already lowercased) occurs in any text field.
    pub fn matches(&self, needle: &str) -> bool {
        self.fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// True when chrono can render `format` (no unknown `%` specifiers).
pub fn is_valid_datetime_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render a moment with the configured datetime format.
///
/// A format chrono cannot render falls back to [`DEFAULT_DATETIME_FORMAT`].
pub fn format_timestamp(moment: DateTime<Local>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", moment.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "invalid datetime format, using default");
    moment.format(DEFAULT_DATETIME_FORMAT).to_string()
}
