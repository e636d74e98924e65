//! CSV export of notes.
//!
//! Formatting and delivery are separate: [`to_delimited_text`] and
//! [`export_filename`] decide *what* gets exported, a [`FileExporter`] decides
//! where the bytes end up.

use crate::error::{NotesError, Result};
use crate::model::Note;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_PREFIX: &str = "staffingly-notes";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";
const HEADERS: [&str; 5] = ["DateTime", "Name", "Phone", "Email", "Notes"];

/// A finished export ready to be handed to a [`FileExporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Render `notes` as CSV, named after `now`.
    pub fn csv(notes: &[Note], now: DateTime<Utc>) -> Result<Self> {
        let text = to_delimited_text(notes)?;
        Ok(Self {
            filename: export_filename(now),
            mime: CSV_MIME,
            bytes: text.into_bytes(),
        })
    }
}

/// Render notes as CSV: a header row, then one row per note in order.
///
/// Every field is double-quoted with embedded quotes doubled. Rows are joined
/// by `\n` without a trailing newline.
pub fn to_delimited_text(notes: &[Note]) -> Result<String> {
    if notes.is_empty() {
        return Err(NotesError::NothingToExport);
    }

    let mut rows = Vec::with_capacity(notes.len() + 1);
    rows.push(csv_row(&HEADERS));
    rows.extend(notes.iter().map(|n| csv_row(&n.fields())));
    Ok(rows.join("\n"))
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// `staffingly-notes-2025-03-14T09-05-07.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!(
        "{}-{}.csv",
        EXPORT_PREFIX,
        now.format("%Y-%m-%dT%H:%M:%S").to_string().replace(':', "-")
    )
}

/// Delivers an export somewhere the user can pick it up.
pub trait FileExporter {
    /// Deliver `file`, returning where it went.
    fn export(&mut self, file: &ExportFile) -> Result<PathBuf>;
}

/// Writes exports into a directory.
#[derive(Debug, Clone)]
pub struct DirExporter {
    dir: PathBuf,
}

impl DirExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileExporter for DirExporter {
    fn export(&mut self, file: &ExportFile) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(NotesError::Io)?;
        }
        let path = self.dir.join(&file.filename);
        fs::write(&path, &file.bytes).map_err(NotesError::Io)?;
        Ok(path)
    }
}

/// Keeps exports in memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    pub files: Vec<ExportFile>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileExporter for MemoryExporter {
    fn export(&mut self, file: &ExportFile) -> Result<PathBuf> {
        self.files.push(file.clone());
        Ok(PathBuf::from(format!("memory://{}", file.filename)))
    }
}
