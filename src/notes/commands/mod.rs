use crate::config::{ConfigKey, NotesConfig};
use crate::form::FormState;
use crate::model::Note;
use std::path::PathBuf;

pub mod clear;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod save;
pub mod view;

#[derive(Debug, Clone)]
pub struct NotesPaths {
    /// Directory holding the snapshot and `config.json`
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    /// Size of the whole collection when `listed_notes` is a filtered view
    pub total_notes: usize,
    pub form: Option<FormState>,
    pub export_path: Option<PathBuf>,
    pub config: Option<NotesConfig>,
    pub config_entries: Vec<(ConfigKey, String)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>, total: usize) -> Self {
        self.listed_notes = notes;
        self.total_notes = total;
        self
    }

    pub fn with_form(mut self, form: FormState) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: NotesConfig) -> Self {
        self.config_entries = config.entries();
        self.config = Some(config);
        self
    }

    /// True when any message is a warning or error.
    pub fn has_problems(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

/// Short one-line label for a note in messages.
pub(crate) fn describe(note: &Note) -> String {
    if note.name.is_empty() {
        format!("#{}", note.id)
    } else {
        format!("#{} {}", note.id, note.name)
    }
}
