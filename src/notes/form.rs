use crate::error::{NotesError, Result};
use crate::model::{Note, NoteId};
use std::fmt;
use std::str::FromStr;

/// The editable text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Datetime,
    Name,
    Phone,
    Email,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Datetime,
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Datetime => "datetime",
            FormField::Name => "name",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::Notes => "notes",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NotesError::Api(format!("Unknown form field: {}", s)))
    }
}

/// The in-progress record being authored or edited.
///
/// `id` is `None` while composing a new note and `Some` once an existing note
/// has been loaded for editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: Option<NoteId>,
    pub datetime: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite one field, leaving the others untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Datetime => self.datetime = value,
            FormField::Name => self.name = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
            FormField::Notes => self.notes = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Datetime => &self.datetime,
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Notes => &self.notes,
        }
    }

    /// Reset to the empty sentinel.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replace the whole form with a saved note's values.
    pub fn load(&mut self, note: &Note) {
        *self = Self::from(note);
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Label of the submit action ("Save Note" or "Update Note").
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Note"
        } else {
            "Save Note"
        }
    }
}

impl From<&Note> for FormState {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            datetime: note.datetime.clone(),
            name: note.name.clone(),
            phone: note.phone.clone(),
            email: note.email.clone(),
            notes: note.notes.clone(),
        }
    }
}
