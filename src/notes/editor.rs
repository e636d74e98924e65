use crate::error::{NotesError, Result};
use crate::form::{FormField, FormState};
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

const HEADER_FIELDS: [(FormField, &str); 4] = [
    (FormField::Datetime, "Date"),
    (FormField::Name, "Name"),
    (FormField::Phone, "Phone"),
    (FormField::Email, "Email"),
];

/// Formats a form for the editor buffer.
///
/// Format: one `Label: value` line per header field, a blank line, then the
/// notes body. A blank date is shown as `now`, the way the form's clock field does.
pub fn form_to_buffer(form: &FormState, now: &str) -> String {
    let mut buffer = String::new();
    for (field, label) in HEADER_FIELDS {
        let value = match field {
            FormField::Datetime if form.datetime.is_empty() => now,
            _ => form.get(field),
        };
        buffer.push_str(&format!("{}: {}\n", label, value));
    }
    buffer.push('\n');
    buffer.push_str(&form.notes);
    buffer
}

/// Parses an editor buffer back into `form`, keeping its id.
///
/// Header lines run until the first blank line; unknown labels are ignored.
/// Everything after the blank line is the notes body.
pub fn form_from_buffer(buffer: &str, mut form: FormState) -> FormState {
    let (header, body) = match buffer.split_once("\n\n") {
        Some((header, body)) => (header, body),
        None => (buffer, ""),
    };

    for line in header.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim();
        let field = HEADER_FIELDS
            .iter()
            .find(|(_, l)| l.eq_ignore_ascii_case(label))
            .map(|(f, _)| *f)
            .or_else(|| label.parse::<FormField>().ok());
        if let Some(field) = field {
            form.set(field, value.trim());
        }
    }
    form.set(FormField::Notes, body.trim_end());
    form
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NotesError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| NotesError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NotesError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(NotesError::Io)
}

/// Lets the user fill `form` in their editor.
///
/// If the date was blank and the prefilled `now` is left untouched, it stays
/// blank so the note is stamped with the actual save time.
pub fn edit_form(form: &FormState, now: &str) -> Result<FormState> {
    let mut file = tempfile::Builder::new()
        .prefix("snotes_edit_")
        .suffix(".txt")
        .tempfile()
        .map_err(NotesError::Io)?;
    file.write_all(form_to_buffer(form, now).as_bytes())
        .map_err(NotesError::Io)?;
    // The editor gets the path with our handle closed. The file is removed on drop.
    let temp_path = file.into_temp_path();

    let buffer = open_in_editor(&temp_path)?;
    let mut edited = form_from_buffer(&buffer, form.clone());
    if form.datetime.is_empty() && edited.datetime == now {
        edited.datetime.clear();
    }
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        FormState {
            id: Some(5),
            datetime: "3/14/2025, 9:05:07 AM".into(),
            name: "Alex".into(),
            phone: "555".into(),
            email: "a@x.com".into(),
            notes: "First line\nSecond line".into(),
        }
    }

    #[test]
    fn test_to_buffer() {
        assert_eq!(
            form_to_buffer(&filled(), "ignored"),
            "Date: 3/14/2025, 9:05:07 AM\nName: Alex\nPhone: 555\nEmail: a@x.com\n\nFirst line\nSecond line"
        );
    }

    #[test]
    fn test_blank_date_shows_now() {
        let buffer = form_to_buffer(&FormState::new(), "NOW");
        assert!(buffer.starts_with("Date: NOW\nName: \n"));
    }

    #[test]
    fn test_roundtrip_keeps_id() {
        let original = filled();
        let buffer = form_to_buffer(&original, "now");
        let parsed = form_from_buffer(&buffer, original.clone());
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_buffer_reads_edits() {
        let buffer = "Date: today\nname:  Bo \nEmail: bo@x.com\nNickname: B\n\nCall later\n\nThanks\n";
        let parsed = form_from_buffer(buffer, FormState::new());
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.datetime, "today");
        assert_eq!(parsed.name, "Bo");
        assert_eq!(parsed.phone, "");
        assert_eq!(parsed.email, "bo@x.com");
        assert_eq!(parsed.notes, "Call later\n\nThanks");
    }

    #[test]
    fn test_from_buffer_without_body() {
        let parsed = form_from_buffer("Name: Cy", FormState::new());
        assert_eq!(parsed.name, "Cy");
        assert_eq!(parsed.notes, "");
    }

    #[test]
    fn test_value_may_contain_colons() {
        let parsed = form_from_buffer("Date: 9:05:07 AM\n\n", FormState::new());
        assert_eq!(parsed.datetime, "9:05:07 AM");
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_form_with_noop_editor() {
        env::set_var("EDITOR", "true");
        let mut form = filled();
        form.datetime.clear();

        let edited = edit_form(&form, "NOW").unwrap();
        assert_eq!(edited, form);
    }
}
