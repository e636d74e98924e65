use chrono::{DateTime, Utc};
use colored::Colorize;
use staffingly_notes::api::{CmdMessage, MessageLevel};
use staffingly_notes::config::ConfigKey;
use staffingly_notes::model::Note;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const EMPTY_NAME: &str = "—";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

/// The list view: a count line, then one entry per note.
pub(crate) fn print_notes(notes: &[Note], total: usize) {
    if total == 0 {
        println!("No notes yet.");
        return;
    }
    if notes.len() == total {
        println!("Showing {} notes", notes.len());
    } else {
        println!("Showing {} of {} notes", notes.len(), total);
    }
    if notes.is_empty() {
        return;
    }
    println!();

    for note in notes {
        let id_str = format!("{}  ", note.id);
        let name = if note.name.is_empty() {
            EMPTY_NAME
        } else {
            note.name.as_str()
        };
        let time_ago = format_time_ago(note.id);

        let fixed_width = id_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&format!("{}  {}", name, note.datetime), available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{}{}",
            id_str.yellow(),
            title.bold(),
            " ".repeat(padding),
            time_ago.dimmed()
        );

        let preview: String = note
            .notes
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let preview = if preview.is_empty() {
            "(no notes)".to_string()
        } else {
            preview
        };
        let indent = " ".repeat(id_str.width());
        println!(
            "{}{}",
            indent,
            truncate_to_width(&preview, LINE_WIDTH - indent.len())
        );

        if let Some(contact) = contact_line(note) {
            println!("{}{}", indent, contact.dimmed());
        }
    }
}

pub(crate) fn print_full_note(note: &Note) {
    println!("{} {}", note.id.to_string().yellow(), note.datetime.dimmed());
    println!(
        "{}",
        if note.name.is_empty() {
            EMPTY_NAME.bold()
        } else {
            note.name.bold()
        }
    );
    if let Some(contact) = contact_line(note) {
        println!("{}", contact);
    }
    println!("--------------------------------");
    if note.notes.is_empty() {
        println!("{}", "(no notes)".dimmed());
    } else {
        println!("{}", note.notes);
    }
}

pub(crate) fn print_config(entries: &[(ConfigKey, String)]) {
    for (key, value) in entries {
        println!("{} = {}", key, value);
    }
}

fn contact_line(note: &Note) -> Option<String> {
    match (note.phone.is_empty(), note.email.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!("Phone: {}", note.phone)),
        (true, false) => Some(note.email.clone()),
        (false, false) => Some(format!("Phone: {} • {}", note.phone, note.email)),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Ids are creation timestamps in milliseconds, so they double as a "created" time.
fn format_time_ago(id: i64) -> String {
    let Some(created) = DateTime::<Utc>::from_timestamp_millis(id) else {
        return " ".repeat(TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(created);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
