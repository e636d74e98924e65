use crate::collection::NoteCollection;
use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::FormState;
use crate::model::NoteId;
use crate::store::KeyValueStore;

/// Load the note with `id` into the form for editing.
///
/// A missing id leaves the form untouched.
pub fn run<S: KeyValueStore>(
    collection: &NoteCollection<S>,
    id: NoteId,
    form: &mut FormState,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match collection.load_for_edit(id) {
        Some(note) => {
            form.load(note);
            result.add_message(CmdMessage::info(format!("Editing {}", describe(note))));
            result.affected_notes.push(note.clone());
        }
        None => {
            result.add_message(CmdMessage::info(format!("Note {} not found.", id)));
        }
    }
    Ok(result.with_form(form.clone()))
}
