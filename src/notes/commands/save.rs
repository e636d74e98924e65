use crate::collection::NoteCollection;
use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::FormState;
use crate::store::KeyValueStore;

/// Commit the form and reset it to blank.
pub fn run<S: KeyValueStore>(
    collection: &mut NoteCollection<S>,
    form: &mut FormState,
) -> Result<CmdResult> {
    let updating = form
        .id
        .is_some_and(|id| collection.load_for_edit(id).is_some());
    let note = collection.save(form)?;
    form.clear();

    let mut result = CmdResult::default();
    let verb = if updating { "updated" } else { "saved" };
    result.add_message(CmdMessage::success(format!(
        "Note {}: {}",
        verb,
        describe(&note)
    )));
    Ok(result.with_affected_notes(vec![note]).with_form(form.clone()))
}
