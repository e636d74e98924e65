use crate::collection::NoteCollection;
use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::prompt::UserPrompt;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    collection: &mut NoteCollection<S>,
    prompt: &mut dyn UserPrompt,
    id: NoteId,
    skip_confirm: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(note) = collection.load_for_edit(id) else {
        result.add_message(CmdMessage::info(format!("Note {} not found.", id)));
        return Ok(result);
    };

    if !skip_confirm && !prompt.confirm(&format!("Delete this note ({})?", describe(note)))? {
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    if let Some(removed) = collection.delete(id)? {
        result.add_message(CmdMessage::success(format!(
            "Note deleted: {}",
            describe(&removed)
        )));
        result.affected_notes.push(removed);
    }
    Ok(result)
}
