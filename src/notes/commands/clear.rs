use crate::collection::NoteCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prompt::UserPrompt;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    collection: &mut NoteCollection<S>,
    prompt: &mut dyn UserPrompt,
    skip_confirm: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if collection.is_empty() {
        result.add_message(CmdMessage::info("No notes to clear."));
        return Ok(result);
    }

    if !skip_confirm && !prompt.confirm("Clear ALL notes? This cannot be undone.")? {
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    let removed = collection.clear_all()?;
    result.add_message(CmdMessage::success(format!("Cleared {} notes.", removed)));
    Ok(result)
}
