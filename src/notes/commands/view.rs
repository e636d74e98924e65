use crate::collection::NoteCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(collection: &NoteCollection<S>, id: NoteId) -> Result<CmdResult> {
    match collection.load_for_edit(id) {
        Some(note) => {
            Ok(CmdResult::default().with_listed_notes(vec![note.clone()], collection.len()))
        }
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!("Note {} not found.", id)));
            Ok(result)
        }
    }
}
