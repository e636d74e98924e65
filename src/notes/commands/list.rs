use crate::collection::NoteCollection;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::KeyValueStore;

/// The filtered, ordered projection shown in the list view.
pub fn run<S: KeyValueStore>(collection: &NoteCollection<S>, query: &str) -> Result<CmdResult> {
    let listed = collection.filter(query);
    Ok(CmdResult::default().with_listed_notes(listed, collection.len()))
}
