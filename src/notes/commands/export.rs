use crate::collection::NoteCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::export::{ExportFile, FileExporter};
use crate::store::KeyValueStore;
use chrono::Utc;

/// Export the notes matching `query` (all notes for a blank query) as CSV.
pub fn run<S: KeyValueStore>(
    collection: &NoteCollection<S>,
    exporter: &mut dyn FileExporter,
    query: &str,
) -> Result<CmdResult> {
    let notes = collection.filter(query);
    let file = match ExportFile::csv(&notes, collection.now().with_timezone(&Utc)) {
        Ok(file) => file,
        Err(NotesError::NothingToExport) => {
            let mut res = CmdResult::default();
            res.add_message(CmdMessage::warning(NotesError::NothingToExport.to_string()));
            return Ok(res);
        }
        Err(e) => return Err(e),
    };

    let path = exporter.export(&file)?;
    tracing::info!(path = %path.display(), count = notes.len(), "exported notes");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} notes to {}",
        notes.len(),
        path.display()
    )));
    Ok(result.with_affected_notes(notes).with_export_path(path))
}
