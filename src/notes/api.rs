//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every notes operation, whatever UI drives it.
//!
//! It owns the three pieces of state a session works with:
//! - the [`NoteCollection`] (loaded from the store at construction)
//! - the [`FormState`] being authored or edited
//! - the [`NotesConfig`] in effect
//!
//! plus the two outward capabilities, a [`UserPrompt`] for confirmations and a
//! [`FileExporter`] for CSV delivery.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or terminal formatting
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `NotesApi<FileStore>`
//! - Testing: `NotesApi<InMemoryStore>`

use crate::collection::{Clock, NoteCollection};
use crate::commands;
use crate::config::NotesConfig;
use crate::error::Result;
use crate::export::{DirExporter, FileExporter};
use crate::form::{FormField, FormState};
use crate::model::NoteId;
use crate::prompt::{StdinPrompt, UserPrompt};
use crate::store::KeyValueStore;

pub struct NotesApi<S: KeyValueStore> {
    collection: NoteCollection<S>,
    form: FormState,
    config: NotesConfig,
    paths: commands::NotesPaths,
    prompt: Box<dyn UserPrompt>,
    exporter: Box<dyn FileExporter>,
}

impl<S: KeyValueStore> NotesApi<S> {
    /// Load the collection from `store` and wire the default capabilities:
    /// stdin confirmation and export into the configured directory.
    pub fn new(store: S, paths: commands::NotesPaths, config: NotesConfig) -> Self {
        let collection =
            NoteCollection::load(store).with_datetime_format(config.datetime_format.clone());
        let export_dir = config.export_dir.clone().unwrap_or_else(|| ".".into());
        Self {
            collection,
            form: FormState::new(),
            config,
            paths,
            prompt: Box::new(StdinPrompt),
            exporter: Box::new(DirExporter::new(export_dir)),
        }
    }

    pub fn with_prompt(mut self, prompt: impl UserPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn with_exporter(mut self, exporter: impl FileExporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.collection = self.collection.with_clock(clock);
        self
    }

    // --- Form ---

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Replace the whole form, e.g. after the user edited it externally.
    pub fn replace_form(&mut self, form: FormState) {
        self.form = form;
    }

    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    /// Commit the form (insert or update) and reset it.
    pub fn submit(&mut self) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.collection, &mut self.form)
    }

    /// Load the note with `id` into the form.
    pub fn edit_note(&mut self, id: NoteId) -> Result<commands::CmdResult> {
        commands::edit::run(&self.collection, id, &mut self.form)
    }

    // --- Collection ---

    pub fn view_note(&self, id: NoteId) -> Result<commands::CmdResult> {
        commands::view::run(&self.collection, id)
    }

    pub fn list_notes(&self, query: &str) -> Result<commands::CmdResult> {
        commands::list::run(&self.collection, query)
    }

    /// Delete one note, asking first unless `skip_confirm` or confirmations are
    /// turned off in config.
    pub fn delete_note(&mut self, id: NoteId, skip_confirm: bool) -> Result<commands::CmdResult> {
        let skip = skip_confirm || !self.config.confirm_destructive;
        commands::delete::run(&mut self.collection, self.prompt.as_mut(), id, skip)
    }

    /// Remove every note. The clear-all confirmation is always asked unless
    /// `skip_confirm` is given explicitly.
    pub fn clear_all(&mut self, skip_confirm: bool) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.collection, self.prompt.as_mut(), skip_confirm)
    }

    pub fn export_notes(&mut self, query: &str) -> Result<commands::CmdResult> {
        commands::export::run(&self.collection, self.exporter.as_mut(), query)
    }

    /// Export through a one-off exporter instead of the configured one.
    pub fn export_notes_to(
        &self,
        exporter: &mut dyn FileExporter,
        query: &str,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.collection, exporter, query)
    }

    // --- Misc ---

    /// "Now" rendered with the configured datetime format.
    pub fn now_string(&self) -> String {
        self.collection.now_string()
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::NotesPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, NotesPaths};
