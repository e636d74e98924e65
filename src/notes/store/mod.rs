//! # Storage Layer
//!
//! Persistence is abstracted behind the [`KeyValueStore`] trait: a tiny
//! `get(key)` / `set(key, bytes)` capability. The collection stores its whole
//! snapshot under a single key, so a backend never needs to understand notes.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - Each key maps to `<root>/<key>.json`
//!   - Writes go to a temporary file first and are renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! ~/.local/share/notes/
//! ├── staffingly-notes.json   # Snapshot of the whole collection (JSON array)
//! └── config.json             # NotesConfig
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for key-value persistence.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}
