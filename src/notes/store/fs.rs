use super::KeyValueStore;
use crate::error::{NotesError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed key-value store: one JSON file per key under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotesError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.key_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NotesError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.ensure_dir()?;
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(NotesError::Io)?;
        fs::rename(&tmp, &path).map_err(NotesError::Io)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote key");
        Ok(())
    }
}

/// Keys become file names, so anything outside `[A-Za-z0-9._-]` is replaced.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
