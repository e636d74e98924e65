use super::KeyValueStore;
use crate::error::{NotesError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    entries: HashMap<String, Vec<u8>>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Seed a raw value, bypassing the error simulation.
    pub fn insert_raw(&mut self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.simulate_write_error {
            return Err(NotesError::Store("Simulated write error".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Note, STORAGE_KEY};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        notes: Vec<Note>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                notes: Vec::new(),
            }
        }

        /// Append `count` generic notes, newest (highest id) first.
        pub fn with_notes(mut self, count: usize) -> Self {
            let base = self.notes.len();
            for i in (0..count).rev() {
                let n = base + i + 1;
                self.notes.push(Note {
                    id: 1_700_000_000_000 + n as i64,
                    datetime: format!("1/{}/2025, 10:00:00 AM", n),
                    name: format!("Contact {}", n),
                    phone: format!("555-01{:02}", n),
                    email: format!("contact{}@example.com", n),
                    notes: format!("Notes for contact {}", n),
                });
            }
            self
        }

        pub fn with_note(mut self, note: Note) -> Self {
            self.notes.push(note);
            self
        }

        /// Write the snapshot and hand back the store.
        pub fn build(mut self) -> InMemoryStore {
            let bytes = serde_json::to_vec(&self.notes).unwrap();
            self.store.insert_raw(STORAGE_KEY, bytes);
            self.store
        }
    }
}
