//! # Note Collection
//!
//! The authoritative ordered list of saved notes, mirrored to a [`KeyValueStore`]
//! under [`STORAGE_KEY`].
//!
//! Ordering is newest-created first. Updates replace a note where it stands, so
//! editing never moves an entry to the front.
//!
//! Every mutation rewrites the entire snapshot. There are no partial updates:
//! whatever the collection holds after the mutation is what the store holds.
//!
//! Loading is forgiving. A missing key, an unreadable store, or a snapshot that
//! fails to parse all produce an empty collection; the problem is logged and
//! the user just sees no notes.

use crate::error::Result;
use crate::form::FormState;
use crate::model::{format_timestamp, Note, NoteId, DEFAULT_DATETIME_FORMAT, STORAGE_KEY};
use crate::store::KeyValueStore;
use chrono::{DateTime, Local};

/// Source of "now", injectable for tests.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Hands out timestamp-shaped ids that never repeat.
///
/// An id is the current time in milliseconds unless that would collide with or
/// precede an id already issued or already present in the collection, in which
/// case it is bumped past them. When nothing fits above `NoteId::MAX`, the
/// clock value is used if free, otherwise the highest free id below it.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last_issued: Option<NoteId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, now_ms: NoteId, existing: &[NoteId]) -> NoteId {
        let last_issued = self.last_issued;
        let taken = |id: NoteId| last_issued == Some(id) || existing.contains(&id);
        let highest = last_issued.into_iter().chain(existing.iter().copied()).max();

        let id = match highest.map(|m| m.checked_add(1)) {
            None => now_ms,
            Some(Some(floor)) => floor.max(now_ms),
            Some(None) => std::iter::once(now_ms)
                .chain((NoteId::MIN..NoteId::MAX).rev())
                .find(|id| !taken(*id))
                .unwrap_or(now_ms),
        };
        self.last_issued = Some(id);
        id
    }
}

pub struct NoteCollection<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
    datetime_format: String,
}

impl<S: KeyValueStore> NoteCollection<S> {
    /// Load the snapshot from `store`, falling back to an empty collection.
    pub fn load(store: S) -> Self {
        let notes = read_snapshot(&store);
        tracing::debug!(count = notes.len(), "loaded notes snapshot");
        Self {
            store,
            notes,
            ids: IdGenerator::new(),
            clock: Box::new(SystemClock),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Current local time rendered with the configured datetime format.
    pub fn now_string(&self) -> String {
        format_timestamp(self.clock.now(), &self.datetime_format)
    }

    /// Commit a form: update in place when its id exists, otherwise prepend.
    pub fn save(&mut self, form: &FormState) -> Result<Note> {
        let id = match form.id {
            Some(id) => id,
            None => {
                let now_ms = self.clock.now().timestamp_millis();
                let existing: Vec<NoteId> = self.notes.iter().map(|n| n.id).collect();
                let id = self.ids.issue(now_ms, &existing);
                tracing::debug!(id, "generated note id");
                id
            }
        };
        let datetime = if form.datetime.is_empty() {
            self.now_string()
        } else {
            form.datetime.clone()
        };

        let note = Note {
            id,
            datetime,
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            notes: form.notes.trim().to_string(),
        };

        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(existing) => *existing = note.clone(),
            None => self.notes.insert(0, note.clone()),
        }

        self.persist()?;
        Ok(note)
    }

    pub fn load_for_edit(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Remove the note with `id`. Returns the removed note, if any.
    pub fn delete(&mut self, id: NoteId) -> Result<Option<Note>> {
        let removed = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .map(|pos| self.notes.remove(pos));
        self.persist()?;
        Ok(removed)
    }

    /// Drop every note. Returns how many were removed.
    pub fn clear_all(&mut self) -> Result<usize> {
        let count = self.notes.len();
        self.notes.clear();
        self.persist()?;
        Ok(count)
    }

    /// Case-insensitive substring search across all text fields.
    pub fn filter(&self, query: &str) -> Vec<Note> {
        if query.trim().is_empty() {
            return self.notes.clone();
        }
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|n| n.matches(&needle))
            .cloned()
            .collect()
    }

    fn persist(&mut self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.notes)?;
        self.store.set(STORAGE_KEY, &bytes)?;
        tracing::debug!(count = self.notes.len(), "persisted notes snapshot");
        Ok(())
    }
}

fn read_snapshot<S: KeyValueStore>(store: &S) -> Vec<Note> {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(%err, "could not read notes snapshot, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(notes) => notes,
        Err(err) => {
            tracing::warn!(%err, "notes snapshot is corrupt, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotesError;
    use crate::form::FormField;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use chrono::TimeZone;

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2025, 3, 14, 9, 5, 7).unwrap())
    }

    fn empty() -> NoteCollection<InMemoryStore> {
        NoteCollection::load(InMemoryStore::new()).with_clock(clock())
    }

    fn form(name: &str) -> FormState {
        let mut form = FormState::new();
        form.set(FormField::Name, name);
        form
    }

    fn stored(collection: &NoteCollection<InMemoryStore>) -> Vec<Note> {
        serde_json::from_slice(collection.store().raw(STORAGE_KEY).unwrap()).unwrap()
    }

    #[test]
    fn fresh_saves_prepend() {
        let mut c = empty();
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            c.save(&form(name)).unwrap();
            assert_eq!(c.len(), i + 1);
            assert_eq!(c.notes()[0].name, *name);
        }
        let names: Vec<_> = c.notes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn rapid_saves_get_distinct_ids() {
        let mut c = empty();
        let a = c.save(&form("A")).unwrap();
        let b = c.save(&form("B")).unwrap();
        let d = c.save(&form("D")).unwrap();
        assert_eq!(a.id, clock().now().timestamp_millis());
        assert_eq!(b.id, a.id + 1);
        assert_eq!(d.id, a.id + 2);
    }

    #[test]
    fn save_with_existing_id_updates_in_place() {
        let mut c = empty();
        c.save(&form("A")).unwrap();
        let b = c.save(&form("B")).unwrap();
        c.save(&form("C")).unwrap();

        let mut edit = FormState::from(&b);
        edit.set(FormField::Notes, "  updated  ");
        c.save(&edit).unwrap();

        assert_eq!(c.len(), 3);
        assert_eq!(c.notes()[1].id, b.id);
        assert_eq!(c.notes()[1].notes, "updated");
        assert_eq!(c.notes()[1].datetime, b.datetime);
    }

    #[test]
    fn save_with_unknown_id_prepends_with_that_id() {
        let mut c = empty();
        c.save(&form("A")).unwrap();
        let mut f = form("B");
        f.id = Some(7);
        let saved = c.save(&f).unwrap();
        assert_eq!(saved.id, 7);
        assert_eq!(c.notes()[0].id, 7);
    }

    #[test]
    fn save_trims_text_and_defaults_datetime() {
        let mut c = empty();
        let mut f = FormState::new();
        f.set(FormField::Name, "  Alex  ");
        f.set(FormField::Phone, "\t555 ");
        f.set(FormField::Email, " a@x.com\n");
        f.set(FormField::Notes, "  hi ");
        let note = c.save(&f).unwrap();

        assert_eq!(note.name, "Alex");
        assert_eq!(note.phone, "555");
        assert_eq!(note.email, "a@x.com");
        assert_eq!(note.notes, "hi");
        assert_eq!(note.datetime, "3/14/2025, 9:05:07 AM");
    }

    #[test]
    fn explicit_datetime_is_kept_verbatim() {
        let mut c = empty();
        let mut f = form("A");
        f.set(FormField::Datetime, " yesterday ");
        assert_eq!(c.save(&f).unwrap().datetime, " yesterday ");
    }

    #[test]
    fn custom_datetime_format() {
        let mut c = empty().with_datetime_format("%Y-%m-%d %H:%M");
        assert_eq!(c.save(&form("A")).unwrap().datetime, "2025-03-14 09:05");
    }

    #[test]
    fn every_mutation_writes_full_snapshot() {
        let mut c = empty();
        let a = c.save(&form("A")).unwrap();
        c.save(&form("B")).unwrap();
        assert_eq!(stored(&c), c.notes());

        c.delete(a.id).unwrap();
        assert_eq!(stored(&c), c.notes());
        assert_eq!(stored(&c).len(), 1);

        c.clear_all().unwrap();
        assert_eq!(c.store().raw(STORAGE_KEY).unwrap(), b"[]");
    }

    #[test]
    fn reload_round_trips() {
        let mut c = empty();
        c.save(&form("A")).unwrap();
        c.save(&form("B")).unwrap();
        let before = c.notes().to_vec();

        let bytes = c.store().raw(STORAGE_KEY).unwrap().to_vec();
        let mut store = InMemoryStore::new();
        store.insert_raw(STORAGE_KEY, bytes);
        let reloaded = NoteCollection::load(store);
        assert_eq!(reloaded.notes(), before.as_slice());
    }

    #[test]
    fn corrupt_or_missing_snapshot_loads_empty() {
        assert!(NoteCollection::load(InMemoryStore::new()).is_empty());

        let mut store = InMemoryStore::new();
        store.insert_raw(STORAGE_KEY, "{not json");
        assert!(NoteCollection::load(store).is_empty());

        let mut store = InMemoryStore::new();
        store.insert_raw(STORAGE_KEY, r#"{"id": 1}"#);
        assert!(NoteCollection::load(store).is_empty());
    }

    #[test]
    fn fixture_snapshot_loads_in_order() {
        let c = NoteCollection::load(StoreFixture::new().with_notes(3).build());
        let names: Vec<_> = c.notes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Contact 3", "Contact 2", "Contact 1"]);
    }

    #[test]
    fn ids_stay_above_loaded_notes() {
        let store = StoreFixture::new()
            .with_note(Note {
                id: i64::MAX - 10,
                datetime: String::new(),
                name: "Future".into(),
                phone: String::new(),
                email: String::new(),
                notes: String::new(),
            })
            .build();
        let mut c = NoteCollection::load(store).with_clock(clock());
        assert_eq!(c.save(&form("A")).unwrap().id, i64::MAX - 9);
    }

    #[test]
    fn save_next_to_max_id_still_prepends() {
        let store = StoreFixture::new()
            .with_note(Note {
                id: i64::MAX,
                datetime: String::new(),
                name: "Imported".into(),
                phone: String::new(),
                email: String::new(),
                notes: String::new(),
            })
            .build();
        let mut c = NoteCollection::load(store).with_clock(clock());

        let a = c.save(&form("A")).unwrap();
        let b = c.save(&form("B")).unwrap();
        assert_eq!(a.id, clock().now().timestamp_millis());
        assert_ne!(b.id, a.id);
        assert_ne!(b.id, i64::MAX);

        let names: Vec<_> = c.notes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "Imported"]);
        assert_eq!(stored(&c).len(), 3);
    }

    #[test]
    fn load_for_edit_does_not_mutate() {
        let c = NoteCollection::load(StoreFixture::new().with_notes(2).build());
        let id = c.notes()[1].id;
        assert_eq!(c.load_for_edit(id).unwrap().name, "Contact 1");
        assert!(c.load_for_edit(12345).is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut c = NoteCollection::load(StoreFixture::new().with_notes(2).build());
        assert!(c.delete(12345).unwrap().is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn filter_blank_returns_everything() {
        let c = NoteCollection::load(StoreFixture::new().with_notes(3).build());
        assert_eq!(c.filter(""), c.notes());
        assert_eq!(c.filter("   "), c.notes());
    }

    #[test]
    fn filter_matches_any_field_case_insensitively() {
        let mut c = empty();
        c.save(&form("Alex")).unwrap();
        let mut bo = form("Bo");
        bo.set(FormField::Email, "alex@x.com");
        c.save(&bo).unwrap();
        c.save(&form("Cy")).unwrap();

        let hits = c.filter("ALEX");
        let names: Vec<_> = hits.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Bo", "Alex"]);

        assert_eq!(c.filter("2025").len(), 3);
        assert!(c.filter("zzz").is_empty());
    }

    #[test]
    fn write_failure_is_reported() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        let mut c = NoteCollection::load(store);
        let err = c.save(&form("A")).unwrap_err();
        assert!(matches!(err, NotesError::Store(_)));
    }

    #[test]
    fn id_generator_uses_clock_when_ahead() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.issue(100, &[]), 100);
        assert_eq!(ids.issue(100, &[100]), 101);
        assert_eq!(ids.issue(500, &[101]), 500);
        assert_eq!(ids.issue(200, &[]), 501);
    }

    #[test]
    fn id_generator_searches_down_past_max() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.issue(100, &[i64::MAX]), 100);
        assert_eq!(ids.issue(100, &[i64::MAX, 100]), i64::MAX - 1);
        assert_eq!(ids.issue(100, &[i64::MAX, i64::MAX - 1, 100]), i64::MAX - 2);
    }
}
