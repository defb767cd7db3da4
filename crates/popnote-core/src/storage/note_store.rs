//! Typed note persistence on top of a key-value store.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::{normalize_key, KeyValueStore};
use crate::models::Note;
use crate::{Error, Result};

/// Storage key holding the full note list.
pub const NOTES_KEY: &str = "notes";

enum WriteRequest {
    Save(Vec<Note>),
    Flush(oneshot::Sender<()>),
}

/// Reads the note list and writes it back through a single background writer.
///
/// Background writes are applied one at a time in the order they were
/// enqueued, so the last list handed to [`NoteStore::save_in_background`] is
/// the one left in storage. Clones share the same writer.
#[derive(Clone)]
pub struct NoteStore<S: KeyValueStore> {
    store: S,
    key: Arc<str>,
    writes: mpsc::UnboundedSender<WriteRequest>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Create a note store on the default `notes` key.
    ///
    /// Must be called from inside a tokio runtime, which hosts the writer task.
    pub fn new(store: S) -> Result<Self> {
        Self::with_key(store, NOTES_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Result<Self> {
        let key: Arc<str> = Arc::from(normalize_key(key)?);
        let runtime = tokio::runtime::Handle::try_current().map_err(|error| {
            Error::Runtime(format!("note writer needs a tokio runtime: {error}"))
        })?;

        let (writes, requests) = mpsc::unbounded_channel();
        runtime.spawn(run_writer(store.clone(), Arc::clone(&key), requests));

        Ok(Self { store, key, writes })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored note list, or an empty list when nothing is stored.
    ///
    /// The stored order is kept as-is.
    pub async fn load(&self) -> Result<Vec<Note>> {
        match self.store.get(&self.key).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Enqueue a full-list write without waiting for it.
    ///
    /// Failures are logged by the writer and otherwise dropped.
    pub fn save_in_background(&self, notes: Vec<Note>) {
        if self.writes.send(WriteRequest::Save(notes)).is_err() {
            tracing::warn!("Note writer has stopped; dropping write for '{}'", self.key);
        }
    }

    /// Wait until every write enqueued before this call has been attempted.
    pub async fn flush(&self) {
        let (done, finished) = oneshot::channel();
        if self.writes.send(WriteRequest::Flush(done)).is_ok() {
            let _ = finished.await;
        }
    }
}

async fn write_notes<S: KeyValueStore>(store: &S, key: &str, notes: &[Note]) -> Result<()> {
    let value = serde_json::to_value(notes)?;
    store.set(key, value).await?;
    tracing::debug!("Persisted {} notes under '{}'", notes.len(), key);
    Ok(())
}

async fn run_writer<S: KeyValueStore>(
    store: S,
    key: Arc<str>,
    mut requests: mpsc::UnboundedReceiver<WriteRequest>,
) {
    while let Some(request) = requests.recv().await {
        match request {
            WriteRequest::Save(notes) => {
                if let Err(error) = write_notes(&store, &key, &notes).await {
                    tracing::warn!("Failed to persist {} notes: {}", notes.len(), error);
                }
            }
            WriteRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("Note writer for '{}' stopped", key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteId;
    use crate::storage::{JsonFileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::new(NoteId::new(200), "second", 200),
            Note::new(NoteId::new(100), "first", 100),
        ]
    }

    #[test]
    fn new_outside_runtime_is_a_runtime_error() {
        let result = NoteStore::new(MemoryStore::new());
        assert!(matches!(result, Err(Error::Runtime(_))));
    }

    #[tokio::test]
    async fn empty_key_is_rejected() {
        let result = NoteStore::with_key(MemoryStore::new(), "  ");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn load_defaults_to_empty_list() {
        let store = NoteStore::new(MemoryStore::new()).unwrap();
        assert_eq!(store.load().await.unwrap(), Vec::<Note>::new());
    }

    #[tokio::test]
    async fn load_returns_stored_order_verbatim() {
        let backend = MemoryStore::new();
        backend.insert(
            NOTES_KEY,
            json!([
                { "id": 1, "text": "old", "created": 1 },
                { "id": 9, "text": "new", "created": 9 }
            ]),
        );

        let store = NoteStore::new(backend).unwrap();
        assert_eq!(store.key(), NOTES_KEY);
        let notes = store.load().await.unwrap();
        assert_eq!(
            notes,
            vec![
                Note::new(NoteId::new(1), "old", 1),
                Note::new(NoteId::new(9), "new", 9),
            ]
        );
    }

    #[tokio::test]
    async fn load_rejects_malformed_records() {
        let backend = MemoryStore::new();
        backend.insert(NOTES_KEY, json!({ "not": "a list" }));

        let store = NoteStore::new(backend).unwrap();
        assert!(matches!(store.load().await, Err(Error::Serialization(_))));
    }

    #[tokio::test]
    async fn background_writes_land_in_issue_order() {
        let backend = MemoryStore::new();
        let store = NoteStore::new(backend.clone()).unwrap();

        let notes = sample_notes();
        store.save_in_background(Vec::new());
        store.save_in_background(notes[1..].to_vec());
        store.save_in_background(notes.clone());
        store.flush().await;

        assert_eq!(backend.write_count(), 3);
        assert_eq!(store.load().await.unwrap(), notes);
    }

    #[tokio::test]
    async fn saved_list_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = NoteStore::new(JsonFileStore::new(&path)).unwrap();

        store.save_in_background(sample_notes());
        store.flush().await;

        let reopened = NoteStore::new(JsonFileStore::new(&path)).unwrap();
        assert_eq!(reopened.load().await.unwrap(), sample_notes());
    }

    #[tokio::test]
    async fn failed_background_write_does_not_stop_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[]").unwrap();
        let store = NoteStore::new(JsonFileStore::new(&path)).unwrap();

        store.save_in_background(sample_notes());
        store.flush().await;
        assert!(store.load().await.is_err());

        std::fs::remove_file(&path).unwrap();
        store.save_in_background(sample_notes());
        store.flush().await;
        assert_eq!(store.load().await.unwrap(), sample_notes());
    }
}
