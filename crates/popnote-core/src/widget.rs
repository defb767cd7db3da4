//! Notes widget state
//!
//! The whole behaviour of the notes popup: the note list, the draft input,
//! and the single inline edit session. Every change to the note list is
//! written through to the note store, when one is attached.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::models::{sort_newest_first, Note, NoteId};
use crate::storage::{KeyValueStore, NoteStore};
use crate::Result;

/// The note currently being edited inline and its unsaved text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: NoteId,
    pub text: String,
}

/// State machine behind the notes popup.
///
/// Operations never fail from the caller's point of view: invalid input and
/// storage trouble leave the prior state intact and are only logged.
///
/// A widget with a store ignores note mutations until its initial load has
/// finished, so nothing added early can be overwritten by the stored list.
pub struct NotesWidget<S: KeyValueStore> {
    notes: Vec<Note>,
    draft: String,
    editing: Option<EditSession>,
    store: Option<NoteStore<S>>,
    clock: Arc<dyn Clock>,
    last_id: i64,
    loaded: bool,
}

impl<S: KeyValueStore> NotesWidget<S> {
    /// Create an empty widget. Without a store, notes live for the session only.
    #[must_use]
    pub fn new(store: Option<NoteStore<S>>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(store: Option<NoteStore<S>>, clock: Arc<dyn Clock>) -> Self {
        if store.is_none() {
            tracing::info!("No storage provider; notes will not outlive this session");
        }
        Self {
            notes: Vec::new(),
            draft: String::new(),
            editing: None,
            loaded: store.is_none(),
            store,
            clock,
            last_id: i64::MIN,
        }
    }

    /// Notes, newest first after any add.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<NoteId> {
        self.editing.as_ref().map(|session| session.id)
    }

    #[must_use]
    pub fn is_editing(&self, id: NoteId) -> bool {
        self.editing_id() == Some(id)
    }

    /// Whether changes are written to a storage provider.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Whether the initial load has finished, successfully or not.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn store(&self) -> Option<&NoteStore<S>> {
        self.store.as_ref()
    }

    /// Read the stored list and adopt it.
    ///
    /// Without a store this does nothing. A failed read is logged and leaves
    /// the list as it was.
    pub async fn load(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };

        let result = store.load().await;
        self.finish_load(result);
    }

    /// Complete the initial load with the outcome of [`NoteStore::load`].
    ///
    /// Callers that read the store outside the widget (a UI task holding only
    /// a clone of the store) hand the result back here.
    pub fn finish_load(&mut self, result: Result<Vec<Note>>) {
        match result {
            Ok(notes) => self.apply_loaded(notes),
            Err(error) => {
                tracing::warn!("Failed to load notes, continuing with an empty list: {}", error);
                self.loaded = true;
            }
        }
    }

    /// Replace the list with notes read from storage, verbatim, and write
    /// them back.
    pub fn apply_loaded(&mut self, notes: Vec<Note>) {
        tracing::info!("Loaded {} notes", notes.len());
        self.last_id = notes
            .iter()
            .map(|note| note.id.as_i64())
            .max()
            .unwrap_or(i64::MIN)
            .max(self.last_id);
        self.notes = notes;
        self.loaded = true;
        self.persist();
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Add the current draft as a note.
    pub fn submit_draft(&mut self) -> Option<NoteId> {
        let draft = std::mem::take(&mut self.draft);
        let added = self.add_note(&draft);
        if added.is_none() {
            self.draft = draft;
        }
        added
    }

    /// Add a note with the trimmed `text` and clear the draft.
    ///
    /// Empty or whitespace-only text is ignored and returns `None`, as is
    /// any add made while the initial load is pending.
    pub fn add_note(&mut self, text: &str) -> Option<NoteId> {
        let text = text.trim();
        if text.is_empty() || !self.accepts_changes("add") {
            return None;
        }

        let created = self.clock.now_millis();
        let id = self.next_id(created);
        let note = Note::new(id, text, created);
        tracing::info!("Note added: {}", note.id);

        self.notes.insert(0, note);
        sort_newest_first(&mut self.notes);
        self.draft.clear();
        self.persist();
        Some(id)
    }

    /// Remove the note with `id`. Returns whether a note was removed.
    ///
    /// Deleting the note under edit also ends the edit session.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        if !self.accepts_changes("delete") {
            return false;
        }

        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return false;
        }

        tracing::info!("Note deleted: {}", id);
        if self.is_editing(id) {
            self.editing = None;
        }
        self.persist();
        true
    }

    /// Put the note with `id` into edit mode, seeded with its current text.
    ///
    /// Any other edit in progress is dropped without saving.
    pub fn start_edit(&mut self, id: NoteId) -> bool {
        if !self.accepts_changes("edit") {
            return false;
        }

        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };

        if let Some(previous) = self.editing.as_ref().filter(|session| session.id != id) {
            tracing::debug!("Abandoning unsaved edit of note {}", previous.id);
        }
        self.editing = Some(EditSession {
            id,
            text: note.text.clone(),
        });
        true
    }

    /// Update the unsaved text of the active edit session.
    pub fn set_edit_draft(&mut self, text: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.text = text.into();
        }
    }

    /// Store the edit draft as the text of note `id` and leave edit mode.
    ///
    /// The text is stored exactly as typed; unlike [`Self::add_note`] it is
    /// neither trimmed nor checked for emptiness. Order is left untouched.
    /// Returns whether a note was updated.
    pub fn save_edit(&mut self, id: NoteId) -> bool {
        if !self.accepts_changes("save") {
            return false;
        }

        let Some(session) = self.editing.take() else {
            return false;
        };

        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return false;
        };

        note.text = session.text;
        tracing::debug!("Note edited: {}", id);
        self.persist();
        true
    }

    /// Leave edit mode without touching any note.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Wait for all writes enqueued so far to reach the storage provider.
    pub async fn flush(&self) {
        if let Some(store) = &self.store {
            store.flush().await;
        }
    }

    fn accepts_changes(&self, operation: &str) -> bool {
        if !self.loaded {
            tracing::debug!("Ignoring {} before notes have loaded", operation);
        }
        self.loaded
    }

    fn next_id(&mut self, now: i64) -> NoteId {
        let raw = if now > self.last_id {
            now
        } else {
            self.last_id.saturating_add(1)
        };
        self.last_id = raw;
        NoteId::new(raw)
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.save_in_background(self.notes.clone());
        }
    }
}
