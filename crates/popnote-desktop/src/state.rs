//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use popnote_core::storage::JsonFileStore;
use popnote_core::{EditSession, Note, NotesWidget};

/// The widget as wired up in the desktop app.
pub type PopupWidget = NotesWidget<JsonFileStore>;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Notes widget; all note mutations go through it
    pub widget: Signal<PopupWidget>,
}

impl AppState {
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        self.widget.read().notes().to_vec()
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.widget.read().draft().to_string()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.widget.read().is_loaded()
    }

    #[must_use]
    pub fn editing(&self) -> Option<EditSession> {
        self.widget.read().editing().cloned()
    }
}
