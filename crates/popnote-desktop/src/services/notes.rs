//! Notes widget construction for the desktop app

use popnote_core::config::PopnoteConfig;
use popnote_core::storage::{JsonFileStore, NoteStore};

use crate::state::PopupWidget;

/// Build the popup widget for `config`.
///
/// The storage provider is resolved here, once. When storage is disabled,
/// no data directory can be found, or the note writer cannot start, the
/// widget runs session-only.
pub fn open_widget(config: &PopnoteConfig) -> PopupWidget {
    let Some(path) = config.storage_path() else {
        tracing::info!("Storage disabled ({} mode)", config.storage);
        return PopupWidget::new(None);
    };

    let backend = JsonFileStore::new(path);
    tracing::info!("Storing notes in {}", backend.path().display());
    match NoteStore::new(backend) {
        Ok(store) => PopupWidget::new(Some(store)),
        Err(error) => {
            tracing::error!("Failed to open note storage: {}", error);
            PopupWidget::new(None)
        }
    }
}
