//! Key-value storage providers and the note store built on top of them.

mod json_file;
mod memory;
mod note_store;

use std::future::Future;

use serde_json::Value;

use crate::{Error, Result};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use note_store::{NoteStore, NOTES_KEY};

/// Asynchronous key-value persistence shared across storage backends.
///
/// Values are whole JSON documents; there is no partial-update mode. A
/// missing key reads as `Ok(None)` so callers can substitute their default.
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Value>>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: Value) -> impl Future<Output = Result<()>> + Send;
}

fn normalize_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidInput("storage key cannot be empty".to_string()));
    }
    Ok(key)
}

fn storage_error(operation: &str, target: &str, error: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{operation} failed for {target}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_trims_and_rejects_empty() {
        assert_eq!(normalize_key(" notes ").unwrap(), "notes");
        assert!(matches!(normalize_key("   "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn storage_error_names_operation_and_target() {
        let error = storage_error("read", "/tmp/storage.json", "boom");
        assert_eq!(
            error.to_string(),
            "Storage error: read failed for /tmp/storage.json: boom"
        );
    }
}
