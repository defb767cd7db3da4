//! Key-value store persisted as a single JSON object on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{normalize_key, storage_error, KeyValueStore};
use crate::Result;

/// File-backed store holding every key in one JSON object.
///
/// A missing or blank file reads as an empty store. Writes land in a sibling
/// `.tmp` file first and are renamed over the target, so a crash mid-write
/// leaves the previous document in place. All access through clones of the
/// same store is serialized.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => return Err(error.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(storage_error(
                "read",
                &self.path.display().to_string(),
                "document root is not a JSON object",
            )),
        }
    }

    async fn write_document(&self, document: Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let payload = serde_json::to_vec_pretty(&Value::Object(document))?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, payload).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let key = normalize_key(key)?;
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let key = normalize_key(key)?;
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        self.write_document(document).await?;
        tracing::debug!("Wrote key '{}' to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("notes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = JsonFileStore::new(&path);

        store.set("notes", json!([{"id": 1}])).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get("notes").await.unwrap(),
            Some(json!([{"id": 1}]))
        );
        assert!(!store.temp_path().exists());
        assert_eq!(store.path(), path.as_path());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn set_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        store.set("notes", json!([])).await.unwrap();

        assert_eq!(store.get("theme").await.unwrap(), Some(json!("dark")));
        assert_eq!(store.get("notes").await.unwrap(), Some(json!([])));
    }

    #[tokio::test]
    async fn blank_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "  \n").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("notes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_object_document_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("notes").await, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn malformed_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get("notes").await,
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let store = JsonFileStore::new("/data/popnote/storage.json");
        assert_eq!(
            store.temp_path(),
            PathBuf::from("/data/popnote/storage.json.tmp")
        );
    }
}
