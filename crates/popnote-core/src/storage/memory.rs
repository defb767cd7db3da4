//! In-process key-value store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use super::{normalize_key, KeyValueStore};
use crate::Result;

/// Shared in-memory map. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value under `key`, read synchronously.
    #[must_use]
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Number of successful `set` calls served so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Seed a value directly, bypassing the async API.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.lock().insert(key.into(), value);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let key = normalize_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let key = normalize_key(key)?;
        self.lock().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
