//! In-process store used by tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{CollectionStore, StoreError, StoreKey};

const POISONED: &str = "store lock poisoned";

/// Keeps every document in a mutex-guarded map.
///
/// [`CollectionStore::save_all`] applies all entries under a single lock,
/// so readers never observe half of a batch.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Option<MutexGuard<'_, HashMap<StoreKey, String>>> {
        self.entries.lock().ok()
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.guard()
            .map(|entries| entries.get(&key).cloned())
            .ok_or_else(|| StoreError::read(key.as_str(), POISONED))
    }

    fn save(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .guard()
            .ok_or_else(|| StoreError::write(key.as_str(), POISONED))?;
        entries.insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        let mut entries = self
            .guard()
            .ok_or_else(|| StoreError::remove(key.as_str(), POISONED))?;
        entries.remove(&key);
        Ok(())
    }

    fn save_all(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError> {
        let Some((first, _)) = entries.first() else {
            return Ok(());
        };
        let mut guard = self
            .guard()
            .ok_or_else(|| StoreError::write(first.as_str(), POISONED))?;
        for (key, value) in entries {
            guard.insert(*key, value.clone());
        }
        Ok(())
    }
}
