//! In-memory normalized store.
//!
//! Every successful write is announced on a broadcast channel carrying the
//! written key, so views can re-read the entities they display.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;
use shared_types::EntityKey;
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::CacheError;
use crate::ports::{merge_fragment, FragmentUpdate, NormalizedStore};

/// Default capacity of the change channel.
pub const DEFAULT_CHANGE_CAPACITY: usize = 1024;

/// `HashMap` backed store guarded by a single lock.
pub struct InMemoryStore {
    entries: RwLock<HashMap<EntityKey, Value>>,
    changes: broadcast::Sender<EntityKey>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_change_capacity(DEFAULT_CHANGE_CAPACITY)
    }

    pub fn with_change_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity.max(1));
        Self {
            entries: RwLock::new(HashMap::new()),
            changes,
        }
    }

    /// Receives the key of every write from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EntityKey> {
        self.changes.subscribe()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn notify(&self, key: &EntityKey) {
        // No subscribers is not an error.
        let _ = self.changes.send(key.clone());
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizedStore for InMemoryStore {
    fn read_fragment(&self, key: &EntityKey) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn write_fragment(&self, key: &EntityKey, fragment: Value) {
        {
            let mut entries = self.entries.write();
            match entries.get_mut(key) {
                Some(entry) => merge_fragment(entry, fragment),
                None => {
                    entries.insert(key.clone(), fragment);
                }
            }
        }
        trace!(%key, "fragment written");
        self.notify(key);
    }

    fn update_fragment(
        &self,
        key: &EntityKey,
        update: FragmentUpdate<'_>,
    ) -> Result<Value, CacheError> {
        let merged = {
            let mut entries = self.entries.write();
            let entry = entries
                .get_mut(key)
                .ok_or_else(|| CacheError::NotFound(key.clone()))?;
            let fragment = update(&*entry)?;
            merge_fragment(entry, fragment);
            entry.clone()
        };
        trace!(%key, "fragment updated");
        self.notify(key);
        Ok(merged)
    }
}
