//! Outbound (Driven) port: the normalized store.
//!
//! The store holds one JSON entry per `EntityKey`. Entries are written as
//! fragments and merged field by field into what is already there.

use serde_json::Value;
use shared_types::EntityKey;

use crate::domain::CacheError;

/// Read-modify-write closure run by `update_fragment`.
pub type FragmentUpdate<'a> = Box<dyn FnOnce(&Value) -> Result<Value, CacheError> + 'a>;

/// Normalized entity store.
pub trait NormalizedStore: Send + Sync {
    /// Key of the entity `typename:id`.
    fn identify(&self, typename: &str, id: &str) -> EntityKey {
        EntityKey::new(typename, id)
    }

    /// Current entry, if any.
    fn read_fragment(&self, key: &EntityKey) -> Option<Value>;

    /// Merges `fragment` into the entry, creating it when absent.
    fn write_fragment(&self, key: &EntityKey, fragment: Value);

    /// Atomically derives a fragment from the current entry and merges it.
    ///
    /// `update` runs with the entry locked and must not call back into the
    /// store. Returns the merged entry.
    ///
    /// # Errors
    /// - `NotFound`: no entry under `key`; `update` is not run
    /// - whatever `update` returns; nothing is written
    fn update_fragment(
        &self,
        key: &EntityKey,
        update: FragmentUpdate<'_>,
    ) -> Result<Value, CacheError>;
}

/// Shallow merge: top-level fields of `fragment` replace those of `entry`.
///
/// Non-object fragments replace the entry entirely.
pub fn merge_fragment(entry: &mut Value, fragment: Value) {
    match (entry, fragment) {
        (Value::Object(existing), Value::Object(fields)) => {
            for (name, value) in fields {
                existing.insert(name, value);
            }
        }
        (entry, fragment) => *entry = fragment,
    }
}
