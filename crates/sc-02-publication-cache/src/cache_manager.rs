//! # Cache Managers
//!
//! Typed access to the normalized store. `CacheManager` reads and writes any
//! `Fragment`; `PublicationCacheManager` resolves a bare `PublicationId` to
//! whichever publication typename holds it.
//!
//! Writes never create entities: the optimistic layer only adjusts snapshots
//! the UI already loaded, so stats are never fabricated.

use std::sync::Arc;

use serde_json::Value;
use shared_types::{EntityKey, PublicationId};

use crate::domain::{CacheError, Fragment, PublicationSnapshot, PUBLICATION_TYPENAMES};
use crate::ports::NormalizedStore;

/// Fragment reads and read-modify-write updates over a store.
pub struct CacheManager<S: NormalizedStore> {
    store: Arc<S>,
}

impl<S: NormalizedStore> Clone for CacheManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: NormalizedStore> CacheManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn identify(&self, typename: &str, id: &str) -> EntityKey {
        self.store.identify(typename, id)
    }

    /// Reads the entry under `key` as `F`.
    pub fn read<F: Fragment>(&self, key: &EntityKey) -> Result<F, CacheError> {
        let value = self
            .store
            .read_fragment(key)
            .ok_or_else(|| CacheError::NotFound(key.clone()))?;
        F::from_value(key, value)
    }

    /// Replaces the `F` view of `key` with `updater(current)`, atomically.
    ///
    /// Concurrent writes to the same key are serialized; each updater sees
    /// the result of the previous one.
    pub fn write<F, U>(&self, key: &EntityKey, updater: U) -> Result<F, CacheError>
    where
        F: Fragment,
        U: FnOnce(F) -> F,
    {
        let merged = self.store.update_fragment(
            key,
            Box::new(|current: &Value| {
                let fragment = F::from_value(key, current.clone())?;
                updater(fragment).to_value(key)
            }),
        )?;
        F::from_value(key, merged)
    }
}

/// Publication snapshots addressed by id alone.
pub struct PublicationCacheManager<S: NormalizedStore> {
    cache: CacheManager<S>,
}

impl<S: NormalizedStore> Clone for PublicationCacheManager<S> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}

impl<S: NormalizedStore> PublicationCacheManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            cache: CacheManager::new(store),
        }
    }

    /// Key under which `id` is cached, trying post, comment, then mirror.
    pub fn resolve(&self, id: &PublicationId) -> Result<EntityKey, CacheError> {
        PUBLICATION_TYPENAMES
            .iter()
            .map(|typename| self.cache.identify(typename, id.as_str()))
            .find(|key| self.cache.store().read_fragment(key).is_some())
            .ok_or_else(|| CacheError::PublicationNotFound(id.clone()))
    }

    pub fn read(&self, id: &PublicationId) -> Result<PublicationSnapshot, CacheError> {
        let key = self.resolve(id)?;
        self.cache.read(&key)
    }

    pub fn update<U>(
        &self,
        id: &PublicationId,
        updater: U,
    ) -> Result<PublicationSnapshot, CacheError>
    where
        U: FnOnce(PublicationSnapshot) -> PublicationSnapshot,
    {
        let key = self.resolve(id)?;
        self.cache.write(&key, updater)
    }
}
