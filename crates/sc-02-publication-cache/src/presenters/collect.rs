//! Collect presenter: optimistic collect count and `hasCollectedByMe`.

use shared_types::PublicationId;

use crate::cache_manager::PublicationCacheManager;
use crate::domain::{CacheError, CollectDelta};
use crate::ports::NormalizedStore;

pub struct CollectPresenter<S: NormalizedStore> {
    cache: PublicationCacheManager<S>,
}

impl<S: NormalizedStore> CollectPresenter<S> {
    pub fn new(cache: PublicationCacheManager<S>) -> Self {
        Self { cache }
    }

    pub fn collect(&self, publication_id: &PublicationId) -> Result<CollectDelta, CacheError> {
        let mut applied = None;
        self.cache.update(publication_id, |mut snapshot| {
            let delta = CollectDelta::new(&snapshot);
            delta.apply(&mut snapshot);
            applied = Some(delta);
            snapshot
        })?;
        applied.ok_or_else(|| CacheError::PublicationNotFound(publication_id.clone()))
    }

    /// Restores the count and the flag as they were before `collect`.
    pub fn revert(&self, delta: &CollectDelta) -> Result<(), CacheError> {
        self.cache.update(&delta.publication_id, |mut snapshot| {
            delta.undo(&mut snapshot);
            snapshot
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::domain::PublicationSnapshot;
    use shared_types::EntityKey;
    use std::sync::Arc;

    #[test]
    fn test_collect_then_revert() {
        let store = Arc::new(InMemoryStore::new());
        let mut seed = PublicationSnapshot::post("0x01-0x01");
        seed.typename = "Comment".into();
        store.write_fragment(
            &EntityKey::new("Comment", "0x01-0x01"),
            serde_json::to_value(&seed).unwrap(),
        );

        let cache = PublicationCacheManager::new(store);
        let presenter = CollectPresenter::new(cache.clone());
        let id = PublicationId::new("0x01-0x01");

        let delta = presenter.collect(&id).unwrap();
        assert!(!delta.previously_collected);
        let collected = cache.read(&id).unwrap();
        assert!(collected.has_collected_by_me);
        assert_eq!(collected.stats.total_amount_of_collects, 1);

        presenter.revert(&delta).unwrap();
        let restored = cache.read(&id).unwrap();
        assert!(!restored.has_collected_by_me);
        assert_eq!(restored.stats.total_amount_of_collects, 0);
    }
}
