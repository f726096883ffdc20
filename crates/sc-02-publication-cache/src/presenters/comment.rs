//! Comment presenter: optimistic comment count on the commented publication.

use shared_types::PublicationId;

use crate::cache_manager::PublicationCacheManager;
use crate::domain::{CacheError, CommentDelta};
use crate::ports::NormalizedStore;

pub struct CommentPresenter<S: NormalizedStore> {
    cache: PublicationCacheManager<S>,
}

impl<S: NormalizedStore> CommentPresenter<S> {
    pub fn new(cache: PublicationCacheManager<S>) -> Self {
        Self { cache }
    }

    pub fn add(&self, publication_id: &PublicationId) -> Result<CommentDelta, CacheError> {
        let delta = CommentDelta {
            publication_id: publication_id.clone(),
        };
        self.cache.update(publication_id, |mut snapshot| {
            delta.apply(&mut snapshot);
            snapshot
        })?;
        Ok(delta)
    }

    pub fn revert(&self, delta: &CommentDelta) -> Result<(), CacheError> {
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
    fn test_add_then_revert() {
        let store = Arc::new(InMemoryStore::new());
        let mut seed = PublicationSnapshot::post("0x01-0x01");
        seed.stats.total_amount_of_comments = 2;
        store.write_fragment(
            &EntityKey::new("Post", "0x01-0x01"),
            serde_json::to_value(&seed).unwrap(),
        );

        let cache = PublicationCacheManager::new(store);
        let presenter = CommentPresenter::new(cache.clone());
        let id = PublicationId::new("0x01-0x01");

        let delta = presenter.add(&id).unwrap();
        assert_eq!(cache.read(&id).unwrap().stats.total_amount_of_comments, 3);

        presenter.revert(&delta).unwrap();
        assert_eq!(cache.read(&id).unwrap().stats.total_amount_of_comments, 2);
    }
}
