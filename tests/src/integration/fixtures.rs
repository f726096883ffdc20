//! Shared wiring for the integration tests.

use std::sync::Arc;
use std::time::Duration;

use sc_01_protocol_calls::adapters::ScriptedGateway;
use sc_01_protocol_calls::{DelegableProtocolCallUseCase, ExecutionConfig, ReactionRequest};
use sc_02_publication_cache::{
    InMemoryStore, NormalizedStore, PublicationCacheManager, PublicationPresenter,
};
use serde_json::json;
use shared_types::{EntityKey, ProfileId, PublicationId, ReactionType};

pub const PUBLICATION: &str = "0x05-0x2a";
pub const VIEWER: &str = "0x11";

pub type UseCase =
    DelegableProtocolCallUseCase<ScriptedGateway, PublicationPresenter<InMemoryStore>>;

/// A use case over a store holding one post.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<ScriptedGateway>,
    pub presenter: Arc<PublicationPresenter<InMemoryStore>>,
    pub use_case: Arc<UseCase>,
}

impl Harness {
    pub fn new(upvotes: u64, downvotes: u64, reaction: Option<ReactionType>) -> Self {
        Self::with_config(upvotes, downvotes, reaction, ExecutionConfig::default())
    }

    pub fn with_config(
        upvotes: u64,
        downvotes: u64,
        reaction: Option<ReactionType>,
        config: ExecutionConfig,
    ) -> Self {
        let store = Arc::new(InMemoryStore::new());
        store.write_fragment(
            &EntityKey::new("Post", PUBLICATION),
            json!({
                "__typename": "Post",
                "id": PUBLICATION,
                "metadata": { "content": "gm frens" },
                "stats": {
                    "totalUpvotes": upvotes,
                    "totalDownvotes": downvotes,
                    "totalAmountOfComments": 0,
                    "totalAmountOfCollects": 0,
                    "totalAmountOfMirrors": 7
                },
                "reaction": reaction,
                "hasCollectedByMe": false
            }),
        );

        let gateway = Arc::new(ScriptedGateway::confirming());
        let presenter = Arc::new(PublicationPresenter::new(store.clone()));
        let use_case = Arc::new(
            DelegableProtocolCallUseCase::new(gateway.clone(), presenter.clone(), config)
                .expect("valid execution config"),
        );

        Self {
            store,
            gateway,
            presenter,
            use_case,
        }
    }

    pub fn cache(&self) -> PublicationCacheManager<InMemoryStore> {
        PublicationCacheManager::new(self.store.clone())
    }

    /// (upvotes, downvotes, reaction) of the seeded post.
    pub fn reaction_state(&self) -> (u64, u64, Option<ReactionType>) {
        let snapshot = self
            .cache()
            .read(&PublicationId::new(PUBLICATION))
            .expect("seeded post is cached");
        (
            snapshot.stats.total_upvotes,
            snapshot.stats.total_downvotes,
            snapshot.reaction,
        )
    }

    /// Raw store entry of the seeded post.
    pub fn raw_entry(&self) -> serde_json::Value {
        self.store
            .read_fragment(&EntityKey::new("Post", PUBLICATION))
            .expect("seeded post is cached")
    }

    /// Yields until the gateway has seen `count` calls.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.gateway.call_count() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("gateway calls arrived in time");
    }
}

pub fn reaction(reaction_type: ReactionType) -> ReactionRequest {
    ReactionRequest {
        profile_id: ProfileId::new(VIEWER),
        publication_id: PublicationId::new(PUBLICATION),
        reaction_type,
        delegate: true,
    }
}
