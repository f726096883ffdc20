//! # Publication Presenter
//!
//! Plugs the cache presenters into the protocol-call use case. One value of
//! `OptimisticUpdate` travels from `apply_optimistic` to either `confirm` or
//! `revert`. `present` and `present_settlement` publish results to UI
//! subscribers.

use std::sync::Arc;

use sc_01_protocol_calls::{
    ProtocolCall, ProtocolCallError, ProtocolCallPresenter, TransactionOutcome,
};
use sc_telemetry::{metric_inc, OPTIMISTIC_UPDATES};
use shared_types::{PublicationId, TransactionKind};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{CollectPresenter, CommentPresenter, ReactionPresenter};
use crate::cache_manager::PublicationCacheManager;
use crate::domain::{CacheError, OptimisticUpdate};
use crate::ports::NormalizedStore;

/// Capacity of the presented-results channel.
pub const RESULT_CHANNEL_CAPACITY: usize = 256;

/// What the UI learns once a protocol call finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedResult {
    pub kind: TransactionKind,
    pub publication_id: Option<PublicationId>,
    pub result: Result<TransactionOutcome, ProtocolCallError>,
}

/// `ProtocolCallPresenter` over the publication cache.
pub struct PublicationPresenter<S: NormalizedStore> {
    cache: PublicationCacheManager<S>,
    reactions: ReactionPresenter<S>,
    comments: CommentPresenter<S>,
    collects: CollectPresenter<S>,
    results: broadcast::Sender<PresentedResult>,
}

impl<S: NormalizedStore> PublicationPresenter<S> {
    pub fn new(store: Arc<S>) -> Self {
        let cache = PublicationCacheManager::new(store);
        let (results, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
        Self {
            reactions: ReactionPresenter::new(cache.clone()),
            comments: CommentPresenter::new(cache.clone()),
            collects: CollectPresenter::new(cache.clone()),
            cache,
            results,
        }
    }

    /// Results of every call presented from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PresentedResult> {
        self.results.subscribe()
    }

    pub fn cache(&self) -> &PublicationCacheManager<S> {
        &self.cache
    }

    fn publish(
        &self,
        kind: TransactionKind,
        target: Option<&PublicationId>,
        result: &Result<TransactionOutcome, ProtocolCallError>,
    ) {
        match result {
            Ok(outcome) => {
                info!(%kind, outcome = outcome.label(), "protocol call presented");
            }
            Err(err) => warn!(%kind, error = %err, "protocol call failed"),
        }

        // Nobody listening is fine.
        let _ = self.results.send(PresentedResult {
            kind,
            publication_id: target.cloned(),
            result: result.clone(),
        });
    }

    fn apply(&self, call: &ProtocolCall) -> Option<Result<OptimisticUpdate, CacheError>> {
        let kind = call.kind();
        let update = match call {
            ProtocolCall::CreatePost(_) => return None,
            ProtocolCall::CreateComment(r) => {
                self.comments.add(&r.publication_id).map(OptimisticUpdate::Comment)
            }
            ProtocolCall::CollectPublication(r) => self
                .collects
                .collect(&r.publication_id)
                .map(OptimisticUpdate::Collect),
            ProtocolCall::AddReaction(r) => self
                .reactions
                .add(r)
                .map(|applied| OptimisticUpdate::Reaction { kind, applied }),
            ProtocolCall::RemoveReaction(r) => self
                .reactions
                .remove(r)
                .map(|applied| OptimisticUpdate::Reaction { kind, applied }),
        };
        Some(update)
    }
}

impl<S: NormalizedStore> ProtocolCallPresenter for PublicationPresenter<S> {
    type Optimistic = OptimisticUpdate;

    fn apply_optimistic(&self, call: &ProtocolCall) -> Option<OptimisticUpdate> {
        let kind = call.kind();
        match self.apply(call)? {
            Ok(update) => {
                metric_inc!(OPTIMISTIC_UPDATES, &[kind.as_str(), "applied"]);
                debug!(
                    %kind,
                    publication_id = %update.publication_id(),
                    "optimistic update applied"
                );
                Some(update)
            }
            Err(err) => {
                // The UI has not loaded this publication; nothing to keep in sync.
                metric_inc!(OPTIMISTIC_UPDATES, &[kind.as_str(), "skipped"]);
                warn!(%kind, error = %err, "optimistic update skipped");
                None
            }
        }
    }

    fn confirm(&self, update: OptimisticUpdate) {
        if let OptimisticUpdate::Reaction { applied, .. } = &update {
            self.reactions.confirm(applied);
        }
        metric_inc!(OPTIMISTIC_UPDATES, &[update.kind().as_str(), "confirmed"]);
        debug!(
            kind = %update.kind(),
            publication_id = %update.publication_id(),
            "optimistic update confirmed"
        );
    }

    fn revert(&self, update: OptimisticUpdate) {
        let kind = update.kind();
        let result = match &update {
            OptimisticUpdate::Reaction { applied, .. } => self.reactions.revert(applied),
            OptimisticUpdate::Comment(delta) => self.comments.revert(delta).map(|()| true),
            OptimisticUpdate::Collect(delta) => self.collects.revert(delta).map(|()| true),
        };

        let action = match result {
            Ok(true) => "reverted",
            Ok(false) => "skipped",
            Err(err) => {
                warn!(
                    %kind,
                    publication_id = %update.publication_id(),
                    error = %err,
                    "revert failed"
                );
                "skipped"
            }
        };
        metric_inc!(OPTIMISTIC_UPDATES, &[kind.as_str(), action]);
    }

    fn present(&self, call: &ProtocolCall, result: &Result<TransactionOutcome, ProtocolCallError>) {
        self.publish(call.kind(), call.target(), result);
    }

    fn present_settlement(
        &self,
        kind: TransactionKind,
        target: Option<&PublicationId>,
        result: &Result<TransactionOutcome, ProtocolCallError>,
    ) {
        self.publish(kind, target, result);
    }
}
