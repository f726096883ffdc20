//! Reaction presenter.
//!
//! Keeps the viewer's reaction and the reaction counters of a cached
//! publication consistent. Every operation is one read-modify-write against
//! the latest snapshot, so a switch between reactions is never observable
//! half-applied.
//!
//! Applied transitions stay tracked per publication until their call
//! settles. The newest one owns the cached reaction; a failure only writes
//! when it hits the owner, and then restores what the remaining calls (or
//! the last confirmed reaction) imply.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sc_01_protocol_calls::ReactionRequest;
use shared_types::{PublicationId, ReactionType};
use tracing::debug;

use crate::cache_manager::PublicationCacheManager;
use crate::domain::{AppliedReaction, CacheError, PublicationSnapshot, ReactionTransition};
use crate::ports::NormalizedStore;

/// Unsettled transitions on one publication.
#[derive(Debug, Default)]
struct InFlight {
    /// Reaction to show once every tracked call has failed.
    base: Option<ReactionType>,
    /// `(sequence, target)` in application order.
    targets: Vec<(u64, Option<ReactionType>)>,
}

impl InFlight {
    fn position(&self, sequence: u64) -> Option<usize> {
        self.targets.iter().position(|(s, _)| *s == sequence)
    }

    fn restore_target(&self) -> Option<ReactionType> {
        self.targets.last().map_or(self.base, |(_, to)| *to)
    }
}

pub struct ReactionPresenter<S: NormalizedStore> {
    cache: PublicationCacheManager<S>,
    in_flight: Mutex<HashMap<PublicationId, InFlight>>,
    next_sequence: AtomicU64,
}

impl<S: NormalizedStore> ReactionPresenter<S> {
    pub fn new(cache: PublicationCacheManager<S>) -> Self {
        Self {
            cache,
            in_flight: Mutex::new(HashMap::new()),
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Sets the requested reaction, replacing any other one.
    pub fn add(&self, request: &ReactionRequest) -> Result<AppliedReaction, CacheError> {
        let requested = request.reaction_type;
        self.transition(&request.publication_id, |snapshot| {
            ReactionTransition::add(snapshot, requested)
        })
    }

    /// Clears the viewer's reaction.
    pub fn remove(&self, request: &ReactionRequest) -> Result<AppliedReaction, CacheError> {
        self.transition(&request.publication_id, ReactionTransition::remove)
    }

    /// The call behind `applied` succeeded; its target becomes the reaction
    /// to fall back to. Older transitions no longer matter.
    pub fn confirm(&self, applied: &AppliedReaction) {
        let id = &applied.transition.publication_id;
        let mut in_flight = self.in_flight.lock();

        let settled = match in_flight.get_mut(id) {
            Some(entry) => {
                if let Some(pos) = entry.position(applied.sequence) {
                    entry.targets.drain(..=pos);
                    entry.base = applied.transition.to;
                }
                entry.targets.is_empty()
            }
            None => false,
        };
        if settled {
            in_flight.remove(id);
        }
    }

    /// The call behind `applied` failed.
    ///
    /// Returns whether the cache was written. A transition superseded by a
    /// later one hands its starting point to that one instead.
    pub fn revert(&self, applied: &AppliedReaction) -> Result<bool, CacheError> {
        let id = &applied.transition.publication_id;
        let mut in_flight = self.in_flight.lock();

        let Some(entry) = in_flight.get_mut(id) else {
            debug!(publication_id = %id, "reaction already settled by a later call");
            return Ok(false);
        };
        let Some(pos) = entry.position(applied.sequence) else {
            debug!(publication_id = %id, "reaction already settled by a later call");
            return Ok(false);
        };

        let owner = pos + 1 == entry.targets.len();
        entry.targets.remove(pos);
        let restore = entry.restore_target();
        if entry.targets.is_empty() {
            in_flight.remove(id);
        }

        if !owner {
            debug!(publication_id = %id, "later reaction in flight, revert deferred to it");
            return Ok(false);
        }

        let compensation = ReactionTransition {
            publication_id: id.clone(),
            from: applied.transition.to,
            to: restore,
        };
        if compensation.is_noop() {
            return Ok(false);
        }

        let mut reverted = false;
        self.cache.update(id, |mut snapshot| {
            if snapshot.reaction == compensation.from {
                compensation.apply(&mut snapshot);
                reverted = true;
            }
            snapshot
        })?;

        if !reverted {
            debug!(publication_id = %id, "reaction written elsewhere, revert skipped");
        }
        Ok(reverted)
    }

    fn transition<T>(&self, id: &PublicationId, compute: T) -> Result<AppliedReaction, CacheError>
    where
        T: FnOnce(&PublicationSnapshot) -> ReactionTransition,
    {
        // Held across the write so tracking order matches cache order.
        let mut in_flight = self.in_flight.lock();

        let mut computed = None;
        self.cache.update(id, |mut snapshot| {
            let transition = compute(&snapshot);
            transition.apply(&mut snapshot);
            computed = Some(transition);
            snapshot
        })?;
        let transition = computed.ok_or_else(|| CacheError::PublicationNotFound(id.clone()))?;

        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let entry = in_flight.entry(id.clone()).or_default();
        if entry.targets.is_empty() {
            entry.base = transition.from;
        }
        entry.targets.push((sequence, transition.to));

        Ok(AppliedReaction {
            sequence,
            transition,
        })
    }
}
