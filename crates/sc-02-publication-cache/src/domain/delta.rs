//! # Optimistic Deltas
//!
//! The cache mutation each protocol call implies, computed from the latest
//! snapshot and applied inside a single store update.
//!
//! ## Reaction transitions
//!
//! | Request | Current | Transition | Counters |
//! |---------|---------|------------|----------|
//! | add(R) | none | none → R | +1 R |
//! | add(R) | R | no-op | unchanged |
//! | add(R) | S ≠ R | S → R | −1 S, +1 R in one write |
//! | remove | S | S → none | −1 S |
//! | remove | none | no-op | unchanged |
//!
//! Transitions on one publication stay tracked until their calls settle.
//! A failed call only writes when its transition still owns the cached
//! reaction, and then restores the target of the newest transition still in
//! flight, or the reaction seen before the first of them.

use shared_types::{PublicationId, ReactionType, TransactionKind};

use super::snapshot::PublicationSnapshot;

/// Change of the viewer's reaction on one publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionTransition {
    pub publication_id: PublicationId,
    pub from: Option<ReactionType>,
    pub to: Option<ReactionType>,
}

impl ReactionTransition {
    /// Transition for adding `requested` on top of `snapshot`.
    pub fn add(snapshot: &PublicationSnapshot, requested: ReactionType) -> Self {
        Self {
            publication_id: snapshot.id.clone(),
            from: snapshot.reaction,
            to: Some(requested),
        }
    }

    /// Transition clearing whatever reaction `snapshot` holds.
    pub fn remove(snapshot: &PublicationSnapshot) -> Self {
        Self {
            publication_id: snapshot.id.clone(),
            from: snapshot.reaction,
            to: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    pub fn inverse(&self) -> Self {
        Self {
            publication_id: self.publication_id.clone(),
            from: self.to,
            to: self.from,
        }
    }

    /// Moves the reaction and both counters together.
    pub fn apply(&self, snapshot: &mut PublicationSnapshot) {
        if self.is_noop() {
            return;
        }
        if let Some(previous) = self.from {
            snapshot.stats.decrement_reaction(previous);
        }
        if let Some(next) = self.to {
            snapshot.stats.increment_reaction(next);
        }
        snapshot.reaction = self.to;
    }
}

/// A reaction transition applied to the cache and awaiting its call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedReaction {
    /// Order of application across all publications.
    pub sequence: u64,
    pub transition: ReactionTransition,
}

/// Optimistic comment count bump on the commented publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDelta {
    pub publication_id: PublicationId,
}

impl CommentDelta {
    pub fn apply(&self, snapshot: &mut PublicationSnapshot) {
        snapshot.stats.total_amount_of_comments =
            snapshot.stats.total_amount_of_comments.saturating_add(1);
    }

    pub fn undo(&self, snapshot: &mut PublicationSnapshot) {
        snapshot.stats.total_amount_of_comments =
            snapshot.stats.total_amount_of_comments.saturating_sub(1);
    }
}

/// Optimistic collect, remembering the flag it overwrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectDelta {
    pub publication_id: PublicationId,
    pub previously_collected: bool,
}

impl CollectDelta {
    pub fn new(snapshot: &PublicationSnapshot) -> Self {
        Self {
            publication_id: snapshot.id.clone(),
            previously_collected: snapshot.has_collected_by_me,
        }
    }

    pub fn apply(&self, snapshot: &mut PublicationSnapshot) {
        snapshot.stats.total_amount_of_collects =
            snapshot.stats.total_amount_of_collects.saturating_add(1);
        snapshot.has_collected_by_me = true;
    }

    pub fn undo(&self, snapshot: &mut PublicationSnapshot) {
        snapshot.stats.total_amount_of_collects =
            snapshot.stats.total_amount_of_collects.saturating_sub(1);
        snapshot.has_collected_by_me = self.previously_collected;
    }
}

/// Any optimistic update the publication presenter can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimisticUpdate {
    Reaction {
        kind: TransactionKind,
        applied: AppliedReaction,
    },
    Comment(CommentDelta),
    Collect(CollectDelta),
}

impl OptimisticUpdate {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Reaction { kind, .. } => *kind,
            Self::Comment(_) => TransactionKind::CreateComment,
            Self::Collect(_) => TransactionKind::CollectPublication,
        }
    }

    pub fn publication_id(&self) -> &PublicationId {
        match self {
            Self::Reaction { applied, .. } => &applied.transition.publication_id,
            Self::Comment(delta) => &delta.publication_id,
            Self::Collect(delta) => &delta.publication_id,
        }
    }
}
