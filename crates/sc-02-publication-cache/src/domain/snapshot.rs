//! # Entity Snapshots
//!
//! Typed views over entries of the normalized store. A fragment only names
//! the fields it cares about; anything else in the entry survives a write
//! because the store merges fragments field by field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{EntityKey, PublicationId, ReactionType};

use super::errors::CacheError;

/// Typename of a publication entry.
pub const POST_TYPENAME: &str = "Post";
pub const COMMENT_TYPENAME: &str = "Comment";
pub const MIRROR_TYPENAME: &str = "Mirror";

/// Every typename a `PublicationId` may be stored under, in lookup order.
pub const PUBLICATION_TYPENAMES: [&str; 3] = [POST_TYPENAME, COMMENT_TYPENAME, MIRROR_TYPENAME];

/// A typed subset of a store entry.
pub trait Fragment: Serialize + DeserializeOwned {
    fn from_value(key: &EntityKey, value: Value) -> Result<Self, CacheError> {
        serde_json::from_value(value).map_err(|e| CacheError::Malformed {
            key: key.clone(),
            reason: e.to_string(),
        })
    }

    fn to_value(&self, key: &EntityKey) -> Result<Value, CacheError> {
        serde_json::to_value(self).map_err(|e| CacheError::Malformed {
            key: key.clone(),
            reason: e.to_string(),
        })
    }
}

/// Publication counters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationStats {
    #[serde(default)]
    pub total_upvotes: u64,
    #[serde(default)]
    pub total_downvotes: u64,
    #[serde(default)]
    pub total_amount_of_comments: u64,
    #[serde(default)]
    pub total_amount_of_collects: u64,
    /// Counters this crate does not touch (mirrors, quotes, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PublicationStats {
    pub fn reactions(&self, reaction: ReactionType) -> u64 {
        match reaction {
            ReactionType::Upvote => self.total_upvotes,
            ReactionType::Downvote => self.total_downvotes,
        }
    }

    pub fn increment_reaction(&mut self, reaction: ReactionType) {
        let counter = self.reaction_counter(reaction);
        *counter = counter.saturating_add(1);
    }

    /// Saturates at zero.
    pub fn decrement_reaction(&mut self, reaction: ReactionType) {
        let counter = self.reaction_counter(reaction);
        *counter = counter.saturating_sub(1);
    }

    fn reaction_counter(&mut self, reaction: ReactionType) -> &mut u64 {
        match reaction {
            ReactionType::Upvote => &mut self.total_upvotes,
            ReactionType::Downvote => &mut self.total_downvotes,
        }
    }
}

/// The publication fields optimistic updates read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationSnapshot {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: PublicationId,
    #[serde(default)]
    pub stats: PublicationStats,
    /// The viewer's own reaction.
    #[serde(default)]
    pub reaction: Option<ReactionType>,
    #[serde(default)]
    pub has_collected_by_me: bool,
}

impl PublicationSnapshot {
    /// A fresh post with zeroed stats.
    pub fn post(id: impl Into<PublicationId>) -> Self {
        Self {
            typename: POST_TYPENAME.to_string(),
            id: id.into(),
            stats: PublicationStats::default(),
            reaction: None,
            has_collected_by_me: false,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.typename.clone(), self.id.as_str())
    }
}

impl Fragment for PublicationSnapshot {}
