//! # Core Domain Entities
//!
//! Identifiers and enumerations shared by the protocol-call and cache crates.
//!
//! ## Clusters
//!
//! - **Identity**: `ProfileId`, `PublicationId`, `TxHash`
//! - **Actions**: `ReactionType`, `TransactionKind`, `ExecutionMode`
//! - **Normalized store**: `EntityKey`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EntityKeyError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Identifier of a profile acting on the protocol (e.g. `0x01`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProfileId(pub String);

/// Identifier of a publication (post, comment or mirror), e.g. `0x01-0x02`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PublicationId(pub String);

/// Hash of an on-chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TxHash(pub String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Creates the identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrows the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(ProfileId);
string_id!(PublicationId);
string_id!(TxHash);

// =============================================================================
// CLUSTER B: ACTIONS
// =============================================================================

/// The viewer's own reaction to a publication. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionType {
    /// Positive reaction.
    Upvote,
    /// Negative reaction.
    Downvote,
}

impl ReactionType {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol action a transaction performs. One per request variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Publish a new post.
    CreatePost,
    /// Comment on an existing publication.
    CreateComment,
    /// Collect a publication.
    CollectPublication,
    /// Add (or switch) the viewer's reaction.
    AddReaction,
    /// Remove the viewer's reaction.
    RemoveReaction,
}

impl TransactionKind {
    /// Stable label for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatePost => "create_post",
            Self::CreateComment => "create_comment",
            Self::CollectPublication => "collect_publication",
            Self::AddReaction => "add_reaction",
            Self::RemoveReaction => "remove_reaction",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway capability used to execute a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Gasless path: a relay signs and submits on the user's behalf.
    Delegated,
    /// The user's wallet signs and broadcasts the call.
    SelfSigned,
}

impl ExecutionMode {
    /// Mode selected by a request's `delegate` flag.
    pub fn from_delegate(delegate: bool) -> Self {
        if delegate {
            Self::Delegated
        } else {
            Self::SelfSigned
        }
    }

    /// Stable label for logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delegated => "delegated",
            Self::SelfSigned => "self_signed",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLUSTER C: NORMALIZED STORE
// =============================================================================

/// Stable `(typename, id)` identity of an entry in the normalized store.
///
/// Rendered as `Typename:id`, the same form the store uses for its keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    /// GraphQL typename, e.g. `Post`.
    pub typename: String,
    /// Entity id within the typename.
    pub id: String,
}

impl EntityKey {
    /// Builds a key from its parts.
    pub fn new(typename: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.typename, self.id)
    }
}

impl FromStr for EntityKey {
    type Err = EntityKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (typename, id) = s
            .split_once(':')
            .ok_or_else(|| EntityKeyError::MissingSeparator(s.to_string()))?;
        if typename.is_empty() {
            return Err(EntityKeyError::EmptyTypename(s.to_string()));
        }
        if id.is_empty() {
            return Err(EntityKeyError::EmptyId(s.to_string()));
        }
        Ok(Self::new(typename, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_key_display_and_parse() {
        let key = EntityKey::new("Post", "0x01-0x02");
        assert_eq!(key.to_string(), "Post:0x01-0x02");

        let parsed: EntityKey = "Post:0x01-0x02".parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_entity_key_rejects_malformed() {
        assert!(matches!(
            "Post".parse::<EntityKey>(),
            Err(EntityKeyError::MissingSeparator(_))
        ));
        assert!(matches!(
            ":0x01".parse::<EntityKey>(),
            Err(EntityKeyError::EmptyTypename(_))
        ));
        assert!(matches!(
            "Post:".parse::<EntityKey>(),
            Err(EntityKeyError::EmptyId(_))
        ));
    }

    #[test]
    fn test_reaction_type_wire_format() {
        let json = serde_json::to_string(&ReactionType::Upvote).unwrap();
        assert_eq!(json, "\"UPVOTE\"");

        let back: ReactionType = serde_json::from_str("\"DOWNVOTE\"").unwrap();
        assert_eq!(back, ReactionType::Downvote);
    }

    #[test]
    fn test_ids_are_transparent() {
        let id = PublicationId::new("0x01-0x02");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0x01-0x02\"");
        assert!(!id.is_blank());
        assert!(ProfileId::new("  ").is_blank());
    }

    #[test]
    fn test_execution_mode_from_delegate() {
        assert_eq!(ExecutionMode::from_delegate(true), ExecutionMode::Delegated);
        assert_eq!(ExecutionMode::from_delegate(false), ExecutionMode::SelfSigned);
    }
}
