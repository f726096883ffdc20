//! Typed requests, one per protocol action.
//!
//! `ProtocolCall` is the sum type the use case dispatches on. Every accessor
//! is an explicit `match` over the variants.

use serde::{Deserialize, Serialize};
use shared_types::{ExecutionMode, ProfileId, PublicationId, ReactionType, TransactionKind};

use super::errors::ValidationError;
use super::validation;

/// A media attachment referenced by a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Location of the media (IPFS, Arweave or HTTPS url).
    pub url: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
}

impl Media {
    /// Creates a media item.
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// What the publication's content is mainly about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentFocus {
    #[default]
    Text,
    Image,
    Video,
    Audio,
    Article,
    Link,
    Embed,
}

/// Who may comment on or mirror the publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferencePolicy {
    #[default]
    AnyoneCanReference,
    FollowersOnly,
}

/// How the publication can be collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectPolicy {
    /// Collecting is disabled.
    #[default]
    NoCollect,
    /// Anyone (or followers only) collects for free.
    FreeCollect {
        /// Restrict collecting to followers of the author.
        followers_only: bool,
    },
    /// Collecting charges a fee.
    ChargeCollect {
        /// Fee in the currency's smallest unit.
        amount: u64,
        /// Currency contract address.
        currency: String,
        /// Address receiving the fee.
        recipient: String,
        /// Share of the fee paid to the mirror that referred the collect.
        referral_fee_percent: u8,
        /// Restrict collecting to followers of the author.
        followers_only: bool,
    },
}

/// BCP-47 locale of the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

/// Publish a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub profile_id: ProfileId,
    pub content: Option<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub content_focus: ContentFocus,
    #[serde(default)]
    pub reference: ReferencePolicy,
    #[serde(default)]
    pub collect: CollectPolicy,
    #[serde(default)]
    pub locale: Locale,
    pub delegate: bool,
}

/// Comment on an existing publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// The publication being commented on.
    pub publication_id: PublicationId,
    pub profile_id: ProfileId,
    pub content: Option<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub content_focus: ContentFocus,
    #[serde(default)]
    pub reference: ReferencePolicy,
    #[serde(default)]
    pub collect: CollectPolicy,
    #[serde(default)]
    pub locale: Locale,
    pub delegate: bool,
}

/// Collect a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRequest {
    pub profile_id: ProfileId,
    pub publication_id: PublicationId,
    pub delegate: bool,
}

/// Add or remove the viewer's reaction to a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub profile_id: ProfileId,
    pub publication_id: PublicationId,
    pub reaction_type: ReactionType,
    pub delegate: bool,
}

/// A protocol call, one variant per protocol action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtocolCall {
    CreatePost(CreatePostRequest),
    CreateComment(CreateCommentRequest),
    CollectPublication(CollectRequest),
    AddReaction(ReactionRequest),
    RemoveReaction(ReactionRequest),
}

impl ProtocolCall {
    /// The transaction kind this call produces.
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::CreatePost(_) => TransactionKind::CreatePost,
            Self::CreateComment(_) => TransactionKind::CreateComment,
            Self::CollectPublication(_) => TransactionKind::CollectPublication,
            Self::AddReaction(_) => TransactionKind::AddReaction,
            Self::RemoveReaction(_) => TransactionKind::RemoveReaction,
        }
    }

    /// Whether the caller asked for the gasless relay.
    pub fn delegate(&self) -> bool {
        match self {
            Self::CreatePost(r) => r.delegate,
            Self::CreateComment(r) => r.delegate,
            Self::CollectPublication(r) => r.delegate,
            Self::AddReaction(r) | Self::RemoveReaction(r) => r.delegate,
        }
    }

    /// Execution mode selected by the `delegate` flag.
    pub fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::from_delegate(self.delegate())
    }

    /// The acting profile.
    pub fn profile_id(&self) -> &ProfileId {
        match self {
            Self::CreatePost(r) => &r.profile_id,
            Self::CreateComment(r) => &r.profile_id,
            Self::CollectPublication(r) => &r.profile_id,
            Self::AddReaction(r) | Self::RemoveReaction(r) => &r.profile_id,
        }
    }

    /// The existing publication this call touches, if any.
    pub fn target(&self) -> Option<&PublicationId> {
        match self {
            Self::CreatePost(_) => None,
            Self::CreateComment(r) => Some(&r.publication_id),
            Self::CollectPublication(r) => Some(&r.publication_id),
            Self::AddReaction(r) | Self::RemoveReaction(r) => Some(&r.publication_id),
        }
    }

    /// Runs the variant's validity predicate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::CreatePost(r) => validation::validate_post(r),
            Self::CreateComment(r) => validation::validate_comment(r),
            Self::CollectPublication(r) => validation::validate_collect(r),
            Self::AddReaction(r) | Self::RemoveReaction(r) => validation::validate_reaction(r),
        }
    }
}

impl From<CreatePostRequest> for ProtocolCall {
    fn from(request: CreatePostRequest) -> Self {
        Self::CreatePost(request)
    }
}

impl From<CreateCommentRequest> for ProtocolCall {
    fn from(request: CreateCommentRequest) -> Self {
        Self::CreateComment(request)
    }
}

impl From<CollectRequest> for ProtocolCall {
    fn from(request: CollectRequest) -> Self {
        Self::CollectPublication(request)
    }
}
