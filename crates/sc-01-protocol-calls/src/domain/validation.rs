//! Validity predicates, one per request type.
//!
//! A request that fails here never reaches the gateway or the cache.

use shared_types::{ProfileId, PublicationId};

use super::errors::ValidationError;
use super::requests::{
    CollectPolicy, CollectRequest, CreateCommentRequest, CreatePostRequest, Media, ReactionRequest,
};

fn require_profile(profile_id: &ProfileId) -> Result<(), ValidationError> {
    if profile_id.is_blank() {
        return Err(ValidationError::MissingProfileId);
    }
    Ok(())
}

fn require_publication(publication_id: &PublicationId) -> Result<(), ValidationError> {
    if publication_id.is_blank() {
        return Err(ValidationError::MissingPublicationId);
    }
    Ok(())
}

/// Content must be non-empty, or at least one media item must be attached.
pub fn validate_content(content: Option<&str>, media: &[Media]) -> Result<(), ValidationError> {
    let has_content = content.is_some_and(|c| !c.is_empty());
    if !has_content && media.is_empty() {
        return Err(ValidationError::MissingContentOrMedia);
    }

    if let Some(index) = media.iter().position(|m| m.url.trim().is_empty()) {
        return Err(ValidationError::EmptyMediaUrl { index });
    }

    Ok(())
}

/// Checks fee bounds of a charged collect.
pub fn validate_collect_policy(policy: &CollectPolicy) -> Result<(), ValidationError> {
    if let CollectPolicy::ChargeCollect {
        amount,
        referral_fee_percent,
        ..
    } = policy
    {
        if *amount == 0 {
            return Err(ValidationError::ZeroCollectFee);
        }
        if *referral_fee_percent > 100 {
            return Err(ValidationError::ReferralFeeOutOfRange {
                percent: *referral_fee_percent,
            });
        }
    }
    Ok(())
}

pub fn validate_post(request: &CreatePostRequest) -> Result<(), ValidationError> {
    require_profile(&request.profile_id)?;
    validate_content(request.content.as_deref(), &request.media)?;
    validate_collect_policy(&request.collect)
}

pub fn validate_comment(request: &CreateCommentRequest) -> Result<(), ValidationError> {
    require_profile(&request.profile_id)?;
    require_publication(&request.publication_id)?;
    validate_content(request.content.as_deref(), &request.media)?;
    validate_collect_policy(&request.collect)
}

pub fn validate_collect(request: &CollectRequest) -> Result<(), ValidationError> {
    require_profile(&request.profile_id)?;
    require_publication(&request.publication_id)
}

pub fn validate_reaction(request: &ReactionRequest) -> Result<(), ValidationError> {
    require_profile(&request.profile_id)?;
    require_publication(&request.publication_id)
}
