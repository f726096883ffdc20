//! Cache error types.

use shared_types::{EntityKey, PublicationId};
use thiserror::Error;

/// Failures reading or writing the normalized store.
///
/// None of these are fatal: a missing snapshot only means the UI has not
/// loaded the entity yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// No entry under this key.
    #[error("no cached entry for {0}")]
    NotFound(EntityKey),

    /// No publication typename has an entry for this id.
    #[error("publication {0} is not cached")]
    PublicationNotFound(PublicationId),

    /// The entry does not match the fragment shape.
    #[error("cached entry {key} is malformed: {reason}")]
    Malformed { key: EntityKey, reason: String },
}
