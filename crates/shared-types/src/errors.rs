//! # Error Types
//!
//! Errors for the shared identifier types.

use thiserror::Error;

/// Errors parsing an `EntityKey` from its `Typename:id` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityKeyError {
    /// No `:` between typename and id.
    #[error("Entity key {0:?} has no typename separator")]
    MissingSeparator(String),

    /// Typename part is empty.
    #[error("Entity key {0:?} has an empty typename")]
    EmptyTypename(String),

    /// Id part is empty.
    #[error("Entity key {0:?} has an empty id")]
    EmptyId(String),
}
