//! # Domain Layer - Publication Cache
//!
//! - `snapshot`: `Fragment` trait and `PublicationSnapshot`
//! - `delta`: reaction transitions, comment and collect deltas
//! - `errors`: `CacheError`

pub mod delta;
pub mod errors;
pub mod snapshot;

pub use delta::*;
pub use errors::*;
pub use snapshot::*;
