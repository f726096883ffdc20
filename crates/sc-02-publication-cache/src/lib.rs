//! # Publication Cache
//!
//! Normalized entity store for publications plus the presenters that apply,
//! confirm and revert optimistic updates issued by protocol calls.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Counters never go negative | `PublicationStats` saturating arithmetic, `u64` fields |
//! | Reaction and counters move together | `ReactionTransition::apply` in one `update_fragment` |
//! | Unknown entities are never fabricated | `update_fragment` returns `NotFound` |
//! | Revert never clobbers a later write | `ReactionPresenter` tracks unsettled transitions |
//!
//! ## Module Structure
//!
//! ```text
//! presenters/     - ReactionPresenter, CommentPresenter, CollectPresenter,
//!                   PublicationPresenter (implements ProtocolCallPresenter)
//! cache_manager   - CacheManager, PublicationCacheManager
//! ports/          - NormalizedStore
//! adapters/       - InMemoryStore
//! domain/         - PublicationSnapshot, deltas, CacheError
//! ```

pub mod adapters;
pub mod cache_manager;
pub mod domain;
pub mod ports;
pub mod presenters;

pub use adapters::InMemoryStore;
pub use cache_manager::{CacheManager, PublicationCacheManager};
pub use domain::*;
pub use ports::{FragmentUpdate, NormalizedStore};
pub use presenters::*;
