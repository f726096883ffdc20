//! Presenters: the only writers of publication snapshots.

pub mod collect;
pub mod comment;
pub mod publication;
pub mod reaction;

pub use collect::CollectPresenter;
pub use comment::CommentPresenter;
pub use publication::{PresentedResult, PublicationPresenter};
pub use reaction::ReactionPresenter;
