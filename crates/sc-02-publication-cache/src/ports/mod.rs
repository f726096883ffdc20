//! Ports layer for the publication cache.

pub mod outbound;

pub use outbound::*;
