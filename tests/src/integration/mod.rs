//! Integration tests across the protocol-call and cache crates.

pub mod fixtures;
pub mod flows;
pub mod ordering;
