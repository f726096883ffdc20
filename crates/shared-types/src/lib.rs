//! # Shared Types Crate
//!
//! Identifiers and enumerations used by every crate of the social client SDK.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers crossing crate boundaries
//!   (profiles, publications, transaction kinds, store keys) live here.
//! - **Stable labels**: every enum exposes `as_str()` so logs and metric
//!   labels never depend on `Debug` output.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
