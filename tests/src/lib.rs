//! # Social Client Test Suite
//!
//! Cross-crate tests wiring `sc-01-protocol-calls` to `sc-02-publication-cache`.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs   # Seeded store, use case wiring
//!     ├── flows.rs      # One call from request to presented result
//!     └── ordering.rs   # Gateway calls resolving out of order
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! cargo test -p sc-tests integration::ordering
//! ```

#![allow(dead_code)]

pub mod integration;
