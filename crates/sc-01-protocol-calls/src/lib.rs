//! # Protocol Calls
//!
//! Issues protocol actions (post, comment, collect, reactions) on behalf of
//! a profile, either through the gasless relay (delegated) or signed by the
//! user's wallet, and keeps the local cache optimistic while they run.
//!
//! ## Flow
//!
//! | Stage | Component | Effect |
//! |-------|-----------|--------|
//! | Validate | `ProtocolCall::validate` | Reject before any side effect |
//! | Apply | `ProtocolCallPresenter::apply_optimistic` | Cache shows the expected result |
//! | Submit | `ProtocolCallGateway::call` | One call (two with relay fallback enabled) |
//! | Confirm | `ProtocolCallPresenter::confirm` | Mined, nothing to undo |
//! | Park | `TransactionQueue` | Relayed, waiting for `settle` |
//! | Revert | `ProtocolCallPresenter::revert` | Compensating write, then error reported |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/  - ScriptedGateway, RecordingPresenter               │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - ProtocolCallApi                            │
//! │  ports/outbound.rs - ProtocolCallGateway, ProtocolCallPresenter │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ - requests, validation, outcomes, queue, config        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_01_protocol_calls::{DelegableProtocolCallUseCase, ExecutionConfig};
//!
//! let config = ExecutionConfig::from_env()?;
//! let use_case = DelegableProtocolCallUseCase::new(gateway, presenter, config)?;
//! use_case.add_reaction(request).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::{run_protocol_call, DelegableProtocolCallUseCase};
