//! # Domain Layer - Protocol Calls
//!
//! Pure request/outcome types and rules.
//!
//! ## Components
//!
//! - `requests`: `ProtocolCall` sum type and per-action request structs
//! - `validation`: validity predicates checked before any side effect
//! - `outcome`: `TransactionOutcome`, receipts, relay tickets, settlements
//! - `queue`: relayed transactions awaiting settlement
//! - `config`: `ExecutionConfig`
//! - `errors`: `ValidationError`, `GatewayError`, `ProtocolCallError`

pub mod config;
pub mod errors;
pub mod outcome;
pub mod queue;
pub mod requests;
pub mod validation;

pub use config::*;
pub use errors::*;
pub use outcome::*;
pub use queue::*;
pub use requests::*;
