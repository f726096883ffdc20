//! Ports layer for protocol calls.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to UI bindings
//! - Outbound (Driven) ports: gateway, presenter, clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
