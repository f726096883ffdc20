//! Adapters for the protocol-call ports.
//!
//! In-process implementations used by tests and demos. Production gateways
//! (wallet signer, gasless relay) live in the host application.

pub mod gateway;
pub mod presenter;

pub use gateway::{RecordedCall, ScriptedGateway};
pub use presenter::{PresenterEvent, RecordingPresenter};
