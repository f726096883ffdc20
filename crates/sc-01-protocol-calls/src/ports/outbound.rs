//! Outbound (Driven) ports for protocol calls.
//!
//! These traits define the collaborators the use case drives:
//! - `ProtocolCallGateway`: signs or relays the call (wallet / relay / RPC)
//! - `ProtocolCallPresenter`: applies, confirms or reverts the optimistic
//!   cache update and reports results to the UI
//! - `Clock`: timestamps for queued transactions

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use shared_types::{ExecutionMode, PublicationId, TransactionKind};

use crate::domain::{ProtocolCall, ProtocolCallError, Timestamp, TransactionOutcome};

/// Performs the actual signed or delegated call.
///
/// Timeouts are the implementation's concern: a slow call must eventually
/// resolve to `Failed(Timeout)`.
#[async_trait]
pub trait ProtocolCallGateway: Send + Sync {
    /// Executes `call` through the given capability.
    ///
    /// Must report relay unavailability and on-chain revert as distinct
    /// `FailureReason`s.
    async fn call(&self, call: &ProtocolCall, mode: ExecutionMode) -> TransactionOutcome;
}

/// Translates use-case progress into cache mutations and UI reports.
///
/// The only component allowed to write entity snapshots for its domain.
pub trait ProtocolCallPresenter: Send + Sync {
    /// Handle needed to confirm or revert an applied optimistic update.
    type Optimistic: Send;

    /// Applies the optimistic delta for `call`.
    ///
    /// Runs synchronously before the gateway call suspends. Returns `None`
    /// when the call has nothing to apply (or the base snapshot is missing).
    fn apply_optimistic(&self, call: &ProtocolCall) -> Option<Self::Optimistic>;

    /// The authoritative state agrees with the optimistic update.
    fn confirm(&self, update: Self::Optimistic);

    /// Compensating write undoing the optimistic update.
    fn revert(&self, update: Self::Optimistic);

    /// Reports the result of `execute`. Called exactly once per call.
    fn present(&self, call: &ProtocolCall, result: &Result<TransactionOutcome, ProtocolCallError>);

    /// Reports how a relayed call ended, after its update was confirmed or
    /// reverted. `target` is the publication the call acted on, if any.
    fn present_settlement(
        &self,
        kind: TransactionKind,
        target: Option<&PublicationId>,
        result: &Result<TransactionOutcome, ProtocolCallError>,
    );
}

/// Wall clock stamping queued transactions.
pub trait Clock: Send + Sync {
    /// Milliseconds since UNIX epoch.
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as Timestamp)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
