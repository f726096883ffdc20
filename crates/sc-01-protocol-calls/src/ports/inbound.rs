//! # Inbound Port - ProtocolCallApi
//!
//! Driving port used by UI bindings to issue protocol calls and by the
//! transaction indexer to report settlement of relayed calls.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    PendingSummary, ProtocolCall, ProtocolCallError, Settlement, TransactionReceipt,
};

/// Primary API for issuing protocol calls.
///
/// # Example
///
/// ```rust,ignore
/// use sc_01_protocol_calls::ports::ProtocolCallApi;
///
/// async fn upvote(api: &impl ProtocolCallApi, call: ProtocolCall) {
///     // Optimistic update is visible as soon as this future is first polled.
///     if let Err(err) = api.execute(call).await {
///         // Already reverted and presented; surface to the user.
///     }
/// }
/// ```
#[async_trait]
pub trait ProtocolCallApi: Send + Sync {
    /// Validates, applies the optimistic update, and runs the gateway call.
    ///
    /// # Errors
    /// - `Validation`: malformed request, no side effect
    /// - `QueueFull`: too many relayed calls unsettled, no side effect
    /// - `Gateway`: signing / relay / transport failure, optimistic update reverted
    /// - `ProtocolRevert`: mined but rejected, optimistic update reverted
    async fn execute(&self, call: ProtocolCall) -> Result<(), ProtocolCallError>;

    /// Reconciles a relayed transaction with its authoritative result.
    ///
    /// # Errors
    /// - `UnknownTransaction`: no relayed call with this id is pending
    /// - `ProtocolRevert`: the transaction reverted, optimistic update reverted
    fn settle(
        &self,
        tx_id: Uuid,
        settlement: Settlement,
    ) -> Result<TransactionReceipt, ProtocolCallError>;

    /// Number of relayed transactions awaiting settlement.
    fn pending_count(&self) -> usize;

    /// Relayed transactions awaiting settlement, oldest first.
    fn pending_transactions(&self) -> Vec<PendingSummary>;
}
