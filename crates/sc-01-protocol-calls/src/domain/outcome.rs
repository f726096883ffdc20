//! Gateway outcomes.
//!
//! ```text
//!                      ┌──→ Confirmed(receipt)   → confirm optimistic update
//! gateway.call(..) ────┼──→ Relayed(ticket)      → park until settled
//!                      └──→ Failed(reason)       → revert optimistic update
//! ```

use serde::{Deserialize, Serialize};
use shared_types::TxHash;
use uuid::Uuid;

use super::errors::{GatewayError, ProtocolCallError};

/// A mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// A call accepted by the gasless relay but not yet mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayTicket {
    /// Relay indexing id used to follow the transaction.
    pub tx_id: Uuid,
    /// Known once the relay has broadcast the transaction.
    pub tx_hash: Option<TxHash>,
}

impl RelayTicket {
    /// Ticket with a fresh id and no hash yet.
    pub fn new() -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            tx_hash: None,
        }
    }
}

impl Default for RelayTicket {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the gateway failed the call.
///
/// Relay failures and on-chain reverts are distinct variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    RelayUnavailable,
    RelayRejected { message: String },
    SigningRejected,
    InsufficientFunds,
    Network { message: String },
    Timeout,
    Reverted { tx_hash: TxHash, message: String },
}

impl FailureReason {
    /// True when the relay never submitted anything.
    #[must_use]
    pub fn relay_unavailable(&self) -> bool {
        matches!(self, Self::RelayUnavailable)
    }
}

impl From<FailureReason> for ProtocolCallError {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::RelayUnavailable => GatewayError::RelayUnavailable.into(),
            FailureReason::RelayRejected { message } => {
                GatewayError::RelayRejected { reason: message }.into()
            }
            FailureReason::SigningRejected => GatewayError::SigningRejected.into(),
            FailureReason::InsufficientFunds => GatewayError::InsufficientFunds.into(),
            FailureReason::Network { message } => GatewayError::Network { message }.into(),
            FailureReason::Timeout => GatewayError::Timeout.into(),
            FailureReason::Reverted { tx_hash, message } => ProtocolCallError::ProtocolRevert {
                tx_hash,
                reason: message,
            },
        }
    }
}

/// Result of one gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionOutcome {
    Confirmed(TransactionReceipt),
    Relayed(RelayTicket),
    Failed(FailureReason),
}

impl TransactionOutcome {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Confirmed(_) => "confirmed",
            Self::Relayed(_) => "relayed",
            Self::Failed(FailureReason::Reverted { .. }) => "reverted",
            Self::Failed(_) => "failed",
        }
    }
}

/// Final word on a relayed transaction, reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Mined and accepted.
    Mined(TransactionReceipt),
    /// Mined but rejected by the protocol.
    Reverted { tx_hash: TxHash, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_maps_to_protocol_revert() {
        let err: ProtocolCallError = FailureReason::Reverted {
            tx_hash: TxHash::new("0x01"),
            message: "NotCollectable".into(),
        }
        .into();
        assert!(matches!(err, ProtocolCallError::ProtocolRevert { .. }));
    }

    #[test]
    fn test_relay_failure_maps_to_gateway_error() {
        let err: ProtocolCallError = FailureReason::RelayUnavailable.into();
        match err {
            ProtocolCallError::Gateway(inner) => assert!(inner.is_relay_failure()),
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(
            TransactionOutcome::Relayed(RelayTicket::new()).label(),
            "relayed"
        );
        assert_eq!(
            TransactionOutcome::Failed(FailureReason::Timeout).label(),
            "failed"
        );
        assert_eq!(
            TransactionOutcome::Failed(FailureReason::Reverted {
                tx_hash: TxHash::new("0x01"),
                message: String::new(),
            })
            .label(),
            "reverted"
        );
    }
}
