//! # Error Types
//!
//! Error taxonomy for protocol calls:
//!
//! | Error | Raised | Side effects already applied |
//! |-------|--------|------------------------------|
//! | `ValidationError` | before the gateway | none |
//! | `GatewayError` | signing / relay / transport failure | optimistic update, reverted |
//! | `ProtocolRevert` | mined but rejected by the protocol | optimistic update, reverted |
//! | `QueueFull` | too many relayed calls unsettled | none |

use shared_types::TxHash;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// A request violates its action's validity predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Post or comment has neither content nor media.
    #[error("one of publication content or media is required")]
    MissingContentOrMedia,

    /// A media item has an empty url.
    #[error("media item {index} has an empty url")]
    EmptyMediaUrl { index: usize },

    /// Acting profile id is empty.
    #[error("profile id is required")]
    MissingProfileId,

    /// Target publication id is empty.
    #[error("publication id is required")]
    MissingPublicationId,

    /// A charged collect must cost something.
    #[error("charged collect requires a non-zero fee")]
    ZeroCollectFee,

    /// Referral fee is a percentage.
    #[error("referral fee {percent}% is out of range (0-100)")]
    ReferralFeeOutOfRange { percent: u8 },
}

// =============================================================================
// GATEWAY ERRORS
// =============================================================================

/// Signing, relay or transport failure. Retrying the whole call is safe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The gasless relay could not be reached; nothing was submitted.
    #[error("relay unavailable")]
    RelayUnavailable,

    /// The relay refused the call.
    #[error("relay rejected the call: {reason}")]
    RelayRejected { reason: String },

    /// The user declined to sign.
    #[error("signing request rejected by the wallet")]
    SigningRejected,

    /// Wallet balance cannot pay for gas.
    #[error("insufficient funds to pay for gas")]
    InsufficientFunds,

    /// Transport failure talking to the API or RPC node.
    #[error("network error: {message}")]
    Network { message: String },

    /// The gateway gave up waiting.
    #[error("gateway timed out")]
    Timeout,
}

impl GatewayError {
    /// True for failures of the delegated path.
    #[must_use]
    pub fn is_relay_failure(&self) -> bool {
        matches!(self, Self::RelayUnavailable | Self::RelayRejected { .. })
    }
}

// =============================================================================
// PROTOCOL CALL ERRORS
// =============================================================================

/// Every way `execute` and `settle` can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolCallError {
    /// Malformed request; nothing was touched.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Signing, relay or transport failure.
    #[error("gateway failure: {0}")]
    Gateway(#[from] GatewayError),

    /// Transaction executed but the protocol rejected it.
    #[error("transaction {tx_hash} reverted: {reason}")]
    ProtocolRevert { tx_hash: TxHash, reason: String },

    /// Too many relayed transactions awaiting settlement.
    #[error("pending transaction queue full at {capacity} entries")]
    QueueFull { capacity: usize },

    /// The relay returned an id that is already queued.
    #[error("duplicate pending transaction {0}")]
    DuplicateTransaction(Uuid),

    /// `settle` was called for a transaction the queue does not hold.
    #[error("unknown pending transaction {0}")]
    UnknownTransaction(Uuid),
}

impl ProtocolCallError {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid",
            Self::Gateway(_) => "failed",
            Self::ProtocolRevert { .. } => "reverted",
            Self::QueueFull { .. } => "queue_full",
            Self::DuplicateTransaction(_) => "duplicate",
            Self::UnknownTransaction(_) => "unknown",
        }
    }
}
