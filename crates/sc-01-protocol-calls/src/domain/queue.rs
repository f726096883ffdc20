//! # Pending Transaction Queue
//!
//! Relayed calls are accepted by the relay before they are mined. Their
//! optimistic cache update stays applied while they wait here; settlement
//! either confirms it or hands it back for revert.
//!
//! ```text
//! [Relayed] ──push──→ [PENDING] ──take(Mined)────→ confirm
//!                          │
//!                          └──take(Reverted)──→ revert
//! ```
//!
//! Entries are never dropped silently: the only way out is `take`.

use parking_lot::Mutex;
use shared_types::{PublicationId, TransactionKind, TxHash};
use std::collections::HashMap;
use uuid::Uuid;

use super::errors::ProtocolCallError;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// A relayed transaction awaiting settlement.
#[derive(Debug)]
pub struct PendingTransaction<T> {
    /// Relay indexing id.
    pub tx_id: Uuid,
    /// Action performed.
    pub kind: TransactionKind,
    /// Publication the action targets, if any.
    pub target: Option<PublicationId>,
    /// Hash, once the relay broadcast it.
    pub tx_hash: Option<TxHash>,
    /// When the relay accepted the call.
    pub submitted_at: Timestamp,
    /// Optimistic update to confirm or revert on settlement.
    pub optimistic: Option<T>,
}

/// Listing entry for UIs showing in-flight transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSummary {
    pub tx_id: Uuid,
    pub kind: TransactionKind,
    pub tx_hash: Option<TxHash>,
    pub submitted_at: Timestamp,
}

/// Bounded queue of relayed transactions keyed by relay id.
#[derive(Debug)]
pub struct TransactionQueue<T> {
    entries: Mutex<HashMap<Uuid, PendingTransaction<T>>>,
    capacity: usize,
}

impl<T> TransactionQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when another relayed transaction would not fit.
    pub fn is_full(&self) -> bool {
        self.entries.lock().len() >= self.capacity
    }

    /// Parks a relayed transaction.
    ///
    /// # Errors
    /// - `DuplicateTransaction`: the relay id is already queued
    /// - `QueueFull`: at capacity
    ///
    /// The rejected entry is handed back so the caller can still revert its
    /// optimistic update.
    pub fn push(
        &self,
        pending: PendingTransaction<T>,
    ) -> Result<(), (ProtocolCallError, PendingTransaction<T>)> {
        let mut entries = self.entries.lock();
        if entries.contains_key(&pending.tx_id) {
            let tx_id = pending.tx_id;
            return Err((ProtocolCallError::DuplicateTransaction(tx_id), pending));
        }
        if entries.len() >= self.capacity {
            let capacity = self.capacity;
            return Err((ProtocolCallError::QueueFull { capacity }, pending));
        }
        entries.insert(pending.tx_id, pending);
        Ok(())
    }

    /// Removes a transaction for settlement.
    pub fn take(&self, tx_id: &Uuid) -> Result<PendingTransaction<T>, ProtocolCallError> {
        self.entries
            .lock()
            .remove(tx_id)
            .ok_or(ProtocolCallError::UnknownTransaction(*tx_id))
    }

    pub fn contains(&self, tx_id: &Uuid) -> bool {
        self.entries.lock().contains_key(tx_id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// In-flight transactions, oldest first.
    pub fn snapshot(&self) -> Vec<PendingSummary> {
        let mut summaries: Vec<_> = self
            .entries
            .lock()
            .values()
            .map(|p| PendingSummary {
                tx_id: p.tx_id,
                kind: p.kind,
                tx_hash: p.tx_hash.clone(),
                submitted_at: p.submitted_at,
            })
            .collect();
        summaries.sort_by_key(|s| s.submitted_at);
        summaries
    }
}
