//! Recording presenter adapter.
//!
//! Captures the optimistic lifecycle and presented results in order so tests
//! can assert on exactly what the UI would have seen.

use parking_lot::Mutex;
use shared_types::{PublicationId, TransactionKind};

use crate::domain::{ProtocolCall, ProtocolCallError, TransactionOutcome};
use crate::ports::ProtocolCallPresenter;

/// Something the use case asked the presenter to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Applied(TransactionKind),
    Confirmed(TransactionKind),
    Reverted(TransactionKind),
    Presented {
        kind: TransactionKind,
        result: Result<TransactionOutcome, ProtocolCallError>,
    },
    Settled {
        kind: TransactionKind,
        target: Option<PublicationId>,
        result: Result<TransactionOutcome, ProtocolCallError>,
    },
}

/// Presenter that only records.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events, oldest first.
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().clone()
    }

    /// Only the results handed to `present`.
    pub fn presented(&self) -> Vec<Result<TransactionOutcome, ProtocolCallError>> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Presented { result, .. } => Some(result.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: PresenterEvent) {
        self.events.lock().push(event);
    }
}

impl ProtocolCallPresenter for RecordingPresenter {
    type Optimistic = TransactionKind;

    fn apply_optimistic(&self, call: &ProtocolCall) -> Option<TransactionKind> {
        let kind = call.kind();
        self.record(PresenterEvent::Applied(kind));
        Some(kind)
    }

    fn confirm(&self, kind: TransactionKind) {
        self.record(PresenterEvent::Confirmed(kind));
    }

    fn revert(&self, kind: TransactionKind) {
        self.record(PresenterEvent::Reverted(kind));
    }

    fn present(&self, call: &ProtocolCall, result: &Result<TransactionOutcome, ProtocolCallError>) {
        self.record(PresenterEvent::Presented {
            kind: call.kind(),
            result: result.clone(),
        });
    }

    fn present_settlement(
        &self,
        kind: TransactionKind,
        target: Option<&PublicationId>,
        result: &Result<TransactionOutcome, ProtocolCallError>,
    ) {
        self.record(PresenterEvent::Settled {
            kind,
            target: target.cloned(),
            result: result.clone(),
        });
    }
}
