//! Scripted gateway adapter.
//!
//! Stands in for the wallet / relay / RPC stack. Outcomes are handed out in
//! the order they were scripted; `hold` parks the next call until the test
//! decides how it resolves, which lets tests resolve calls out of order.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{ExecutionMode, TransactionKind, TxHash};
use tokio::sync::oneshot;

use crate::domain::{FailureReason, ProtocolCall, TransactionOutcome, TransactionReceipt};
use crate::ports::ProtocolCallGateway;

/// One call seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: TransactionKind,
    pub mode: ExecutionMode,
    pub call: ProtocolCall,
}

enum Step {
    Resolve(TransactionOutcome),
    Hold(oneshot::Receiver<TransactionOutcome>),
}

/// Gateway returning pre-programmed outcomes.
pub struct ScriptedGateway {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<VecDeque<Step>>,
    default_outcome: TransactionOutcome,
}

impl ScriptedGateway {
    /// Gateway answering `default_outcome` once the script runs dry.
    pub fn new(default_outcome: TransactionOutcome) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            default_outcome,
        }
    }

    /// Gateway that confirms every call at block 1.
    pub fn confirming() -> Self {
        Self::new(TransactionOutcome::Confirmed(TransactionReceipt {
            tx_hash: TxHash::new("0x01"),
            block_number: 1,
        }))
    }

    /// Queues the outcome of the next unscripted call.
    pub fn push_outcome(&self, outcome: TransactionOutcome) {
        self.script.lock().push_back(Step::Resolve(outcome));
    }

    /// Queues a call that stays open until the returned sender fires.
    ///
    /// Dropping the sender resolves the call as `Failed(Timeout)`.
    pub fn hold(&self) -> oneshot::Sender<TransactionOutcome> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().push_back(Step::Hold(rx));
        tx
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ProtocolCallGateway for ScriptedGateway {
    async fn call(&self, call: &ProtocolCall, mode: ExecutionMode) -> TransactionOutcome {
        self.calls.lock().push(RecordedCall {
            kind: call.kind(),
            mode,
            call: call.clone(),
        });

        let step = self.script.lock().pop_front();
        match step {
            None => self.default_outcome.clone(),
            Some(Step::Resolve(outcome)) => outcome,
            Some(Step::Hold(rx)) => rx
                .await
                .unwrap_or(TransactionOutcome::Failed(FailureReason::Timeout)),
        }
    }
}
