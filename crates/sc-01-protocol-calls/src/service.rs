//! # Protocol Call Service
//!
//! `DelegableProtocolCallUseCase` drives one protocol call through its
//! lifecycle:
//!
//! ```text
//! execute(call)
//!   ├─ validate ──✗──→ present(Err)                       (no side effects)
//!   ├─ delegated + queue full ──→ present(Err)            (no side effects)
//!   ├─ apply_optimistic                                    (before any .await)
//!   ├─ gateway.call(mode)
//!   │    ├─ Confirmed ──→ confirm  → present(Ok)
//!   │    ├─ Relayed   ──→ park     → present(Ok)   … settle() later
//!   │    └─ Failed    ──→ revert   → present(Err)
//!
//! settle(tx_id)
//!   ├─ Mined    ──→ confirm → present_settlement(Ok)
//!   └─ Reverted ──→ revert  → present_settlement(Err)
//! ```
//!
//! The optimistic update is applied synchronously before the gateway future
//! is first awaited, so cache writes for one publication happen in the order
//! the calls were issued no matter which gateway call resolves first.

use std::sync::Arc;

use async_trait::async_trait;
use sc_telemetry::{
    log_call_event, metric_inc, time_histogram, PENDING_TRANSACTIONS, PROTOCOL_CALLS,
    PROTOCOL_CALL_DURATION, VALIDATION_FAILURES,
};
use shared_types::ExecutionMode;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    CollectRequest, ConfigError, CreateCommentRequest, CreatePostRequest, ExecutionConfig,
    PendingSummary,
    PendingTransaction, ProtocolCall, ProtocolCallError, ReactionRequest, RelayFallback,
    Settlement, TransactionOutcome, TransactionQueue, TransactionReceipt, ValidationError,
};
use crate::ports::{
    Clock, ProtocolCallApi, ProtocolCallGateway, ProtocolCallPresenter, SystemClock,
};

/// Validates `call` with `validate` and submits it once through `gateway`.
///
/// Composition point for callers that have nothing to cache optimistically.
/// The validity predicate and execution mode are explicit so one runner
/// serves every action.
pub async fn run_protocol_call<G, V>(
    call: &ProtocolCall,
    validate: V,
    mode: ExecutionMode,
    gateway: &G,
) -> Result<TransactionOutcome, ProtocolCallError>
where
    G: ProtocolCallGateway + ?Sized,
    V: FnOnce(&ProtocolCall) -> Result<(), ValidationError>,
{
    validate(call)?;
    match gateway.call(call, mode).await {
        TransactionOutcome::Failed(reason) => Err(reason.into()),
        outcome => Ok(outcome),
    }
}

/// Orchestrates validation, optimistic update, gateway call and
/// reconciliation for every protocol action.
pub struct DelegableProtocolCallUseCase<G, P>
where
    G: ProtocolCallGateway,
    P: ProtocolCallPresenter,
{
    gateway: Arc<G>,
    presenter: Arc<P>,
    config: ExecutionConfig,
    queue: TransactionQueue<P::Optimistic>,
    clock: Arc<dyn Clock>,
}

impl<G, P> DelegableProtocolCallUseCase<G, P>
where
    G: ProtocolCallGateway,
    P: ProtocolCallPresenter,
{
    /// # Errors
    /// `ConfigError` when `config` fails validation.
    pub fn new(
        gateway: Arc<G>,
        presenter: Arc<P>,
        config: ExecutionConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(gateway, presenter, config, Arc::new(SystemClock))
    }

    /// Like `new`, stamping queued transactions with `clock`.
    pub fn with_clock(
        gateway: Arc<G>,
        presenter: Arc<P>,
        config: ExecutionConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let queue = TransactionQueue::new(config.max_pending_transactions);
        Ok(Self {
            gateway,
            presenter,
            config,
            queue,
            clock,
        })
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Runs `call` to completion. See the module docs for the flow.
    ///
    /// The result is also handed to the presenter exactly once.
    #[instrument(
        name = "protocol_call.execute",
        skip(self, call),
        fields(kind = %call.kind(), mode = %call.execution_mode())
    )]
    pub async fn execute(&self, call: ProtocolCall) -> Result<(), ProtocolCallError> {
        let kind = call.kind();

        if let Err(err) = call.validate() {
            metric_inc!(VALIDATION_FAILURES, &[kind.as_str()]);
            warn!(error = %err, "rejected invalid protocol call");
            return self.fail(&call, err.into());
        }

        // Only a delegated call can end up parked.
        if call.execution_mode() == ExecutionMode::Delegated && self.queue.is_full() {
            let err = ProtocolCallError::QueueFull {
                capacity: self.queue.capacity(),
            };
            warn!(error = %err, "too many relayed transactions awaiting settlement");
            return self.fail(&call, err);
        }

        // Must stay ahead of the first await below.
        let optimistic = self.presenter.apply_optimistic(&call);

        let outcome = self.submit(&call).await;
        self.resolve(&call, optimistic, outcome)
    }

    pub async fn create_post(&self, request: CreatePostRequest) -> Result<(), ProtocolCallError> {
        self.execute(request.into()).await
    }

    pub async fn create_comment(
        &self,
        request: CreateCommentRequest,
    ) -> Result<(), ProtocolCallError> {
        self.execute(request.into()).await
    }

    pub async fn collect(&self, request: CollectRequest) -> Result<(), ProtocolCallError> {
        self.execute(request.into()).await
    }

    pub async fn add_reaction(&self, request: ReactionRequest) -> Result<(), ProtocolCallError> {
        self.execute(ProtocolCall::AddReaction(request)).await
    }

    pub async fn remove_reaction(
        &self,
        request: ReactionRequest,
    ) -> Result<(), ProtocolCallError> {
        self.execute(ProtocolCall::RemoveReaction(request)).await
    }

    /// Reconciles a relayed transaction reported by the indexer.
    #[instrument(name = "protocol_call.settle", skip(self, settlement), fields(%tx_id))]
    pub fn settle(
        &self,
        tx_id: Uuid,
        settlement: Settlement,
    ) -> Result<TransactionReceipt, ProtocolCallError> {
        let pending = self.queue.take(&tx_id)?;
        PENDING_TRANSACTIONS.set(self.queue.len() as f64);

        let kind = pending.kind;
        let target = pending.target.as_ref();

        match settlement {
            Settlement::Mined(receipt) => {
                if let Some(update) = pending.optimistic {
                    self.presenter.confirm(update);
                }
                info!(
                    %kind,
                    tx_hash = %receipt.tx_hash,
                    block = receipt.block_number,
                    "relayed transaction mined"
                );
                self.presenter.present_settlement(
                    kind,
                    target,
                    &Ok(TransactionOutcome::Confirmed(receipt.clone())),
                );
                Ok(receipt)
            }
            Settlement::Reverted { tx_hash, reason } => {
                if let Some(update) = pending.optimistic {
                    self.presenter.revert(update);
                }
                warn!(%kind, %tx_hash, %reason, "relayed transaction reverted");
                let err = ProtocolCallError::ProtocolRevert { tx_hash, reason };
                self.presenter.present_settlement(kind, target, &Err(err.clone()));
                Err(err)
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Relayed transactions awaiting settlement, oldest first.
    pub fn pending_transactions(&self) -> Vec<PendingSummary> {
        self.queue.snapshot()
    }

    /// Calls the gateway in the requested mode, falling back to self-signed
    /// execution when configured and the relay never took the call.
    async fn submit(&self, call: &ProtocolCall) -> TransactionOutcome {
        let mode = call.execution_mode();
        let outcome = self.call_gateway(call, mode).await;

        match outcome {
            TransactionOutcome::Failed(ref reason)
                if mode == ExecutionMode::Delegated
                    && reason.relay_unavailable()
                    && self.config.relay_fallback == RelayFallback::SelfSigned =>
            {
                log_call_event!(
                    warn,
                    "relay unavailable, retrying as self-signed",
                    call.kind(),
                    mode
                );
                self.call_gateway(call, ExecutionMode::SelfSigned).await
            }
            outcome => outcome,
        }
    }

    async fn call_gateway(&self, call: &ProtocolCall, mode: ExecutionMode) -> TransactionOutcome {
        let kind = call.kind();
        let _timer = time_histogram!(PROTOCOL_CALL_DURATION.with_label_values(&[kind.as_str()]));

        let outcome = self.gateway.call(call, mode).await;

        metric_inc!(PROTOCOL_CALLS, &[kind.as_str(), mode.as_str(), outcome.label()]);
        log_call_event!(debug, "gateway call resolved", kind, mode, outcome = outcome.label());
        outcome
    }

    fn resolve(
        &self,
        call: &ProtocolCall,
        optimistic: Option<P::Optimistic>,
        outcome: TransactionOutcome,
    ) -> Result<(), ProtocolCallError> {
        match outcome {
            TransactionOutcome::Confirmed(receipt) => {
                if let Some(update) = optimistic {
                    self.presenter.confirm(update);
                }
                info!(tx_hash = %receipt.tx_hash, "protocol call confirmed");
                self.presenter
                    .present(call, &Ok(TransactionOutcome::Confirmed(receipt)));
                Ok(())
            }
            TransactionOutcome::Relayed(ticket) => {
                let pending = PendingTransaction {
                    tx_id: ticket.tx_id,
                    kind: call.kind(),
                    target: call.target().cloned(),
                    tx_hash: ticket.tx_hash.clone(),
                    submitted_at: self.clock.now(),
                    optimistic,
                };

                match self.queue.push(pending) {
                    Ok(()) => {
                        PENDING_TRANSACTIONS.set(self.queue.len() as f64);
                        info!(tx_id = %ticket.tx_id, "protocol call relayed");
                        self.presenter
                            .present(call, &Ok(TransactionOutcome::Relayed(ticket)));
                        Ok(())
                    }
                    Err((err, rejected)) => {
                        if let Some(update) = rejected.optimistic {
                            self.presenter.revert(update);
                        }
                        warn!(tx_id = %ticket.tx_id, error = %err, "could not track relayed call");
                        self.fail(call, err)
                    }
                }
            }
            TransactionOutcome::Failed(reason) => {
                if let Some(update) = optimistic {
                    self.presenter.revert(update);
                }
                let err = ProtocolCallError::from(reason);
                warn!(error = %err, "protocol call failed");
                self.fail(call, err)
            }
        }
    }

    fn fail(&self, call: &ProtocolCall, err: ProtocolCallError) -> Result<(), ProtocolCallError> {
        self.presenter.present(call, &Err(err.clone()));
        Err(err)
    }
}

#[async_trait]
impl<G, P> ProtocolCallApi for DelegableProtocolCallUseCase<G, P>
where
    G: ProtocolCallGateway,
    P: ProtocolCallPresenter,
{
    async fn execute(&self, call: ProtocolCall) -> Result<(), ProtocolCallError> {
        DelegableProtocolCallUseCase::execute(self, call).await
    }

    fn settle(
        &self,
        tx_id: Uuid,
        settlement: Settlement,
    ) -> Result<TransactionReceipt, ProtocolCallError> {
        DelegableProtocolCallUseCase::settle(self, tx_id, settlement)
    }

    fn pending_count(&self) -> usize {
        DelegableProtocolCallUseCase::pending_count(self)
    }

    fn pending_transactions(&self) -> Vec<PendingSummary> {
        DelegableProtocolCallUseCase::pending_transactions(self)
    }
}
