//! DistributorActor: owns the topology and routes every message.
//!
//! The distributor never touches record contents. It balances submissions
//! across the worker pool round-robin, forwards accepted records to the
//! collector, and turns `EndOfInput` into the flush handshake that guarantees
//! the final retrieval observes a fully settled accumulation:
//!
//! 1. `EndOfInput` -> `FlushWorker` to every worker
//! 2. Each worker answers `WorkerFlushed` after draining its mailbox
//! 3. Per-pair FIFO means each worker's accepted records reach the
//!    distributor before its flush ack, so when the last ack is processed,
//!    every `StoreRecord` is already enqueued at the collector
//! 4. `RetrieveAccumulation` -> collector, reply routed back here
//! 5. `ReportReady` -> reporter

use acton_reactive::prelude::*;
use tracing::{debug, info, warn};

use crate::messages::{
    EndOfInput, FlushWorker, ProcessVehicle, RegisterPipeline, ReportReady, RetrieveAccumulation,
    StoreRecord, SubmitVehicle, VehicleAccepted, WorkerFlushed,
};

/// Advance the round-robin cursor, wrapping at pool size.
fn advance_cursor(cursor: usize, pool_size: usize) -> usize {
    (cursor + 1) % pool_size
}

/// Tracks the flush handshake after end of input.
#[derive(Debug, Clone)]
struct PendingFlush {
    /// Expected number of acknowledgments (one per worker)
    expected: usize,
    /// Acknowledgments received so far
    flushed: usize,
}

impl PendingFlush {
    fn new(expected: usize) -> Self {
        Self {
            expected,
            flushed: 0,
        }
    }

    fn is_complete(&self) -> bool {
        self.flushed >= self.expected
    }
}

/// Actor state for the distributor.
#[derive(Default, Clone)]
pub struct DistributorState {
    /// Worker pool handles, in pool order
    workers: Vec<ActorHandle>,
    /// Round-robin cursor, always a valid index into `workers`
    cursor: usize,
    /// Handle to the collector
    collector: Option<ActorHandle>,
    /// Handle to the reporter
    reporter: Option<ActorHandle>,
    /// Records routed so far, for the completion log line
    submitted: usize,
    /// In-progress flush handshake, if end of input has been signaled
    pending_flush: Option<PendingFlush>,
}

impl std::fmt::Debug for DistributorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistributorState")
            .field("workers", &self.workers.len())
            .field("cursor", &self.cursor)
            .field("collector", &self.collector.is_some())
            .field("reporter", &self.reporter.is_some())
            .field("submitted", &self.submitted)
            .field("pending_flush", &self.pending_flush)
            .finish()
    }
}

/// The orchestrating actor of the pipeline.
///
/// All routing handlers use `mutate_on`: forwards must leave in mailbox
/// order, or a flush ack could overtake an accepted record and the retrieval
/// would observe a partial accumulation.
pub struct DistributorActor;

impl DistributorActor {
    /// Spawn the distributor in the given runtime.
    ///
    /// The topology arrives afterwards via [`RegisterPipeline`]; the builder
    /// sends it before the handle is exposed to the driver, so registration
    /// happens-before any routing.
    pub async fn spawn(runtime: &mut ActorRuntime) -> ActorHandle {
        let mut actor =
            runtime.new_actor_with_name::<DistributorState>("Distributor".to_string());

        configure_handlers(&mut actor);

        actor.start().await
    }
}

/// Configure all message handlers for the distributor.
fn configure_handlers(actor: &mut ManagedActor<Idle, DistributorState>) {
    // Install the topology
    actor.mutate_on::<RegisterPipeline>(|actor, context| {
        let msg = context.message();
        actor.model.workers = msg.workers.clone();
        actor.model.collector = Some(msg.collector.clone());
        actor.model.reporter = Some(msg.reporter.clone());
        actor.model.cursor = 0;

        debug!(workers = actor.model.workers.len(), "Pipeline registered");
        Reply::ready()
    });

    // One inbound record: dispatch to the next worker in the rotation
    actor.mutate_on::<SubmitVehicle>(|actor, context| {
        let vehicle = context.message().vehicle.clone();

        if actor.model.workers.is_empty() {
            warn!("Distributor: worker pool not registered, dropping record");
            return Reply::ready();
        }

        let target = actor.model.workers[actor.model.cursor].clone();
        actor.model.cursor = advance_cursor(actor.model.cursor, actor.model.workers.len());
        actor.model.submitted += 1;

        Reply::pending(async move {
            target.send(ProcessVehicle { vehicle }).await;
        })
    });

    // A worker accepted a record: forward it to the collector
    actor.mutate_on::<VehicleAccepted>(|actor, context| {
        let record = context.message().record.clone();

        let Some(collector) = actor.model.collector.clone() else {
            warn!("Distributor: collector not registered, dropping record");
            return Reply::ready();
        };

        Reply::pending(async move {
            collector.send(StoreRecord { record }).await;
        })
    });

    // End of input: start the flush handshake
    actor.mutate_on::<EndOfInput>(|actor, _context| {
        if actor.model.workers.is_empty() {
            warn!("Distributor: end of input before pipeline registration");
            return Reply::ready();
        }
        if actor.model.pending_flush.is_some() {
            warn!("Distributor: duplicate end of input, ignoring");
            return Reply::ready();
        }

        let workers = actor.model.workers.clone();
        actor.model.pending_flush = Some(PendingFlush::new(workers.len()));

        info!(
            submitted = actor.model.submitted,
            workers = workers.len(),
            "End of input, flushing workers"
        );

        Reply::pending(async move {
            for worker in workers {
                worker.send(FlushWorker).await;
            }
        })
    });

    // A worker drained: once all have, retrieve the accumulation
    actor.mutate_on::<WorkerFlushed>(|actor, context| {
        let worker = context.message().worker;

        let Some(pending) = actor.model.pending_flush.as_mut() else {
            warn!(worker, "Distributor: flush ack outside a flush phase");
            return Reply::ready();
        };
        pending.flushed += 1;

        debug!(
            worker,
            flushed = pending.flushed,
            expected = pending.expected,
            "Worker flush acknowledged"
        );

        if !pending.is_complete() {
            return Reply::ready();
        }
        actor.model.pending_flush = None;

        let Some(collector) = actor.model.collector.clone() else {
            warn!("Distributor: collector not registered at retrieval");
            return Reply::ready();
        };

        debug!("All workers flushed, retrieving accumulation");

        // Address the request back here so ReportReady lands in our mailbox
        let envelope = context.new_envelope(&collector.reply_address());
        Reply::pending(async move {
            envelope.send(RetrieveAccumulation).await;
        })
    });

    // The collector answered: forward the accumulation to the reporter
    actor.act_on::<ReportReady>(|actor, context| {
        let msg = context.message().clone();

        let Some(reporter) = actor.model.reporter.clone() else {
            warn!("Distributor: reporter not registered, dropping report");
            return Reply::ready();
        };

        Reply::pending(async move {
            reporter.send(msg).await;
        })
    });
}
