//! Message types for acton-reactive actor communication.
//!
//! Each message corresponds to one arc of the pipeline's routing table.
//! Messages are created immediately before dispatch and consumed by exactly
//! one handler; only `StoreRecord`'s payload outlives its handler, as part of
//! the collector's accumulation.

use acton_reactive::prelude::ActorHandle;

use crate::record::{AgedVehicle, Vehicle};

/// One input record entering the pipeline - sent by the driver to the
/// distributor, one per record in input order.
#[derive(Debug, Clone)]
pub struct SubmitVehicle {
    /// The record to process
    pub vehicle: Vehicle,
}

/// A record dispatched to a single worker for age computation.
#[derive(Debug, Clone)]
pub struct ProcessVehicle {
    /// The record to grade
    pub vehicle: Vehicle,
}

/// A record that passed the worker's filter - sent back to the distributor.
#[derive(Debug, Clone)]
pub struct VehicleAccepted {
    /// The record with its derived age
    pub record: AgedVehicle,
}

/// Store an accepted record in the collector's accumulation.
#[derive(Debug, Clone)]
pub struct StoreRecord {
    /// The record to accumulate
    pub record: AgedVehicle,
}

/// Ask the collector for its full accumulation.
///
/// The collector answers with [`ReportReady`] via the reply envelope, so the
/// response goes to whichever actor sent this message.
#[derive(Debug, Clone)]
pub struct RetrieveAccumulation;

/// The settled, sorted accumulation - sent by the collector to its requester
/// and forwarded by the distributor to the reporter.
#[derive(Debug, Clone)]
pub struct ReportReady {
    /// Accepted records, sorted by age ascending then year descending
    pub records: Vec<AgedVehicle>,
}

/// Sentinel: no further records will be submitted.
///
/// Triggers the worker flush handshake and, once that settles, the final
/// retrieval.
#[derive(Debug, Clone)]
pub struct EndOfInput;

/// Flush request sent to each worker after end of input.
///
/// Workers process their mailbox in order, so handling this message proves
/// every record dispatched to the worker beforehand has been handled.
#[derive(Debug, Clone)]
pub struct FlushWorker;

/// A worker's acknowledgment that its mailbox has drained.
#[derive(Debug, Clone)]
pub struct WorkerFlushed {
    /// Pool index of the worker that flushed
    pub worker: usize,
}

/// Install the actor topology in the distributor.
///
/// Sent by the pipeline builder after spawning all actors, before the
/// distributor handle is handed to the driver.
#[derive(Debug, Clone)]
pub struct RegisterPipeline {
    /// Worker pool handles, in pool order
    pub workers: Vec<ActorHandle>,
    /// The collector handle
    pub collector: ActorHandle,
    /// The reporter handle
    pub reporter: ActorHandle,
}
