//! Acton-reactive actors for the record pipeline.
//!
//! ```text
//! SubmitVehicle xM, EndOfInput -> Distributor
//!   ├─ ProcessVehicle -> Worker[cursor], cursor = (cursor + 1) mod N
//!   │    └─ VehicleAccepted -> Distributor (filter survivors only)
//!   │         └─ StoreRecord -> Collector (append + re-sort)
//!   ├─ on EndOfInput: FlushWorker -> every Worker
//!   │    └─ WorkerFlushed -> Distributor (counted)
//!   ├─ when all flushed: RetrieveAccumulation -> Collector (via new_envelope)
//!   │    └─ ReportReady <- Collector (via reply_envelope)
//!   └─ ReportReady -> Reporter -> ReportSink + completion channel
//! ```
//!
//! Every actor processes its mailbox one message at a time; mailbox order is
//! the only synchronization in the pipeline. The flush handshake makes
//! "retrieval follows every store" depend only on per-pair FIFO delivery.

mod collector;
mod distributor;
mod reporter;
mod worker;

pub use collector::{CollectorActor, CollectorState};
pub use distributor::{DistributorActor, DistributorState};
pub use reporter::{ReporterActor, ReporterState};
pub use worker::{WorkerActor, WorkerState};
