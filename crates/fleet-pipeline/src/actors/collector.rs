//! CollectorActor: sole owner of the sorted accumulation.
//!
//! All mutation goes through `StoreRecord` handlers, which the mailbox
//! serializes one at a time - the sort-on-every-insert approach needs no
//! other locking. Retrieval is a read: the collector answers via the reply
//! envelope and keeps its accumulation, so it can serve further traffic.

use acton_reactive::prelude::*;
use tracing::debug;

use crate::messages::{ReportReady, RetrieveAccumulation, StoreRecord};
use crate::record::{AgedVehicle, accumulation_order};

/// Actor state for the collector.
#[derive(Default, Clone)]
pub struct CollectorState {
    /// Accepted records, kept sorted by [`accumulation_order`]
    records: Vec<AgedVehicle>,
}

impl std::fmt::Debug for CollectorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorState")
            .field("records", &self.records.len())
            .finish()
    }
}

/// The stateful accumulation actor.
///
/// Handles:
/// - `StoreRecord` - append and re-sort, no reply
/// - `RetrieveAccumulation` - answer the requester with `ReportReady`
pub struct CollectorActor;

impl CollectorActor {
    /// Spawn the collector in the given runtime.
    pub async fn spawn(runtime: &mut ActorRuntime) -> ActorHandle {
        let mut actor = runtime.new_actor_with_name::<CollectorState>("Collector".to_string());

        actor.mutate_on::<StoreRecord>(|actor, context| {
            let record = context.message().record.clone();
            actor.model.records.push(record);
            // Stable sort: equal (age, year) pairs keep arrival order.
            actor.model.records.sort_by(accumulation_order);

            debug!(records = actor.model.records.len(), "Record stored");
            Reply::ready()
        });

        actor.act_on::<RetrieveAccumulation>(|actor, context| {
            let records = actor.model.records.clone();
            let reply_envelope = context.reply_envelope();

            debug!(records = records.len(), "Accumulation retrieved");
            Reply::pending(async move {
                reply_envelope.send(ReportReady { records }).await;
            })
        });

        actor.start().await
    }
}
