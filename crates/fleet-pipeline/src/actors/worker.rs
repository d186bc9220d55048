//! WorkerActor: stateless age computation and threshold filtering.
//!
//! A worker carries no state across messages - each `ProcessVehicle` is a
//! pure function of the record and the reference year, plus one conditional
//! send. The `FlushWorker` handler exists only for the settlement handshake.

use acton_reactive::prelude::*;
use tracing::debug;

use crate::messages::{FlushWorker, ProcessVehicle, VehicleAccepted, WorkerFlushed};
use crate::record::{AgedVehicle, vehicle_age};

/// Actor state for a worker.
#[derive(Default, Clone)]
pub struct WorkerState {
    /// Pool index, for logs and flush acknowledgments
    pub index: usize,
    /// Reference year for the age computation
    pub reference_year: i32,
    /// Records aged at or above this limit are dropped
    pub age_limit: i32,
    /// Handle to the distributor for sending accepted records upstream
    pub distributor: Option<ActorHandle>,
}

impl std::fmt::Debug for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerState")
            .field("index", &self.index)
            .field("reference_year", &self.reference_year)
            .field("age_limit", &self.age_limit)
            .finish()
    }
}

/// A filtering worker in the distributor's pool.
///
/// Handles:
/// - `ProcessVehicle` - compute the derived age, forward survivors upstream
/// - `FlushWorker` - acknowledge that everything dispatched earlier is done
pub struct WorkerActor {
    /// Pool index
    pub index: usize,
    /// Reference year for the age computation
    pub reference_year: i32,
    /// Filter threshold
    pub age_limit: i32,
    /// Handle to the distributor
    pub distributor: ActorHandle,
}

impl WorkerActor {
    /// Create a new worker.
    pub fn new(index: usize, reference_year: i32, age_limit: i32, distributor: ActorHandle) -> Self {
        Self {
            index,
            reference_year,
            age_limit,
            distributor,
        }
    }

    /// Spawn this worker in the given runtime.
    pub async fn spawn(self, runtime: &mut ActorRuntime) -> ActorHandle {
        let mut actor =
            runtime.new_actor_with_name::<WorkerState>(format!("Worker:{}", self.index));

        actor.model.index = self.index;
        actor.model.reference_year = self.reference_year;
        actor.model.age_limit = self.age_limit;
        actor.model.distributor = Some(self.distributor);

        configure_handlers(&mut actor);

        actor.start().await
    }
}

/// Configure message handlers for the worker.
///
/// Both handlers use `mutate_on`: the flush acknowledgment must not overtake
/// an in-flight record, so the mailbox has to be processed strictly in order.
fn configure_handlers(actor: &mut ManagedActor<Idle, WorkerState>) {
    actor.mutate_on::<ProcessVehicle>(|actor, context| {
        let vehicle = context.message().vehicle.clone();
        let age = vehicle_age(&vehicle, actor.model.reference_year);

        if age >= actor.model.age_limit {
            debug!(
                worker = actor.model.index,
                make = %vehicle.make,
                age,
                "Record dropped by filter"
            );
            return Reply::ready();
        }

        let Some(distributor) = actor.model.distributor.clone() else {
            tracing::warn!(worker = actor.model.index, "Worker: distributor not set");
            return Reply::ready();
        };

        let record = AgedVehicle { vehicle, age };
        Reply::pending(async move {
            distributor.send(VehicleAccepted { record }).await;
        })
    });

    actor.mutate_on::<FlushWorker>(|actor, _context| {
        let index = actor.model.index;

        let Some(distributor) = actor.model.distributor.clone() else {
            tracing::warn!(worker = index, "Worker: distributor not set");
            return Reply::ready();
        };

        debug!(worker = index, "Worker flushed");
        Reply::pending(async move {
            distributor.send(WorkerFlushed { worker: index }).await;
        })
    });
}
