//! ReporterActor: terminal actor that hands the accumulation to the sink.
//!
//! Formatting and persistence live behind the [`ReportSink`] trait; the
//! reporter's only obligation is to call it exactly once per run. An mpsc
//! bridge lets the batch driver await completion of the run.

use std::sync::Arc;

use acton_reactive::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::messages::ReportReady;
use crate::record::AgedVehicle;
use crate::report::ReportSink;

/// Actor state for the reporter.
#[derive(Default, Clone)]
pub struct ReporterState {
    /// The output collaborator
    sink: Option<Arc<dyn ReportSink>>,
    /// Completion bridge back to the driver
    completion: Option<mpsc::Sender<Vec<AgedVehicle>>>,
    /// Latch: the sink is invoked at most once per run
    delivered: bool,
}

impl std::fmt::Debug for ReporterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterState")
            .field("sink", &self.sink.as_ref().map(|s| s.name()))
            .field("delivered", &self.delivered)
            .finish()
    }
}

/// Terminal actor of the pipeline.
pub struct ReporterActor {
    /// The output collaborator
    pub sink: Arc<dyn ReportSink>,
    /// Optional completion bridge back to the driver
    pub completion: Option<mpsc::Sender<Vec<AgedVehicle>>>,
}

impl ReporterActor {
    /// Create a new reporter.
    pub fn new(
        sink: Arc<dyn ReportSink>,
        completion: Option<mpsc::Sender<Vec<AgedVehicle>>>,
    ) -> Self {
        Self { sink, completion }
    }

    /// Spawn the reporter in the given runtime.
    pub async fn spawn(self, runtime: &mut ActorRuntime) -> ActorHandle {
        let mut actor = runtime.new_actor_with_name::<ReporterState>("Reporter".to_string());

        actor.model.sink = Some(self.sink);
        actor.model.completion = self.completion;

        actor.mutate_on::<ReportReady>(|actor, context| {
            if actor.model.delivered {
                warn!("Reporter: report already delivered, ignoring");
                return Reply::ready();
            }
            actor.model.delivered = true;

            let records = context.message().records.clone();

            if let Some(sink) = actor.model.sink.as_ref() {
                match sink.deliver(&records) {
                    Ok(()) => {
                        info!(sink = sink.name(), records = records.len(), "Report delivered");
                    }
                    Err(e) => {
                        warn!(sink = sink.name(), error = %e, "Report delivery failed");
                    }
                }
            }

            let completion = actor.model.completion.clone();
            Reply::pending(async move {
                if let Some(tx) = completion {
                    // Ignore send errors - the driver may have gone away
                    let _ = tx.send(records).await;
                }
            })
        });

        actor.start().await
    }
}
