//! Pipeline assembly: spawn the topology and hand back the distributor.
//!
//! ## Usage
//!
//! ```ignore
//! use acton_reactive::prelude::*;
//! use fleet_pipeline::{PipelineBuilder, PipelineConfig};
//! use fleet_pipeline::messages::{EndOfInput, SubmitVehicle};
//!
//! let mut runtime = ActonApp::launch_async().await;
//! let (tx, mut rx) = tokio::sync::mpsc::channel(1);
//!
//! let distributor = PipelineBuilder::new(config, sink)
//!     .on_complete(tx)
//!     .spawn(&mut runtime)
//!     .await?;
//!
//! for vehicle in vehicles {
//!     distributor.send(SubmitVehicle { vehicle }).await;
//! }
//! distributor.send(EndOfInput).await;
//!
//! let accepted = rx.recv().await;
//! ```

use std::sync::Arc;

use acton_reactive::prelude::*;
use anyhow::Result;
use chrono::Datelike;
use tokio::sync::mpsc;
use tracing::info;

use crate::actors::{CollectorActor, DistributorActor, ReporterActor, WorkerActor};
use crate::config::PipelineConfig;
use crate::messages::RegisterPipeline;
use crate::record::AgedVehicle;
use crate::report::ReportSink;

/// Builder for the actor pipeline.
///
/// Spawns the distributor, the worker pool, the collector, and the reporter,
/// then registers the topology with the distributor. Registration is sent
/// before the distributor handle is returned, so it is processed before any
/// record the driver submits.
pub struct PipelineBuilder {
    config: PipelineConfig,
    sink: Arc<dyn ReportSink>,
    completion: Option<mpsc::Sender<Vec<AgedVehicle>>>,
}

impl PipelineBuilder {
    /// Create a new builder for the given configuration and output sink.
    pub fn new(config: PipelineConfig, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            config,
            sink,
            completion: None,
        }
    }

    /// Register a completion channel.
    ///
    /// After the report is delivered, the reporter forwards the final
    /// records here so the driver can await the end of the batch.
    pub fn on_complete(mut self, tx: mpsc::Sender<Vec<AgedVehicle>>) -> Self {
        self.completion = Some(tx);
        self
    }

    /// Spawn the full topology. Returns the distributor's handle.
    pub async fn spawn(self, runtime: &mut ActorRuntime) -> Result<ActorHandle> {
        self.config.validate()?;

        let reference_year = self
            .config
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year());

        let distributor = DistributorActor::spawn(runtime).await;

        let mut workers = Vec::with_capacity(self.config.worker_count);
        for index in 0..self.config.worker_count {
            let worker = WorkerActor::new(
                index,
                reference_year,
                self.config.age_limit,
                distributor.clone(),
            );
            workers.push(worker.spawn(runtime).await);
        }

        let collector = CollectorActor::spawn(runtime).await;
        let reporter = ReporterActor::new(self.sink, self.completion)
            .spawn(runtime)
            .await;

        info!(
            workers = workers.len(),
            age_limit = self.config.age_limit,
            reference_year,
            "Pipeline spawned"
        );

        distributor
            .send(RegisterPipeline {
                workers,
                collector,
                reporter,
            })
            .await;

        Ok(distributor)
    }
}
