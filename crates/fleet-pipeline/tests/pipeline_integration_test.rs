//! Integration tests for the full pipeline.
//!
//! Tests the flow of:
//! - SubmitVehicle x M -> round-robin workers -> collector -> reporter
//! - EndOfInput -> flush handshake -> settled retrieval
//! - Exactly-once report delivery
//!
//! A fixed reference year makes classification deterministic; a recording
//! sink plus the completion channel observe the pipeline's output.

use std::sync::{Arc, Mutex};

use acton_reactive::prelude::*;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

use fleet_pipeline::messages::{EndOfInput, SubmitVehicle};
use fleet_pipeline::{AgedVehicle, PipelineBuilder, PipelineConfig, ReportSink, Vehicle};

/// Test helper to build a vehicle record.
fn vehicle(make: &str, year: i32, mileage: u32) -> Vehicle {
    Vehicle {
        make: make.to_string(),
        year,
        mileage,
    }
}

/// Sink double that records every delivery it receives.
#[derive(Default)]
struct RecordingSink {
    deliveries: Mutex<Vec<Vec<AgedVehicle>>>,
}

impl RecordingSink {
    fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

impl ReportSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn deliver(&self, records: &[AgedVehicle]) -> anyhow::Result<()> {
        self.deliveries.lock().unwrap().push(records.to_vec());
        Ok(())
    }
}

/// Run a full batch through a fresh pipeline and return the final records.
async fn run_pipeline(
    config: PipelineConfig,
    vehicles: Vec<Vehicle>,
    sink: Arc<RecordingSink>,
) -> Vec<AgedVehicle> {
    let mut runtime = ActonApp::launch_async().await;
    let (tx, mut rx) = mpsc::channel(1);

    let distributor = PipelineBuilder::new(config, sink)
        .on_complete(tx)
        .spawn(&mut runtime)
        .await
        .expect("pipeline should spawn");

    for vehicle in vehicles {
        distributor.send(SubmitVehicle { vehicle }).await;
    }
    distributor.send(EndOfInput).await;

    let records = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("pipeline should complete")
        .expect("completion channel should deliver");

    runtime.shutdown_all().await.unwrap();
    records
}

fn fixed_year_config(worker_count: usize) -> PipelineConfig {
    PipelineConfig {
        worker_count,
        age_limit: 26,
        reference_year: Some(2024),
    }
}

#[tokio::test]
async fn old_record_rejected_young_record_accepted() {
    let sink = Arc::new(RecordingSink::default());
    let input = vec![
        vehicle("A", 2000, 200_000), // age 24 + 10 = 34, dropped
        vehicle("B", 2020, 10_000),  // age 4 + 0 = 4, kept
    ];

    let records = run_pipeline(fixed_year_config(4), input, sink.clone()).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vehicle.make, "B");
    assert_eq!(records[0].age, 4);
    assert_eq!(sink.delivery_count(), 1, "Report delivered exactly once");
}

#[tokio::test]
async fn accumulation_sorted_by_age_then_year_descending() {
    let sink = Arc::new(RecordingSink::default());
    let input = vec![
        vehicle("C", 2014, 60_000),  // age 10 + 3 = 13
        vehicle("A", 2020, 10_000),  // age 4
        vehicle("D", 2011, 0),       // age 13, older year than C
        vehicle("B", 2016, 20_000),  // age 8 + 1 = 9
        vehicle("E", 2017, 120_000), // age 7 + 6 = 13
    ];

    let records = run_pipeline(fixed_year_config(3), input, sink).await;

    assert_eq!(records.len(), 5);
    for pair in records.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.age < b.age || (a.age == b.age && a.vehicle.year >= b.vehicle.year),
            "sort invariant violated: ({}, {}) before ({}, {})",
            a.age,
            a.vehicle.year,
            b.age,
            b.vehicle.year
        );
    }

    // Equal ages 13: year 2017 (E) before 2014 (C) before 2011 (D)
    let tied: Vec<_> = records
        .iter()
        .filter(|r| r.age == 13)
        .map(|r| r.vehicle.make.as_str())
        .collect();
    assert_eq!(tied, vec!["E", "C", "D"]);
}

#[tokio::test]
async fn completeness_holds_across_pool_sizes() {
    let input: Vec<Vehicle> = (0..20)
        .map(|i| vehicle(&format!("V{i}"), 1995 + i, (i as u32) * 15_000))
        .collect();

    let sink_single = Arc::new(RecordingSink::default());
    let single = run_pipeline(fixed_year_config(1), input.clone(), sink_single).await;

    let sink_pool = Arc::new(RecordingSink::default());
    let pooled = run_pipeline(fixed_year_config(4), input.clone(), sink_pool).await;

    let expected = input
        .iter()
        .filter(|v| fleet_pipeline::vehicle_age(v, 2024) < 26)
        .count();

    assert_eq!(single.len(), expected, "single worker loses or duplicates");
    assert_eq!(pooled.len(), expected, "worker pool loses or duplicates");
    assert_eq!(single, pooled, "accepted set depends on pool size");
}

#[tokio::test]
async fn repeated_runs_are_deterministic() {
    let input = vec![
        vehicle("A", 2010, 90_000),
        vehicle("B", 2018, 40_000),
        vehicle("C", 2005, 10_000),
        vehicle("D", 2018, 40_000),
        vehicle("E", 2022, 5_000),
    ];

    let first_sink = Arc::new(RecordingSink::default());
    let first = run_pipeline(fixed_year_config(2), input.clone(), first_sink).await;

    let second_sink = Arc::new(RecordingSink::default());
    let second = run_pipeline(fixed_year_config(2), input, second_sink).await;

    assert_eq!(first, second, "retrieval observed an unsettled accumulation");
}

#[tokio::test]
async fn all_rejected_input_yields_empty_report() {
    let sink = Arc::new(RecordingSink::default());
    let input = vec![
        vehicle("A", 1980, 300_000),
        vehicle("B", 1975, 500_000),
    ];

    let records = run_pipeline(fixed_year_config(2), input, sink.clone()).await;

    assert!(records.is_empty());
    assert_eq!(sink.delivery_count(), 1, "empty report still delivered");
}

#[tokio::test]
async fn empty_input_completes() {
    let sink = Arc::new(RecordingSink::default());

    let records = run_pipeline(fixed_year_config(4), Vec::new(), sink.clone()).await;

    assert!(records.is_empty());
    assert_eq!(sink.delivery_count(), 1);
}
