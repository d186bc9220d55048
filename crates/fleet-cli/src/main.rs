//! Fleet report CLI.
//!
//! Loads a JSON batch of vehicle records, runs it through the actor
//! pipeline, and writes a plain-text report with the original input and the
//! filtered, sorted result.

use std::path::PathBuf;
use std::sync::Arc;

use acton_reactive::prelude::*;
use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use fleet_cli::loader;
use fleet_cli::writer::TextReportWriter;
use fleet_pipeline::messages::{EndOfInput, SubmitVehicle};
use fleet_pipeline::{PipelineBuilder, PipelineConfig};

#[derive(Parser)]
#[command(name = "fleet-cli")]
#[command(version)]
#[command(about = "Filter and rank a batch of vehicle records")]
struct Cli {
    /// Input file: a JSON array of {make, year, mileage} records
    #[arg(long, default_value = "data/vehicles.json")]
    data: PathBuf,

    /// Output file for the text report
    #[arg(long, default_value = "report.txt")]
    output: PathBuf,

    /// Number of worker actors
    #[arg(long, default_value = "4")]
    workers: usize,

    /// Drop records whose derived age is at or above this limit
    #[arg(long, default_value = "26")]
    age_limit: i32,

    /// Override the reference year for the age computation
    /// (defaults to the current calendar year)
    #[arg(long)]
    reference_year: Option<i32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let vehicles = loader::load_vehicles(&cli.data)?;
    let input_count = vehicles.len();
    info!(path = %cli.data.display(), records = input_count, "Input loaded");

    let config = PipelineConfig {
        worker_count: cli.workers,
        age_limit: cli.age_limit,
        reference_year: cli.reference_year,
    };

    let sink = TextReportWriter::new(cli.output.clone(), vehicles.clone());

    let mut runtime = ActonApp::launch_async().await;
    let (tx, mut rx) = tokio::sync::mpsc::channel(1);

    let distributor = PipelineBuilder::new(config, Arc::new(sink))
        .on_complete(tx)
        .spawn(&mut runtime)
        .await?;

    // Submit the batch in input order, then signal end of input
    for vehicle in vehicles {
        distributor.send(SubmitVehicle { vehicle }).await;
    }
    distributor.send(EndOfInput).await;

    let accepted = rx.recv().await.unwrap_or_default();

    println!("\n=== Fleet Report ===");
    println!("Input records: {}", input_count);
    println!("Accepted: {}", accepted.len());
    println!("Dropped: {}", input_count - accepted.len());
    println!("Report written to: {}", cli.output.display());

    let _ = runtime.shutdown_all().await;
    Ok(())
}
