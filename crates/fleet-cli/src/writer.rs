//! Plain-text report writer.
//!
//! Renders the original input batch and the final processed records as two
//! fixed-width tables and writes them to the output path in one shot.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fleet_pipeline::{AgedVehicle, ReportSink, Vehicle};
use tracing::info;

const INPUT_RULE: usize = 32;
const OUTPUT_RULE: usize = 37;

/// Report sink that writes both tables to a text file.
///
/// Holds a copy of the original input so the report can show what went in
/// next to what came out.
pub struct TextReportWriter {
    path: PathBuf,
    input: Vec<Vehicle>,
}

impl TextReportWriter {
    /// Create a writer for the given output path and input batch.
    pub fn new(path: PathBuf, input: Vec<Vehicle>) -> Self {
        Self { path, input }
    }
}

impl ReportSink for TextReportWriter {
    fn name(&self) -> &str {
        "text-report"
    }

    fn deliver(&self, records: &[AgedVehicle]) -> Result<()> {
        let report = render_report(&self.input, records);
        fs::write(&self.path, report)
            .with_context(|| format!("failed to write report to {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            input = self.input.len(),
            accepted = records.len(),
            "Report written"
        );
        Ok(())
    }
}

/// Render the full two-table report.
pub fn render_report(input: &[Vehicle], records: &[AgedVehicle]) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(INPUT_RULE));
    lines.push(format!("|{:^30}|", "INPUT DATA"));
    lines.push("=".repeat(INPUT_RULE));
    lines.push(format!("|{:<13}| {:>4}|{:>10}|", "Make", "Year", "Mileage"));
    lines.push("=".repeat(INPUT_RULE));
    for vehicle in input {
        lines.push(input_row(vehicle));
    }
    lines.push("=".repeat(INPUT_RULE));

    lines.push(String::new());

    lines.push("=".repeat(OUTPUT_RULE));
    lines.push(format!("|{:^35}|", "OUTPUT DATA"));
    lines.push("=".repeat(OUTPUT_RULE));
    lines.push(format!(
        "|{:<13}| {:>4}|{:>10}|{:>4}|",
        "Make", "Year", "Mileage", "Age"
    ));
    lines.push("=".repeat(OUTPUT_RULE));
    for record in records {
        lines.push(output_row(record));
    }
    lines.push("=".repeat(OUTPUT_RULE));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn input_row(vehicle: &Vehicle) -> String {
    format!(
        "|{:<13}| {:>4}|{:>10}|",
        vehicle.make, vehicle.year, vehicle.mileage
    )
}

fn output_row(record: &AgedVehicle) -> String {
    format!(
        "|{:<13}| {:>4}|{:>10}|{:>4}|",
        record.vehicle.make, record.vehicle.year, record.vehicle.mileage, record.age
    )
}
