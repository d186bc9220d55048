//! ReportSink trait: the interface to the output collaborator.

use crate::record::AgedVehicle;

/// A sink consumes the final accumulation and renders or persists it.
///
/// The pipeline is presentation-agnostic; all formatting and I/O lives in the
/// `ReportSink` implementation. The reporter actor calls `deliver` exactly
/// once per run, with the records sorted by the collector.
pub trait ReportSink: Send + Sync {
    /// Unique name for this sink, used in logs.
    fn name(&self) -> &str;

    /// Deliver the final sorted records.
    fn deliver(&self, records: &[AgedVehicle]) -> anyhow::Result<()>;
}
