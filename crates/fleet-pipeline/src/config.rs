//! Configuration for the pipeline.

use serde::Deserialize;

/// Pipeline configuration.
///
/// Consumed as plain values at pipeline construction time; the binary builds
/// it from CLI flags, but it also deserializes from TOML/JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of worker actors in the pool
    pub worker_count: usize,

    /// Records whose derived age is at or above this limit are dropped
    pub age_limit: i32,

    /// Reference year for the age computation. `None` resolves to the
    /// current calendar year when the pipeline is built.
    #[serde(default)]
    pub reference_year: Option<i32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            age_limit: 26,
            reference_year: None,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration before any actor is spawned.
    ///
    /// An empty worker pool has no defined routing behavior, so it is
    /// rejected here rather than handled downstream.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.worker_count == 0 {
            anyhow::bail!("worker_count must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.age_limit, 26);
        assert_eq!(config.reference_year, None);
    }

    #[test]
    fn empty_worker_pool_is_rejected() {
        let config = PipelineConfig {
            worker_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
