//! Pipeline configuration.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the summarize pipeline.
///
/// Controls how the input is split into chunks and how workers buffer their
/// reads. The defaults target large files on a multi-core machine; tests
/// shrink `min_chunk_size` and `read_buffer_size` to exercise boundary
/// handling on small inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Number of workers. 0 = auto: CPU count minus one, at least 2.
    pub workers: usize,

    /// Minimum chunk size in bytes; inputs smaller than this run with fewer
    /// workers (down to one).
    pub min_chunk_size: u64,

    /// Per-worker read buffer size in bytes.
    pub read_buffer_size: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            min_chunk_size: 1024 * 1024,
            read_buffer_size: 12 * 1024 * 1024,
        }
    }
}

impl SummaryConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective worker count: the configured value, or `max(2, cpus - 1)`
    /// when set to auto.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().saturating_sub(1).max(2)
        } else {
            self.workers
        }
    }

    /// Validates field values before a run.
    pub fn validate(&self) -> Result<()> {
        if self.read_buffer_size == 0 {
            return Err(EngineError::InvalidConfig(
                "read_buffer_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder method to set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder method to set the minimum chunk size.
    pub fn with_min_chunk_size(mut self, bytes: u64) -> Self {
        self.min_chunk_size = bytes;
        self
    }

    /// Builder method to set the read buffer size.
    pub fn with_read_buffer_size(mut self, bytes: usize) -> Self {
        self.read_buffer_size = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SummaryConfig::default();
        assert_eq!(config.workers, 0);
        assert_eq!(config.min_chunk_size, 1024 * 1024);
        assert_eq!(config.read_buffer_size, 12 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_workers_auto_floor() {
        let config = SummaryConfig::default();
        assert!(config.effective_workers() >= 2);
    }

    #[test]
    fn test_explicit_workers_kept() {
        let config = SummaryConfig::new().with_workers(1);
        assert_eq!(config.effective_workers(), 1);
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let config = SummaryConfig::new().with_read_buffer_size(0);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SummaryConfig::new()
            .with_workers(4)
            .with_min_chunk_size(64)
            .with_read_buffer_size(4096);
        assert_eq!(config.workers, 4);
        assert_eq!(config.min_chunk_size, 64);
        assert_eq!(config.read_buffer_size, 4096);
    }
}
