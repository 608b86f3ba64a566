//! Tuning knobs for the filtering pass

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::DataError;

/// Datasets at least this large are annotated on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 50_000;

/// Filtering pass configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Minimum number of records before the pass is split across worker threads
    pub parallel_threshold: usize,

    /// Log record counts and elapsed time of every pass at debug level
    pub log_timings: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            log_timings: true,
        }
    }
}

impl EvaluationConfig {
    /// Always evaluate on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(|e| DataError::Config(e.to_string()))
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EvaluationConfig::from_json_str(r#"{"parallel_threshold": 10}"#).unwrap();
        assert_eq!(config.parallel_threshold, 10);
        assert!(config.log_timings);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = EvaluationConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_sequential_never_parallel() {
        let config = EvaluationConfig::sequential();
        assert!(!config.is_parallel(10_000_000));
        assert!(EvaluationConfig::default().is_parallel(DEFAULT_PARALLEL_THRESHOLD));
    }
}
