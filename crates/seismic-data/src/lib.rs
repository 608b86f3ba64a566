//! Earthquake filtering pipeline for the seismic explorer

pub mod cache;
pub mod config;
pub mod cross_section;
pub mod filter;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use cache::{CacheStats, FilterCache, SharedFilterCache, VolcanoSelector};
pub use config::EvaluationConfig;
pub use cross_section::{derive_rectangle, point_in_polygon, rectangle_for};
pub use filter::{evaluate, Evaluator, FilteredEarthquakes};
pub use sources::{CsvSource, EarthquakeSource, GeoJsonSource, VolcanoSource};

/// Errors that can occur while loading catalogs or configuration
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
