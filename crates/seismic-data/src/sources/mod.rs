//! Catalog sources that build earthquake and volcano lists from files

pub mod csv_source;
pub mod geojson_source;
pub mod volcano_source;

pub use csv_source::CsvSource;
pub use geojson_source::GeoJsonSource;
pub use volcano_source::VolcanoSource;

use seismic_core::Dataset;
use crate::DataError;

/// Trait for earthquake catalogs
pub trait EarthquakeSource: Send + Sync {
    /// Read the whole catalog into a new dataset
    fn load(&self) -> Result<Dataset, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}

/// Parse an optional numeric field; blanks and garbage become NaN
pub(crate) fn parse_number(value: &str) -> f64 {
    value.trim().parse().unwrap_or(f64::NAN)
}
