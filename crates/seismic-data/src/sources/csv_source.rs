//! CSV earthquake catalog (USGS column layout)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use chrono::DateTime;
use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use seismic_core::{Dataset, Earthquake};
use super::{parse_number, EarthquakeSource};
use crate::DataError;

/// Column positions resolved from the header row
struct Columns {
    time: usize,
    latitude: usize,
    longitude: usize,
    magnitude: usize,
    depth: Option<usize>,
    place: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let require = |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.to_string()));

        Ok(Self {
            time: require("time")?,
            latitude: require("latitude")?,
            longitude: require("longitude")?,
            magnitude: require("mag")?,
            depth: find("depth"),
            place: find("place"),
        })
    }
}

/// CSV catalog with `time`, `latitude`, `longitude`, `mag` columns and
/// optional `depth` and `place` columns.
///
/// `time` is either RFC 3339 (`2024-01-01T00:00:00.000Z`) or milliseconds
/// since the epoch. Blank or unparsable numbers become NaN; a non-blank time
/// that is neither format is an error.
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Parse a catalog from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::resolve(csv_reader.headers()?)?;

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result?;
            records.push(Self::to_earthquake(&row, &columns)?);
        }
        Ok(records.into())
    }

    fn to_earthquake(row: &StringRecord, columns: &Columns) -> Result<Earthquake, DataError> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let mut eq = Earthquake::new(
            parse_number(field(columns.longitude)),
            parse_number(field(columns.latitude)),
            parse_number(field(columns.magnitude)),
            parse_time(field(columns.time))?,
        );
        if let Some(depth) = columns.depth.map(|idx| parse_number(field(idx))) {
            if !depth.is_nan() {
                eq = eq.with_depth(depth);
            }
        }
        if let Some(place) = columns.place.map(field).filter(|p| !p.is_empty()) {
            eq = eq.with_place(place);
        }
        Ok(eq)
    }
}

impl EarthquakeSource for CsvSource {
    fn load(&self) -> Result<Dataset, DataError> {
        let file = File::open(&self.path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} earthquakes from {}", dataset.len(), self.name);
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Event time in epoch milliseconds
fn parse_time(value: &str) -> Result<f64, DataError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    if let Ok(millis) = value.parse::<f64>() {
        return Ok(millis);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis() as f64)
        .map_err(|_| DataError::InvalidTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seismic_core::FilterParams;

    const CATALOG: &str = "\
time,latitude,longitude,depth,mag,magType,place
2024-01-01T00:00:00.000Z,35.5,-117.6,8.2,3.1,ml,\"5km SW of Ridgecrest, CA\"
1704067260000,19.4,-155.3,,,md,
2024-01-01T00:02:00.500Z,38.3,142.3,30,6.0,mww,
,40.0,-120.0,5.0,2.5,ml,
";

    #[test]
    fn test_parses_usgs_layout() {
        let data = CsvSource::from_reader(CATALOG.as_bytes()).unwrap();
        assert_eq!(data.len(), 4);

        let first = &data[0];
        assert_eq!(first.position(), [-117.6, 35.5]);
        assert_eq!(first.depth, Some(8.2));
        assert_eq!(first.magnitude, 3.1);
        assert_eq!(first.time, 1_704_067_200_000.0);
        assert_eq!(first.place.as_deref(), Some("5km SW of Ridgecrest, CA"));
    }

    #[test]
    fn test_blank_fields() {
        let data = CsvSource::from_reader(CATALOG.as_bytes()).unwrap();
        let second = &data[1];
        assert_eq!(second.time, 1_704_067_260_000.0);
        assert!(second.magnitude.is_nan());
        assert_eq!(second.depth, None);
        assert_eq!(second.place, None);
    }

    #[test]
    fn test_fractional_seconds() {
        let data = CsvSource::from_reader(CATALOG.as_bytes()).unwrap();
        assert_eq!(data[2].time, 1_704_067_320_500.0);
    }

    #[test]
    fn test_blank_time_is_nan() {
        let data = CsvSource::from_reader(CATALOG.as_bytes()).unwrap();
        let last = &data[3];
        assert!(last.time.is_nan());
        assert_eq!(last.magnitude, 2.5);
        assert!(!FilterParams::default().matches(last));
    }

    #[test]
    fn test_missing_required_column() {
        let err = CsvSource::from_reader("time,latitude,longitude\n0,1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref col) if col == "mag"));
    }

    #[test]
    fn test_invalid_time() {
        let err = CsvSource::from_reader("time,latitude,longitude,mag\nyesterday,1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidTime(_)));
    }
}
