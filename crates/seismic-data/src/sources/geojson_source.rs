//! GeoJSON earthquake feed (USGS FeatureCollection layout)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use serde::Deserialize;
use tracing::{info, warn};

use seismic_core::{Dataset, Earthquake};
use super::EarthquakeSource;
use crate::DataError;

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Properties>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

#[derive(Deserialize, Default)]
struct Properties {
    mag: Option<f64>,
    time: Option<f64>,
    place: Option<String>,
}

/// GeoJSON file whose Point features are earthquakes.
///
/// Coordinates are `[lng, lat]` or `[lng, lat, depth]`. A missing or null
/// `mag` or `time` becomes NaN so the record is filtered out rather than
/// rejected. Non-point features are skipped.
pub struct GeoJsonSource {
    path: PathBuf,
    name: String,
}

impl GeoJsonSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Parse a FeatureCollection from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;
        Ok(Self::collect(collection))
    }

    pub fn parse_str(json: &str) -> Result<Dataset, DataError> {
        let collection: FeatureCollection = serde_json::from_str(json)?;
        Ok(Self::collect(collection))
    }

    fn collect(collection: FeatureCollection) -> Dataset {
        let total = collection.features.len();
        let records: Vec<Earthquake> = collection
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(idx, feature)| Self::to_earthquake(idx, feature))
            .collect();
        if records.len() < total {
            warn!("Skipped {} of {} features without a point geometry", total - records.len(), total);
        }
        records.into()
    }

    fn to_earthquake(idx: usize, feature: Feature) -> Option<Earthquake> {
        let geometry = feature.geometry?;
        if geometry.kind != "Point" {
            warn!("Feature {} has {} geometry, expected Point", idx, geometry.kind);
            return None;
        }
        let coords: Vec<f64> = match serde_json::from_value(geometry.coordinates) {
            Ok(coords) => coords,
            Err(e) => {
                warn!("Feature {} has malformed coordinates: {}", idx, e);
                return None;
            }
        };
        if coords.len() < 2 {
            warn!("Feature {} has {} coordinates, expected at least 2", idx, coords.len());
            return None;
        }

        let props = feature.properties.unwrap_or_default();
        let mut eq = Earthquake::new(
            coords[0],
            coords[1],
            props.mag.unwrap_or(f64::NAN),
            props.time.unwrap_or(f64::NAN),
        );
        if let Some(&depth) = coords.get(2) {
            eq = eq.with_depth(depth);
        }
        if let Some(place) = props.place {
            eq = eq.with_place(place);
        }
        Some(eq)
    }
}

impl EarthquakeSource for GeoJsonSource {
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
