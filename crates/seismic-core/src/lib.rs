//! Core types for the seismic explorer
//! 
//! This crate provides the earthquake and volcano records, the filter
//! parameters and the copy-on-write state snapshot that the filtering
//! pipeline in `seismic-data` reads from.

pub mod earthquake;
pub mod filters;
pub mod geo;
pub mod state;
pub mod volcano;

// Re-export commonly used types
pub use earthquake::{Dataset, Earthquake};
pub use filters::FilterParams;
pub use geo::{CrossSectionPoints, LatLng, Polygon};
pub use state::{AppState, Layer, LayerSet};
pub use volcano::{Volcano, Volcanoes};
