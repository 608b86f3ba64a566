//! Volcano records

use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// Shared, immutable volcano list. Identity is the `Arc` allocation.
pub type Volcanoes = Arc<[Volcano]>;

/// A volcano drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volcano {
    pub lat: f64,
    pub lng: f64,

    /// Date of the last known eruption, as reported by the source
    pub date: Option<String>,
}

impl Volcano {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, date: None }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}
