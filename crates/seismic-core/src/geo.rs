//! Geographic points picked on the map

use serde::{Deserialize, Serialize};

/// Closed ring of planar `[x, y]` vertices, the last vertex joining the first
pub type Polygon = Vec<[f64; 2]>;

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Endpoints of the cross-section line, filled in as the user draws it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionPoints {
    points: [Option<LatLng>; 2],
}

impl CrossSectionPoints {
    pub fn new(p1: LatLng, p2: LatLng) -> Self {
        Self {
            points: [Some(p1), Some(p2)],
        }
    }

    /// Point at `index` (0 or 1), if drawn
    pub fn get(&self, index: usize) -> Option<LatLng> {
        self.points.get(index).copied().flatten()
    }

    /// Copy with the point at `index` replaced. Indexes past the second point are ignored.
    pub fn with_point(mut self, index: usize, point: LatLng) -> Self {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = Some(point);
        }
        self
    }

    /// Both endpoints, once the line is complete
    pub fn endpoints(&self) -> Option<(LatLng, LatLng)> {
        Some((self.points[0]?, self.points[1]?))
    }

    /// Number of points drawn so far
    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
