//! Earthquake records and the shared dataset that holds them
//!
//! Records are annotated in place: the filtering pass writes each record's
//! visibility flag through a shared reference instead of copying the record.
//! Every holder of a `Dataset` clone (and every filtered result built from
//! it) observes the latest flag. Records are therefore not value types.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One geolocated, timestamped seismic event
#[derive(Debug)]
pub struct Earthquake {
    /// Longitude in degrees
    pub longitude: f64,

    /// Latitude in degrees
    pub latitude: f64,

    /// Hypocenter depth in kilometers, when the source reports one
    pub depth: Option<f64>,

    /// Magnitude, NaN when unknown
    pub magnitude: f64,

    /// Event time in milliseconds since the Unix epoch, NaN when unknown
    pub time: f64,

    /// Human readable location description
    pub place: Option<String>,

    /// Output of the last filtering pass
    visible: AtomicBool,
}

impl Earthquake {
    /// Create a record that is not yet visible
    pub fn new(longitude: f64, latitude: f64, magnitude: f64, time: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth: None,
            magnitude,
            time,
            place: None,
            visible: AtomicBool::new(false),
        }
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    /// Planar position as `[lng, lat]`
    pub fn position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Coordinates in GeoJSON order: `[lng, lat]` or `[lng, lat, depth]`
    pub fn coordinates(&self) -> Vec<f64> {
        match self.depth {
            Some(depth) => vec![self.longitude, self.latitude, depth],
            None => vec![self.longitude, self.latitude],
        }
    }

    /// Whether the last filtering pass marked this record visible
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Overwrite the visibility flag.
    ///
    /// Takes `&self` so that a record shared through a `Dataset` can be
    /// annotated by any holder, including worker threads.
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }
}

/// Cloning produces an independent record carrying the current flag.
impl Clone for Earthquake {
    fn clone(&self) -> Self {
        Self {
            longitude: self.longitude,
            latitude: self.latitude,
            depth: self.depth,
            magnitude: self.magnitude,
            time: self.time,
            place: self.place.clone(),
            visible: AtomicBool::new(self.is_visible()),
        }
    }
}

/// Immutable, shared sequence of earthquakes.
///
/// Identity is the identity of the underlying allocation: clones of a
/// `Dataset` compare equal under [`Dataset::ptr_eq`], while a dataset built
/// from a new vector never does, even with identical contents. Replace the
/// dataset whenever its records change so that identity tracks content.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Earthquake]>,
}

impl Dataset {
    pub fn new(records: Vec<Earthquake>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Reference identity comparison
    pub fn ptr_eq(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    pub fn records(&self) -> &[Earthquake] {
        &self.records
    }

    /// Earliest and latest event times, ignoring unknown times
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|eq| eq.time)
            .filter(|t| !t.is_nan())
            .fold(None, |range, t| match range {
                None => Some((t, t)),
                Some((min, max)) => Some((min.min(t), max.max(t))),
            })
    }

    /// Copy-on-write edit: clones the records into a new dataset with a new identity
    pub fn with_records(&self, edit: impl FnOnce(&mut Vec<Earthquake>)) -> Self {
        let mut records = self.records.to_vec();
        edit(&mut records);
        Self::new(records)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Dataset {
    type Target = [Earthquake];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<Earthquake>> for Dataset {
    fn from(records: Vec<Earthquake>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Earthquake> for Dataset {
    fn from_iter<I: IntoIterator<Item = Earthquake>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
