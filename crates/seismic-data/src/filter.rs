//! Magnitude/time filtering pass
//!
//! The pass never copies or drops records. It writes each record's
//! visibility flag in place and hands back a view over the same records in
//! dataset order. Consumers draw a record iff its flag is set.

use std::time::Instant;
use rayon::prelude::*;
use tracing::debug;

use seismic_core::{Dataset, Earthquake, FilterParams};

use crate::config::EvaluationConfig;
use crate::cross_section::point_in_polygon;

/// Result of a filtering pass: the annotated records in dataset order.
///
/// Aliases the records of the dataset it was computed from, so a later
/// pass over the same dataset is visible through this view as well.
#[derive(Debug, Clone, Default)]
pub struct FilteredEarthquakes {
    source: Option<Dataset>,
}

impl FilteredEarthquakes {
    /// A result holding no records
    pub fn empty() -> Self {
        Self { source: None }
    }

    fn of(dataset: &Dataset) -> Self {
        Self {
            source: Some(dataset.clone()),
        }
    }

    pub fn as_slice(&self) -> &[Earthquake] {
        self.source.as_deref().unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Earthquake> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Records whose flag is currently set
    pub fn visible(&self) -> impl Iterator<Item = &Earthquake> {
        self.iter().filter(|eq| eq.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Snapshot of the current flags, index-aligned with the records
    pub fn visibility_mask(&self) -> Vec<bool> {
        self.iter().map(Earthquake::is_visible).collect()
    }

    /// Whether this result shares its records with `dataset`
    pub fn aliases(&self, dataset: &Dataset) -> bool {
        self.source.as_ref().is_some_and(|source| source.ptr_eq(dataset))
    }
}

impl<'a> IntoIterator for &'a FilteredEarthquakes {
    type Item = &'a Earthquake;
    type IntoIter = std::slice::Iter<'a, Earthquake>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Runs the filtering pass according to an [`EvaluationConfig`]
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Annotate every record and return a new view over the dataset.
    ///
    /// A record is visible when it passes the range filters and, if a
    /// polygon is given, its `[lng, lat]` position lies inside the polygon.
    /// Large datasets are annotated on the rayon pool; record order is the
    /// dataset order either way.
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        params: &FilterParams,
        polygon: Option<&[[f64; 2]]>,
    ) -> FilteredEarthquakes {
        let start = Instant::now();
        let parallel = self.config.is_parallel(dataset.len());

        if parallel {
            dataset.records().par_iter().for_each(|eq| annotate(eq, params, polygon));
        } else {
            dataset.records().iter().for_each(|eq| annotate(eq, params, polygon));
        }

        let result = FilteredEarthquakes::of(dataset);
        if self.config.log_timings && tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                records = result.len(),
                visible = result.visible_count(),
                polygon = polygon.is_some(),
                parallel,
                elapsed_us = start.elapsed().as_micros() as u64,
                "eq filtering"
            );
        }
        result
    }
}

/// Run the pass with the default configuration and no polygon
pub fn evaluate(dataset: &Dataset, params: &FilterParams) -> FilteredEarthquakes {
    Evaluator::default().evaluate(dataset, params, None)
}

fn annotate(eq: &Earthquake, params: &FilterParams, polygon: Option<&[[f64; 2]]>) {
    let mut visible = params.matches(eq);
    if visible {
        if let Some(polygon) = polygon {
            visible = point_in_polygon(eq.position(), polygon);
        }
    }
    eq.set_visible(visible);
}
