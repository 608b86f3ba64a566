//! Single-slot memoization of filtered earthquakes
//!
//! The cache remembers the identities of its inputs and the result it
//! produced for them. A call whose inputs are unchanged hands back the very
//! same `Arc`, so consumers can skip redrawing with a pointer comparison.
//! Identity is reference identity; callers must replace an input (new
//! `Arc`, new `Dataset`) whenever its contents change.

mod volcanoes;

pub use volcanoes::VolcanoSelector;

use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, trace};

use seismic_core::{AppState, CrossSectionPoints, Dataset, FilterParams};

use crate::config::EvaluationConfig;
use crate::cross_section::rectangle_for;
use crate::filter::{Evaluator, FilteredEarthquakes};

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered with the remembered result
    pub hits: u64,
    /// Calls that recomputed
    pub misses: u64,
}

/// Inputs of the last recompute and the result produced for them.
///
/// Holding the input `Arc`s keeps their allocations alive, so a freed
/// address can never be reused by a new input and mistaken for the old one.
struct CacheEntry {
    earthquakes_enabled: bool,
    dataset: Dataset,
    filters: Arc<FilterParams>,
    cross_section_points: Arc<CrossSectionPoints>,
    result: Arc<FilteredEarthquakes>,
}

impl CacheEntry {
    fn is_stale(
        &self,
        earthquakes_enabled: bool,
        dataset: &Dataset,
        filters: &Arc<FilterParams>,
        cross_section_points: &Arc<CrossSectionPoints>,
    ) -> bool {
        // Points only matter while cross-section filtering is on; dragging an
        // unused line must not trigger a recompute.
        self.earthquakes_enabled != earthquakes_enabled
            || !self.dataset.ptr_eq(dataset)
            || !Arc::ptr_eq(&self.filters, filters)
            || (filters.cross_section && !Arc::ptr_eq(&self.cross_section_points, cross_section_points))
    }
}

/// Memoized filtering pass owned by the caller
#[derive(Default)]
pub struct FilterCache {
    evaluator: Evaluator,
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

impl FilterCache {
    /// Create an empty cache with the default evaluation settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvaluationConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config),
            ..Self::default()
        }
    }

    /// Filtered earthquakes for the given inputs.
    ///
    /// Recomputes when nothing is remembered yet, when the layer switch,
    /// dataset or filters differ from the remembered ones, or when
    /// cross-section filtering is on and the points differ. Otherwise
    /// returns the remembered result. A disabled layer yields a fresh empty
    /// result and leaves record flags untouched.
    pub fn get(
        &mut self,
        earthquakes_enabled: bool,
        dataset: &Dataset,
        filters: &Arc<FilterParams>,
        cross_section_points: &Arc<CrossSectionPoints>,
    ) -> Arc<FilteredEarthquakes> {
        if let Some(entry) = &self.entry {
            if !entry.is_stale(earthquakes_enabled, dataset, filters, cross_section_points) {
                self.stats.hits += 1;
                trace!(records = entry.result.len(), "filtered earthquakes cache hit");
                return Arc::clone(&entry.result);
            }
        }

        self.stats.misses += 1;
        let result = if earthquakes_enabled {
            let polygon = if filters.cross_section {
                rectangle_for(cross_section_points)
            } else {
                None
            };
            self.evaluator.evaluate(dataset, filters, polygon.as_deref())
        } else {
            debug!("earthquake layer disabled, filtered set is empty");
            FilteredEarthquakes::empty()
        };
        let result = Arc::new(result);

        self.entry = Some(CacheEntry {
            earthquakes_enabled,
            dataset: dataset.clone(),
            filters: Arc::clone(filters),
            cross_section_points: Arc::clone(cross_section_points),
            result: Arc::clone(&result),
        });
        result
    }

    /// Filtered earthquakes for a state snapshot
    pub fn get_state(&mut self, state: &AppState) -> Arc<FilteredEarthquakes> {
        self.get(
            state.earthquakes_enabled(),
            &state.earthquakes,
            &state.filters,
            &state.cross_section_points,
        )
    }

    /// Forget the remembered result; the next call recomputes
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// [`FilterCache`] behind a lock, for hosts that call from several threads.
///
/// The comparison, the recompute and the store happen under one lock, so two
/// callers can never race to fill the slot.
#[derive(Default)]
pub struct SharedFilterCache {
    inner: Mutex<FilterCache>,
}

impl SharedFilterCache {
    pub fn new(cache: FilterCache) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn get(
        &self,
        earthquakes_enabled: bool,
        dataset: &Dataset,
        filters: &Arc<FilterParams>,
        cross_section_points: &Arc<CrossSectionPoints>,
    ) -> Arc<FilteredEarthquakes> {
        self.inner
            .lock()
            .get(earthquakes_enabled, dataset, filters, cross_section_points)
    }

    pub fn get_state(&self, state: &AppState) -> Arc<FilteredEarthquakes> {
        self.inner.lock().get_state(state)
    }

    pub fn invalidate(&self) {
        self.inner.lock().invalidate();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}
