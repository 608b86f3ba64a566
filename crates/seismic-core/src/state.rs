//! Application state snapshot
//!
//! `AppState` is persistent: every setter returns a new snapshot and leaves
//! the receiver untouched. Fields that a setter does not touch keep their
//! `Arc` identity, and a setter that writes the value already stored keeps
//! the identity of that field too. Downstream caches rely on this to detect
//! change with pointer comparison alone.

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::earthquake::Dataset;
use crate::filters::FilterParams;
use crate::geo::{CrossSectionPoints, LatLng};
use crate::volcano::{Volcano, Volcanoes};

/// Toggleable data layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Earthquakes,
    Volcanoes,
}

/// Which data layers are switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSet {
    pub earthquakes: bool,
    pub volcanoes: bool,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self {
            earthquakes: true,
            volcanoes: false,
        }
    }
}

impl LayerSet {
    pub fn is_enabled(&self, layer: Layer) -> bool {
        match layer {
            Layer::Earthquakes => self.earthquakes,
            Layer::Volcanoes => self.volcanoes,
        }
    }

    fn set(&mut self, layer: Layer, enabled: bool) {
        match layer {
            Layer::Earthquakes => self.earthquakes = enabled,
            Layer::Volcanoes => self.volcanoes = enabled,
        }
    }
}

/// The main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Layer switches
    pub layers: Arc<LayerSet>,

    /// Earthquakes received from the catalog
    pub earthquakes: Dataset,

    /// Current filter parameters
    pub filters: Arc<FilterParams>,

    /// Cross-section line drawn by the user
    pub cross_section_points: Arc<CrossSectionPoints>,

    /// Known volcanoes
    pub volcanoes: Volcanoes,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create the initial state: no data, default filters
    pub fn new() -> Self {
        Self {
            layers: Arc::new(LayerSet::default()),
            earthquakes: Dataset::empty(),
            filters: Arc::new(FilterParams::default()),
            cross_section_points: Arc::new(CrossSectionPoints::default()),
            volcanoes: Arc::from(Vec::new()),
        }
    }

    /// Whether the earthquake layer is switched on
    pub fn earthquakes_enabled(&self) -> bool {
        self.layers.earthquakes
    }

    /// Whether the volcano layer is switched on
    pub fn volcanoes_enabled(&self) -> bool {
        self.layers.volcanoes
    }

    /// Replace the earthquake data.
    ///
    /// The time filter is reset to span the new data exactly, from the
    /// earliest to the latest event. Bounds are exclusive, so those two
    /// events start out hidden. An empty dataset leaves the filters alone.
    pub fn receive_earthquakes(&self, earthquakes: Dataset) -> Self {
        let state = Self {
            earthquakes,
            ..self.clone()
        };
        match state.earthquakes.time_range() {
            Some((min_time, max_time)) => state.update_filters(|f| {
                f.min_time = min_time;
                f.max_time = max_time;
            }),
            None => state,
        }
    }

    /// Replace the volcano list
    pub fn receive_volcanoes(&self, volcanoes: Vec<Volcano>) -> Self {
        Self {
            volcanoes: volcanoes.into(),
            ..self.clone()
        }
    }

    pub fn set_min_magnitude(&self, value: f64) -> Self {
        self.update_filters(|f| f.min_magnitude = value)
    }

    pub fn set_max_magnitude(&self, value: f64) -> Self {
        self.update_filters(|f| f.max_magnitude = value)
    }

    pub fn set_min_time(&self, value: f64) -> Self {
        self.update_filters(|f| f.min_time = value)
    }

    pub fn set_max_time(&self, value: f64) -> Self {
        self.update_filters(|f| f.max_time = value)
    }

    pub fn set_cross_section_enabled(&self, enabled: bool) -> Self {
        self.update_filters(|f| f.cross_section = enabled)
    }

    /// Switch a layer on or off
    pub fn set_layer(&self, layer: Layer, enabled: bool) -> Self {
        let mut layers = *self.layers;
        layers.set(layer, enabled);
        if layers == *self.layers {
            return self.clone();
        }
        Self {
            layers: Arc::new(layers),
            ..self.clone()
        }
    }

    /// Set one endpoint (0 or 1) of the cross-section line
    pub fn set_cross_section_point(&self, index: usize, point: LatLng) -> Self {
        let points = self.cross_section_points.with_point(index, point);
        if points == *self.cross_section_points {
            return self.clone();
        }
        Self {
            cross_section_points: Arc::new(points),
            ..self.clone()
        }
    }

    /// Remove both cross-section endpoints
    pub fn clear_cross_section(&self) -> Self {
        if self.cross_section_points.is_empty() {
            return self.clone();
        }
        Self {
            cross_section_points: Arc::new(CrossSectionPoints::default()),
            ..self.clone()
        }
    }

    fn update_filters(&self, edit: impl FnOnce(&mut FilterParams)) -> Self {
        let mut filters = *self.filters;
        edit(&mut filters);
        if filters == *self.filters {
            return self.clone();
        }
        Self {
            filters: Arc::new(filters),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earthquake::Earthquake;

    fn same_inputs(a: &AppState, b: &AppState) -> (bool, bool, bool, bool) {
        (
            Arc::ptr_eq(&a.layers, &b.layers),
            a.earthquakes.ptr_eq(&b.earthquakes),
            Arc::ptr_eq(&a.filters, &b.filters),
            Arc::ptr_eq(&a.cross_section_points, &b.cross_section_points),
        )
    }

    #[test]
    fn test_filter_setter_changes_only_filters() {
        let state = AppState::new();
        let next = state.set_min_magnitude(3.0);

        assert_eq!(same_inputs(&state, &next), (true, true, false, true));
        assert_eq!(next.filters.min_magnitude, 3.0);
        assert_eq!(state.filters.min_magnitude, 0.0);
    }

    #[test]
    fn test_setting_same_value_keeps_identity() {
        let state = AppState::new();
        let next = state
            .set_max_magnitude(10.0)
            .set_layer(Layer::Earthquakes, true)
            .clear_cross_section();

        assert_eq!(same_inputs(&state, &next), (true, true, true, true));
    }

    #[test]
    fn test_layer_toggle_changes_only_layers() {
        let state = AppState::new();
        let next = state.set_layer(Layer::Earthquakes, false);

        assert_eq!(same_inputs(&state, &next), (false, true, true, true));
        assert!(!next.earthquakes_enabled());
        assert!(next.layers.is_enabled(Layer::Earthquakes) == next.earthquakes_enabled());
    }

    #[test]
    fn test_cross_section_point_changes_only_points() {
        let state = AppState::new();
        let next = state.set_cross_section_point(0, LatLng::new(10.0, 20.0));

        assert_eq!(same_inputs(&state, &next), (true, true, true, false));
        assert_eq!(next.cross_section_points.get(0), Some(LatLng::new(10.0, 20.0)));
    }

    #[test]
    fn test_receive_earthquakes_spans_time_filter() {
        let data = Dataset::new(vec![
            Earthquake::new(0.0, 0.0, 3.0, 500.0),
            Earthquake::new(0.0, 0.0, 3.0, 100.0),
            Earthquake::new(0.0, 0.0, 3.0, 900.0),
        ]);
        let state = AppState::new().receive_earthquakes(data.clone());

        assert!(state.earthquakes.ptr_eq(&data));
        assert_eq!(state.filters.min_time, 100.0);
        assert_eq!(state.filters.max_time, 900.0);
    }

    #[test]
    fn test_receive_empty_earthquakes_keeps_filters() {
        let state = AppState::new();
        let next = state.receive_earthquakes(Dataset::empty());

        assert!(Arc::ptr_eq(&state.filters, &next.filters));
        assert!(!state.earthquakes.ptr_eq(&next.earthquakes));
    }

    #[test]
    fn test_receive_volcanoes() {
        let state = AppState::new().receive_volcanoes(vec![Volcano::new(19.4, -155.3)]);
        assert_eq!(state.volcanoes.len(), 1);
        assert!(!state.volcanoes_enabled());
    }
}
