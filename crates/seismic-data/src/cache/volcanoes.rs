//! Visible volcanoes selector

use std::sync::Arc;

use seismic_core::{AppState, Volcanoes};

/// Volcanoes to draw for the current layer state.
///
/// While the layer is on the input list itself is returned, so its identity
/// already tracks its contents. While it is off the selector returns one
/// empty list that it keeps for its whole lifetime.
#[derive(Debug, Clone)]
pub struct VolcanoSelector {
    empty: Volcanoes,
}

impl Default for VolcanoSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl VolcanoSelector {
    pub fn new() -> Self {
        Self {
            empty: Arc::from(Vec::new()),
        }
    }

    pub fn get(&self, volcanoes_enabled: bool, volcanoes: &Volcanoes) -> Volcanoes {
        if volcanoes_enabled {
            Arc::clone(volcanoes)
        } else {
            Arc::clone(&self.empty)
        }
    }

    pub fn get_state(&self, state: &AppState) -> Volcanoes {
        self.get(state.volcanoes_enabled(), &state.volcanoes)
    }
}
