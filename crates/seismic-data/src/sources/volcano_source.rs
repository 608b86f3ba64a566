//! Volcano list stored as a JSON array

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::info;

use seismic_core::Volcano;
use crate::DataError;

/// JSON file holding `[{"lat": .., "lng": .., "date": ..}, ...]`
pub struct VolcanoSource {
    path: PathBuf,
}

impl VolcanoSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Volcano>, DataError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(&self) -> Result<Vec<Volcano>, DataError> {
        let file = File::open(&self.path)?;
        let volcanoes = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} volcanoes from {}", volcanoes.len(), self.path.display());
        Ok(volcanoes)
    }
}
