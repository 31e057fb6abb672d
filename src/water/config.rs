//! Aggregate water configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::reflection::ReflectionSettings;
use crate::ripple::SimulationConfig;
use crate::surface::SurfaceConfig;

/// Everything needed to set up one water body
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub surface: SurfaceConfig,
    pub simulation: SimulationConfig,
    pub reflection: ReflectionSettings,
}

impl WaterConfig {
    pub fn validate(&self) -> Result<()> {
        self.surface.validate()?;
        self.simulation.validate()?;
        self.reflection.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded water config from {}", path.display());
        Ok(config)
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}
