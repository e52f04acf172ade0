mod evaluation;
mod sweep;
mod vehicle;

pub use evaluation::EvaluationSettings;
pub use sweep::{SweepAxis, SweepConfig, SweepRange};
pub use vehicle::{SectionConfig, SurfaceConfig, VehicleConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::ConfigError;

/// Top-level configuration of a coefficient dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    pub sweep: SweepConfig,
    pub evaluation: EvaluationSettings,
}

impl DumpConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        if config.sweep.max_grid_points == 0 {
            return Err(ConfigError::ValidationError(
                "max_grid_points must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// `<config dir>/aerodump/dump.yaml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aerodump").join("dump.yaml"))
    }

    /// Loads the file at the default path, or falls back to defaults when
    /// there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
