use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::components::CoefficientResult;
use crate::resources::{EvaluationSettings, SweepConfig};
use crate::systems::SweepPoint;
use crate::utils::ConfigError;

/// Coefficient dump written out after a sweep or single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub vehicle: String,
    pub sweep: SweepConfig,
    pub settings: EvaluationSettings,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    pub fn new(
        vehicle: impl Into<String>,
        sweep: SweepConfig,
        settings: EvaluationSettings,
        points: Vec<SweepPoint>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            vehicle: vehicle.into(),
            sweep,
            settings,
            points,
        }
    }

    pub fn coefficients(&self) -> impl Iterator<Item = &CoefficientResult> {
        self.points.iter().map(|p| &p.coefficients)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}
