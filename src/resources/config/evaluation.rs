use serde::{Deserialize, Serialize};

use crate::components::ForceBasis;
use crate::systems::SideslipSource;

/// Options that shape how each flight condition is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Clear lift history on every surface before it is queried.
    pub clear: bool,
    /// Also drop the stall state when clearing.
    pub reset_stall: bool,
    pub sideslip: SideslipSource,
    /// Take moments about the centre of mass instead of the vehicle origin.
    pub moments_at_center_of_mass: bool,
    pub basis: ForceBasis,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            clear: false,
            reset_stall: false,
            sideslip: SideslipSource::Beta,
            moments_at_center_of_mass: true,
            basis: ForceBasis::default(),
        }
    }
}

impl EvaluationSettings {
    /// Settings for a fresh, history-free evaluation of every point.
    pub fn fresh() -> Self {
        Self {
            clear: true,
            reset_stall: true,
            ..Default::default()
        }
    }
}
