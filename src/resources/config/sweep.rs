use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::FlightCondition;
use crate::utils::{linspace, AeroError, DEFAULT_MAX_GRID_POINTS};

/// The six swept axes, in grid order (Mach outermost, roll innermost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepAxis {
    Mach,
    Alpha,
    Beta,
    Pitch,
    Yaw,
    Roll,
}

impl SweepAxis {
    pub const ALL: [SweepAxis; 6] = [
        SweepAxis::Mach,
        SweepAxis::Alpha,
        SweepAxis::Beta,
        SweepAxis::Pitch,
        SweepAxis::Yaw,
        SweepAxis::Roll,
    ];

    /// Physical limits applied by the input sanitizer.
    pub fn limits(&self) -> (f64, f64) {
        use crate::utils::{ANGLE_LIMITS, CONTROL_LIMITS, MACH_LIMITS};
        match self {
            SweepAxis::Mach => MACH_LIMITS,
            SweepAxis::Alpha | SweepAxis::Beta => ANGLE_LIMITS,
            SweepAxis::Pitch | SweepAxis::Yaw | SweepAxis::Roll => CONTROL_LIMITS,
        }
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SweepAxis::Mach => "mach",
            SweepAxis::Alpha => "alpha",
            SweepAxis::Beta => "beta",
            SweepAxis::Pitch => "pitch",
            SweepAxis::Yaw => "yaw",
            SweepAxis::Roll => "roll",
        };
        f.write_str(name)
    }
}

/// Discretised range of one swept axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    pub count: i64,
}

impl SweepRange {
    pub fn new(min: f64, max: f64, count: i64) -> Self {
        Self { min, max, count }
    }

    /// A single sample at `value`.
    pub fn fixed(value: f64) -> Self {
        Self::new(value, value, 1)
    }

    pub fn validate(&self, axis: SweepAxis) -> Result<(), AeroError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(AeroError::InvalidParameter(format!(
                "{} range bounds must be finite",
                axis
            )));
        }
        if self.min > self.max {
            return Err(AeroError::InvalidRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.count < 1 {
            return Err(AeroError::InvalidGridSize {
                axis,
                count: self.count,
            });
        }
        Ok(())
    }

    /// Sample values; empty when the count is not positive.
    pub fn values(&self) -> Vec<f64> {
        let count = usize::try_from(self.count).unwrap_or(0);
        linspace(self.min, self.max, count)
    }
}

/// Ranges and fixed fields of a coefficient sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub mach: SweepRange,
    pub alpha: SweepRange,
    pub beta: SweepRange,
    pub pitch: SweepRange,
    pub yaw: SweepRange,
    pub roll: SweepRange,
    pub roll_rate: f64,
    pub pitch_rate: f64,
    pub yaw_rate: f64,
    pub flap_setting: i32,
    pub spoilers: bool,
    /// Largest grid accepted before traversal starts.
    pub max_grid_points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            mach: SweepRange::new(0.2, 1.5, 10),
            alpha: SweepRange::new(-5.0, 25.0, 15),
            beta: SweepRange::new(-5.0, 5.0, 10),
            pitch: SweepRange::new(-1.0, 1.0, 20),
            yaw: SweepRange::new(-1.0, 1.0, 20),
            roll: SweepRange::new(-1.0, 1.0, 20),
            roll_rate: 0.0,
            pitch_rate: 0.0,
            yaw_rate: 0.0,
            flap_setting: 0,
            spoilers: false,
            max_grid_points: DEFAULT_MAX_GRID_POINTS,
        }
    }
}

impl SweepConfig {
    pub fn range(&self, axis: SweepAxis) -> &SweepRange {
        match axis {
            SweepAxis::Mach => &self.mach,
            SweepAxis::Alpha => &self.alpha,
            SweepAxis::Beta => &self.beta,
            SweepAxis::Pitch => &self.pitch,
            SweepAxis::Yaw => &self.yaw,
            SweepAxis::Roll => &self.roll,
        }
    }

    pub fn range_mut(&mut self, axis: SweepAxis) -> &mut SweepRange {
        match axis {
            SweepAxis::Mach => &mut self.mach,
            SweepAxis::Alpha => &mut self.alpha,
            SweepAxis::Beta => &mut self.beta,
            SweepAxis::Pitch => &mut self.pitch,
            SweepAxis::Yaw => &mut self.yaw,
            SweepAxis::Roll => &mut self.roll,
        }
    }

    pub fn validate(&self) -> Result<(), AeroError> {
        SweepAxis::ALL
            .iter()
            .try_for_each(|axis| self.range(*axis).validate(*axis))
    }

    /// Product of the six counts, saturating instead of overflowing.
    pub fn point_count(&self) -> u64 {
        SweepAxis::ALL.iter().fold(1u64, |acc, axis| {
            let count = u64::try_from(self.range(*axis).count).unwrap_or(0);
            acc.saturating_mul(count)
        })
    }

    /// Condition with every swept axis at its range minimum.
    pub fn base_condition(&self) -> FlightCondition {
        FlightCondition {
            alpha: self.alpha.min,
            beta: self.beta.min,
            roll_rate: self.roll_rate,
            pitch_rate: self.pitch_rate,
            yaw_rate: self.yaw_rate,
            mach: self.mach.min,
            pitch_input: self.pitch.min,
            yaw_input: self.yaw.min,
            roll_input: self.roll.min,
            flap_setting: self.flap_setting,
            spoilers: self.spoilers,
        }
    }
}
