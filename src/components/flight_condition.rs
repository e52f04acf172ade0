use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::BodyAxes;

/// A single flight condition at which the coefficients are evaluated.
///
/// Every field is required; sweep generation is the only place where defaults
/// are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightCondition {
    /// Angle of attack in degrees.
    pub alpha: f64,
    /// Sideslip angle in degrees.
    pub beta: f64,
    /// Body roll rate (rad/s against a unit free-stream speed).
    pub roll_rate: f64,
    /// Body pitch rate (rad/s against a unit free-stream speed).
    pub pitch_rate: f64,
    /// Body yaw rate (rad/s against a unit free-stream speed).
    pub yaw_rate: f64,
    /// Free-stream Mach number.
    pub mach: f64,
    /// Normalised pitch control input in [-1, 1].
    pub pitch_input: f64,
    /// Normalised yaw control input in [-1, 1].
    pub yaw_input: f64,
    /// Normalised roll control input in [-1, 1].
    pub roll_input: f64,
    /// Discrete flap detent.
    pub flap_setting: i32,
    /// Spoilers deployed.
    pub spoilers: bool,
}

impl FlightCondition {
    /// Angular velocity vector: roll about forward, pitch about right, yaw about up.
    pub fn angular_velocity(&self, axes: &BodyAxes) -> Vector3<f64> {
        axes.forward * self.roll_rate + axes.right * self.pitch_rate + axes.up * self.yaw_rate
    }

    pub fn is_finite(&self) -> bool {
        [
            self.alpha,
            self.beta,
            self.roll_rate,
            self.pitch_rate,
            self.yaw_rate,
            self.mach,
            self.pitch_input,
            self.yaw_input,
            self.roll_input,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Control state pushed into a controllable surface before its force query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub center_of_mass: Vector3<f64>,
    pub local_velocity: Vector3<f64>,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub flap_setting: i32,
    pub spoilers: bool,
}
