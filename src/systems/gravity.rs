use serde::{Deserialize, Serialize};

use crate::utils::AeroError;

/// Point-mass gravitational acceleration `mu / (radius + altitude)^2`.
pub fn gravitational_acceleration(
    radius: f64,
    gravitational_parameter: f64,
    altitude: f64,
) -> Result<f64, AeroError> {
    let distance = radius + altitude;
    if !distance.is_finite() || !gravitational_parameter.is_finite() {
        return Err(AeroError::InvalidParameter(
            "gravity inputs must be finite".to_string(),
        ));
    }
    if distance <= 0.0 {
        return Err(AeroError::InvalidParameter(format!(
            "radius plus altitude must be positive, got {}",
            distance
        )));
    }
    Ok(gravitational_parameter / (distance * distance))
}

/// Radius (m) and gravitational parameter (m^3/s^2) of a central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub radius: f64,
    pub gravitational_parameter: f64,
}

impl CelestialBody {
    pub const EARTH: CelestialBody = CelestialBody {
        radius: 6_371_000.0,
        gravitational_parameter: 3.986_004_418e14,
    };
    pub const MOON: CelestialBody = CelestialBody {
        radius: 1_737_400.0,
        gravitational_parameter: 4.904_869_5e12,
    };
    pub const MARS: CelestialBody = CelestialBody {
        radius: 3_389_500.0,
        gravitational_parameter: 4.282_837e13,
    };

    pub fn gravity_at(&self, altitude: f64) -> Result<f64, AeroError> {
        gravitational_acceleration(self.radius, self.gravitational_parameter, altitude)
    }
}
