use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::BodyAxes;
use crate::utils::axis_rotation;

/// Angle from which the sideslip rotation takes its trig terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideslipSource {
    #[default]
    Beta,
    /// Reuses the angle of attack for the sideslip rotation. Only useful to
    /// reproduce dumps produced by older tooling.
    Alpha,
}

/// Wind-aligned basis expressed in body coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindFrame {
    /// Body-to-wind rotation, `R_beta * R_alpha`.
    pub rotation: Matrix3<f64>,
    /// Free-stream velocity direction.
    pub forward: Vector3<f64>,
    pub up: Vector3<f64>,
    pub right: Vector3<f64>,
}

/// Builds the wind frame for `alpha` and `beta` in degrees.
///
/// The angle of attack rotates about the body right axis, then the sideslip
/// rotates the result about the body up axis. A positive alpha tilts the
/// velocity below the nose; a positive beta moves it to the right.
pub fn build_wind_frame(
    alpha_deg: f64,
    beta_deg: f64,
    axes: &BodyAxes,
    sideslip: SideslipSource,
) -> WindFrame {
    let alpha = alpha_deg.to_radians();
    let beta = match sideslip {
        SideslipSource::Beta => beta_deg.to_radians(),
        SideslipSource::Alpha => alpha,
    };

    let alpha_rotation = axis_rotation(&axes.right, alpha.cos(), alpha.sin());
    let beta_rotation = axis_rotation(&axes.up, beta.cos(), beta.sin());
    let rotation = beta_rotation * alpha_rotation;

    WindFrame {
        rotation,
        forward: rotation * axes.forward,
        up: rotation * axes.up,
        right: rotation * axes.right,
    }
}
