use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::BodyAxes;

/// Non-dimensional force and moment coefficients in body axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoefficientResult {
    /// Axial force coefficient.
    pub ca: f64,
    /// Normal force coefficient.
    pub cn: f64,
    /// Side force coefficient.
    pub cy: f64,
    /// Roll moment coefficient.
    pub cmx: f64,
    /// Pitch moment coefficient.
    pub cmy: f64,
    /// Yaw moment coefficient.
    pub cmz: f64,
}

impl CoefficientResult {
    pub fn as_array(&self) -> [f64; 6] {
        [self.ca, self.cn, self.cy, self.cmx, self.cmy, self.cmz]
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|c| c.is_finite())
    }
}

impl fmt::Display for CoefficientResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CA: {:.6} CN: {:.6} CY: {:.6} CMX: {:.6} CMY: {:.6} CMZ: {:.6}",
            self.ca, self.cn, self.cy, self.cmx, self.cmy, self.cmz
        )
    }
}

/// Dimensional force and moment sums before normalisation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawCoefficients {
    pub axial: f64,
    pub normal: f64,
    pub side: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl RawCoefficients {
    /// Projects a force onto the body axes with the lifting-surface sign convention.
    pub fn add_force(&mut self, force: &Vector3<f64>, axes: &BodyAxes) {
        self.axial += force.dot(&axes.forward);
        self.normal += force.dot(&axes.up);
        self.side += force.dot(&axes.right);
    }

    /// Projects a force reported by the body-section model. Axial and normal
    /// components are reported with the opposite sign to lifting surfaces.
    pub fn add_body_force(&mut self, force: &Vector3<f64>, axes: &BodyAxes) {
        self.axial -= force.dot(&axes.forward);
        self.normal -= force.dot(&axes.up);
        self.side += force.dot(&axes.right);
    }

    pub fn add_moment(&mut self, moment: &Vector3<f64>, axes: &BodyAxes) {
        self.roll += moment.dot(&axes.forward);
        self.pitch += moment.dot(&axes.right);
        self.yaw += moment.dot(&axes.up);
    }
}

/// Reference geometry accumulated over the lifting surfaces, plus the body
/// values used when the vehicle has no planform area at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceQuantities {
    pub total_area: f64,
    pub total_mac_area: f64,
    pub total_span_area: f64,
    pub fallback_area: f64,
    pub fallback_span: f64,
    pub fallback_length: f64,
}

impl ReferenceQuantities {
    pub fn with_fallback(fallback_area: f64, fallback_length: f64) -> Self {
        Self {
            fallback_area,
            fallback_span: 1.0,
            fallback_length,
            ..Default::default()
        }
    }

    pub fn add_surface(&mut self, area: f64, mac: f64, semispan: f64) {
        self.total_area += area;
        self.total_mac_area += mac * area;
        self.total_span_area += semispan * area;
    }
}

/// Reference values actually used to normalise one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedReference {
    pub area: f64,
    pub mac: f64,
    pub semispan: f64,
    pub from_fallback: bool,
}
