use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::components::{BodySection, CenterQuery, ForceBasis};
use crate::utils::{ElementError, KILONEWTONS_TO_NEWTONS};

/// Cylindrical slice of a slender body: axial pressure drag, skin friction and
/// crossflow drag acting at the slice centroid.
///
/// Forces are physical (drag acts against `velocity`) and reported in
/// kilonewtons; the axial/normal sign flip for body sections happens in the
/// accumulator, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRing {
    pub name: String,
    pub centroid: Vector3<f64>,
    /// Unit vector along the body axis, nose-wards.
    pub axis: Vector3<f64>,
    pub cross_section: f64,
    pub length: f64,
    pub axial_drag: f64,
    pub crossflow_drag: f64,
}

impl BodyRing {
    pub fn new(name: impl Into<String>, cross_section: f64, length: f64) -> Self {
        Self {
            name: name.into(),
            centroid: Vector3::zeros(),
            axis: Vector3::z(),
            cross_section,
            length,
            axial_drag: 0.1,
            crossflow_drag: 1.2,
        }
    }

    pub fn at(mut self, centroid: Vector3<f64>) -> Self {
        self.centroid = centroid;
        self
    }

    pub fn along(mut self, axis: Vector3<f64>) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_drag(mut self, axial_drag: f64, crossflow_drag: f64) -> Self {
        self.axial_drag = axial_drag;
        self.crossflow_drag = crossflow_drag;
        self
    }

    pub fn diameter(&self) -> f64 {
        2.0 * (self.cross_section / PI).sqrt()
    }

    /// Pressure drag rise through the transonic region.
    fn wave_drag_factor(mach: f64) -> f64 {
        1.0 + 2.5 * (mach.min(1.2) - 0.8).max(0.0)
    }
}

impl BodySection for BodyRing {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.cross_section.is_finite()
            && self.cross_section >= 0.0
            && self.length > 0.0
            && self.axis.norm() > 0.0
    }

    fn predict_forces(
        &self,
        mach: f64,
        velocity: &Vector3<f64>,
        basis: &ForceBasis,
        center: &mut CenterQuery,
    ) -> Result<(), ElementError> {
        let direction = match velocity.try_normalize(1e-12) {
            Some(direction) => direction,
            None => return Ok(()),
        };
        let axis = self.axis.normalize();
        let q = basis.dynamic_pressure(velocity);

        let axial_speed = direction.dot(&axis);
        let crossflow = direction - axis * axial_speed;

        let diameter = self.diameter();
        let wetted_area = PI * diameter * self.length;
        let axial_coefficient = self.cross_section * self.axial_drag * Self::wave_drag_factor(mach)
            + wetted_area * basis.skin_friction_drag;

        let axial = axis * (-q * axial_coefficient * axial_speed * axial_speed.abs());
        let lateral = crossflow * (-q * diameter * self.length * self.crossflow_drag * crossflow.norm());
        let force = (axial + lateral) / KILONEWTONS_TO_NEWTONS;

        if !force.iter().all(|f| f.is_finite()) {
            return Err(ElementError::NonFinite(self.name.clone()));
        }
        center.add_force(&self.centroid, &force);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn BodySection> {
        Box::new(self.clone())
    }
}
