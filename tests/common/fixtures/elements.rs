use aerodump::{BodySection, CenterQuery, ElementError, ForceBasis, LiftingSurface};
use nalgebra::Vector3;

/// Lifting surface that always reports the same force.
#[derive(Debug, Clone)]
pub struct FixedForceSurface {
    pub name: String,
    pub area: f64,
    pub mac: f64,
    pub semispan: f64,
    pub center: Vector3<f64>,
    pub force: Vector3<f64>,
    pub shielded: bool,
    pub valid: bool,
}

impl FixedForceSurface {
    pub fn new(name: &str, area: f64, force: Vector3<f64>) -> Self {
        Self {
            name: name.to_string(),
            area,
            mac: 1.0,
            semispan: 1.0,
            center: Vector3::zeros(),
            force,
            shielded: false,
            valid: true,
        }
    }

    pub fn at(mut self, center: Vector3<f64>) -> Self {
        self.center = center;
        self
    }

    pub fn with_planform(mut self, mac: f64, semispan: f64) -> Self {
        self.mac = mac;
        self.semispan = semispan;
        self
    }

    pub fn shielded(mut self) -> Self {
        self.shielded = true;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    /// Same surface with area and force multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            area: self.area * factor,
            force: self.force * factor,
            ..self.clone()
        }
    }
}

impl LiftingSurface for FixedForceSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn mean_aerodynamic_chord(&self) -> f64 {
        self.mac
    }

    fn semispan(&self) -> f64 {
        self.semispan
    }

    fn aerodynamic_center(&self) -> Vector3<f64> {
        self.center
    }

    fn is_shielded(&self) -> bool {
        self.shielded
    }

    fn compute_force(
        &mut self,
        _velocity: &Vector3<f64>,
        _mach: f64,
        _basis: &ForceBasis,
    ) -> Result<Vector3<f64>, ElementError> {
        Ok(self.force)
    }

    fn clear_lift_history(&mut self, _reset_stall: bool) {}

    fn clone_box(&self) -> Box<dyn LiftingSurface> {
        Box::new(self.clone())
    }
}

/// Body section that reports a fixed force at a fixed point, in the body
/// model's own sign convention.
#[derive(Debug, Clone)]
pub struct FixedForceSection {
    pub name: String,
    pub point: Vector3<f64>,
    pub force: Vector3<f64>,
}

impl FixedForceSection {
    pub fn new(name: &str, point: Vector3<f64>, force: Vector3<f64>) -> Self {
        Self {
            name: name.to_string(),
            point,
            force,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            force: self.force * factor,
            ..self.clone()
        }
    }
}

impl BodySection for FixedForceSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_forces(
        &self,
        _mach: f64,
        _velocity: &Vector3<f64>,
        _basis: &ForceBasis,
        center: &mut CenterQuery,
    ) -> Result<(), ElementError> {
        center.add_force(&self.point, &self.force);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn BodySection> {
        Box::new(self.clone())
    }
}
