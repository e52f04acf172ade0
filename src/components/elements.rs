use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::components::ControlState;
use crate::utils::{
    ElementError, KILONEWTONS_TO_NEWTONS, REFERENCE_DENSITY, REFERENCE_PSEUDO_KNUDSEN,
    REFERENCE_REYNOLDS_PER_LENGTH, REFERENCE_SKIN_FRICTION_DRAG,
};

/// Calibration at which every element force is queried.
///
/// With a unit velocity the default density gives a dynamic pressure of one,
/// so element forces are already coefficients times area (in kN).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceBasis {
    pub density: f64,
    pub reynolds_per_length: f64,
    pub pseudo_knudsen: f64,
    pub skin_friction_drag: f64,
    /// Multiplier from element force units to the accumulated units.
    pub force_scale: f64,
}

impl Default for ForceBasis {
    fn default() -> Self {
        Self {
            density: REFERENCE_DENSITY,
            reynolds_per_length: REFERENCE_REYNOLDS_PER_LENGTH,
            pseudo_knudsen: REFERENCE_PSEUDO_KNUDSEN,
            skin_friction_drag: REFERENCE_SKIN_FRICTION_DRAG,
            force_scale: KILONEWTONS_TO_NEWTONS,
        }
    }
}

impl ForceBasis {
    pub fn dynamic_pressure(&self, velocity: &Vector3<f64>) -> f64 {
        0.5 * self.density * velocity.norm_squared()
    }
}

/// A wing, fin or control surface that reports its own force.
pub trait LiftingSurface: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// False when the element lost its backing data; such elements are skipped.
    fn is_valid(&self) -> bool {
        true
    }

    /// Planform area.
    fn area(&self) -> f64;

    fn mean_aerodynamic_chord(&self) -> f64;

    fn semispan(&self) -> f64;

    fn aerodynamic_center(&self) -> Vector3<f64>;

    /// Wake-shadowed by another part.
    fn is_shielded(&self) -> bool;

    /// Force on the element for a unit `velocity` direction at `mach`.
    fn compute_force(
        &mut self,
        velocity: &Vector3<f64>,
        mach: f64,
        basis: &ForceBasis,
    ) -> Result<Vector3<f64>, ElementError>;

    /// Drops stored lift history; also clears the stall state when `reset_stall`.
    fn clear_lift_history(&mut self, reset_stall: bool);

    /// Control capability, if the surface has one.
    fn as_control_surface(&mut self) -> Option<&mut dyn ControlSurface> {
        None
    }

    fn clone_box(&self) -> Box<dyn LiftingSurface>;
}

pub trait ControlSurface {
    fn set_control_state(&mut self, state: &ControlState);
}

/// A fuselage cross-section whose force is gathered through a shared query.
///
/// Implementations report the physical force on the section, in the same
/// units and frame as `LiftingSurface::compute_force`. The accumulator then
/// negates the axial and normal components of the merged body force (side
/// force is kept), so body drag shows up as positive `ca` while wing drag
/// shows up as negative `ca`.
pub trait BodySection: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn is_valid(&self) -> bool {
        true
    }

    /// Adds this section's force and torque to `center`.
    fn predict_forces(
        &self,
        mach: f64,
        velocity: &Vector3<f64>,
        basis: &ForceBasis,
        center: &mut CenterQuery,
    ) -> Result<(), ElementError>;

    fn clone_box(&self) -> Box<dyn BodySection>;
}

impl Clone for Box<dyn LiftingSurface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl Clone for Box<dyn BodySection> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Running total of forces and torques, with torque kept about the origin so
/// it can be re-expressed about any point afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CenterQuery {
    force: Vector3<f64>,
    torque: Vector3<f64>,
}

impl CenterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `force` acting at `point`.
    pub fn add_force(&mut self, point: &Vector3<f64>, force: &Vector3<f64>) {
        self.force += force;
        self.torque += point.cross(force);
    }

    /// Adds a pure couple.
    pub fn add_torque(&mut self, torque: &Vector3<f64>) {
        self.torque += torque;
    }

    pub fn merge(&mut self, other: &CenterQuery) {
        self.force += other.force;
        self.torque += other.torque;
    }

    pub fn force(&self) -> Vector3<f64> {
        self.force
    }

    /// Resultant torque about `point`.
    pub fn torque_at(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.torque - point.cross(&self.force)
    }
}
