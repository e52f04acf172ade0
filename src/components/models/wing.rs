use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{ControlState, ControlSurface, ForceBasis, LiftingSurface};
use crate::utils::{ElementError, KILONEWTONS_TO_NEWTONS};

/// Lowest Prandtl-Glauert denominator, caps the transonic lift rise.
const COMPRESSIBILITY_FLOOR: f64 = 0.3;

/// Section characteristics of a flat-plate wing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Airfoil {
    /// Lift curve slope per radian.
    pub lift_slope: f64,
    /// Angle of attack at which the surface stalls, in degrees.
    pub stall_angle: f64,
    /// Angle below the stall angle at which attached flow recovers, in degrees.
    pub stall_recovery: f64,
    pub zero_lift_drag: f64,
    pub induced_drag_factor: f64,
}

impl Default for Airfoil {
    fn default() -> Self {
        Self {
            lift_slope: 2.0 * std::f64::consts::PI,
            stall_angle: 15.0,
            stall_recovery: 3.0,
            zero_lift_drag: 0.01,
            induced_drag_factor: 0.05,
        }
    }
}

/// How strongly the pilot inputs, flaps and spoilers act on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlAuthority {
    /// Deflection per unit pitch input, in degrees.
    pub pitch_gain: f64,
    /// Deflection per unit yaw input, in degrees.
    pub yaw_gain: f64,
    /// Deflection per unit roll input, in degrees.
    pub roll_gain: f64,
    /// Limit on the pilot deflection, in degrees.
    pub max_deflection: f64,
    /// Deflection per flap detent, in degrees.
    pub flap_step: f64,
    /// Fraction of the deflection that shifts the surface's zero-lift angle.
    pub effectiveness: f64,
    /// Fraction of lift destroyed by deployed spoilers.
    pub spoiler_lift_loss: f64,
    pub spoiler_drag: f64,
}

impl Default for ControlAuthority {
    fn default() -> Self {
        Self {
            pitch_gain: 0.0,
            yaw_gain: 0.0,
            roll_gain: 0.0,
            max_deflection: 25.0,
            flap_step: 0.0,
            effectiveness: 0.5,
            spoiler_lift_loss: 0.0,
            spoiler_drag: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WingState {
    stalled: bool,
    last_lift_coefficient: f64,
    deflection: f64,
    spoilers: bool,
}

/// Thin flat-plate lifting surface with linear lift up to stall, stall
/// hysteresis and optional control deflection.
///
/// Forces are reported in kilonewtons.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatPlateWing {
    pub name: String,
    pub area: f64,
    pub mac: f64,
    pub semispan: f64,
    pub aerodynamic_center: Vector3<f64>,
    /// Unit vector from trailing to leading edge.
    pub chord_axis: Vector3<f64>,
    /// Unit vector along which lift acts at zero angle of attack.
    pub normal_axis: Vector3<f64>,
    /// Incidence relative to the chord axis, in degrees.
    pub incidence: f64,
    pub airfoil: Airfoil,
    pub control: Option<ControlAuthority>,
    pub shielded: bool,
    state: WingState,
}

impl FlatPlateWing {
    pub fn new(name: impl Into<String>, area: f64, mac: f64, semispan: f64) -> Self {
        Self {
            name: name.into(),
            area,
            mac,
            semispan,
            aerodynamic_center: Vector3::zeros(),
            chord_axis: Vector3::z(),
            normal_axis: Vector3::y(),
            incidence: 0.0,
            airfoil: Airfoil::default(),
            control: None,
            shielded: false,
            state: WingState::default(),
        }
    }

    pub fn at(mut self, aerodynamic_center: Vector3<f64>) -> Self {
        self.aerodynamic_center = aerodynamic_center;
        self
    }

    pub fn oriented(mut self, chord_axis: Vector3<f64>, normal_axis: Vector3<f64>) -> Self {
        self.chord_axis = chord_axis;
        self.normal_axis = normal_axis;
        self
    }

    pub fn with_incidence(mut self, incidence: f64) -> Self {
        self.incidence = incidence;
        self
    }

    pub fn with_airfoil(mut self, airfoil: Airfoil) -> Self {
        self.airfoil = airfoil;
        self
    }

    pub fn with_control(mut self, control: ControlAuthority) -> Self {
        self.control = Some(control);
        self
    }

    pub fn shielded(mut self, shielded: bool) -> Self {
        self.shielded = shielded;
        self
    }

    pub fn is_stalled(&self) -> bool {
        self.state.stalled
    }

    /// Lift coefficient from the most recent force query.
    pub fn last_lift_coefficient(&self) -> f64 {
        self.state.last_lift_coefficient
    }

    /// Current control deflection in degrees.
    pub fn deflection(&self) -> f64 {
        self.state.deflection
    }

    /// Local angle of attack (rad) of a unit velocity in the chord/normal plane.
    fn local_alpha(&self, direction: &Vector3<f64>) -> f64 {
        (-direction.dot(&self.normal_axis)).atan2(direction.dot(&self.chord_axis))
    }

    fn update_stall(&mut self, alpha: f64) {
        let stall = self.airfoil.stall_angle.to_radians();
        let recovery = (self.airfoil.stall_angle - self.airfoil.stall_recovery).to_radians();
        if alpha.abs() > stall {
            self.state.stalled = true;
        } else if alpha.abs() < recovery {
            self.state.stalled = false;
        }
    }
}

impl LiftingSurface for FlatPlateWing {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.area.is_finite()
            && self.area >= 0.0
            && self.chord_axis.norm() > 0.0
            && self.normal_axis.norm() > 0.0
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
        self.aerodynamic_center
    }

    fn is_shielded(&self) -> bool {
        self.shielded
    }

    fn compute_force(
        &mut self,
        velocity: &Vector3<f64>,
        mach: f64,
        basis: &ForceBasis,
    ) -> Result<Vector3<f64>, ElementError> {
        let direction = match velocity.try_normalize(1e-12) {
            Some(direction) => direction,
            None => return Ok(Vector3::zeros()),
        };

        let shift = self.incidence
            + self
                .control
                .map(|c| self.state.deflection * c.effectiveness)
                .unwrap_or(0.0);
        let alpha = self.local_alpha(&direction) + shift.to_radians();
        self.update_stall(alpha);

        let (mut cl, mut cd) = if self.state.stalled {
            // Separated flow behaves like a flat plate normal to the stream
            ((2.0 * alpha).sin(), 2.0 * alpha.sin().powi(2))
        } else {
            let compressibility = (1.0 - mach * mach).abs().sqrt().max(COMPRESSIBILITY_FLOOR);
            (self.airfoil.lift_slope * alpha / compressibility, 0.0)
        };
        cd += self.airfoil.zero_lift_drag + self.airfoil.induced_drag_factor * cl * cl;

        if let (Some(control), true) = (self.control, self.state.spoilers) {
            cl *= 1.0 - control.spoiler_lift_loss;
            cd += control.spoiler_drag;
        }
        self.state.last_lift_coefficient = cl;

        let normal = self.normal_axis.normalize();
        let lift_direction = (normal - direction * normal.dot(&direction))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);

        let q = basis.dynamic_pressure(velocity);
        let force = (lift_direction * cl - direction * cd) * (q * self.area / KILONEWTONS_TO_NEWTONS);

        if force.iter().all(|f| f.is_finite()) {
            Ok(force)
        } else {
            Err(ElementError::NonFinite(self.name.clone()))
        }
    }

    fn clear_lift_history(&mut self, reset_stall: bool) {
        self.state.last_lift_coefficient = 0.0;
        if reset_stall {
            self.state.stalled = false;
        }
    }

    fn as_control_surface(&mut self) -> Option<&mut dyn ControlSurface> {
        if self.control.is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn clone_box(&self) -> Box<dyn LiftingSurface> {
        Box::new(self.clone())
    }
}

impl ControlSurface for FlatPlateWing {
    fn set_control_state(&mut self, state: &ControlState) {
        let Some(control) = self.control else {
            return;
        };
        let pilot = control.pitch_gain * state.pitch
            + control.yaw_gain * state.yaw
            + control.roll_gain * state.roll;
        let limit = control.max_deflection.abs();
        self.state.deflection =
            pilot.clamp(-limit, limit) + control.flap_step * f64::from(state.flap_setting);
        self.state.spoilers = state.spoilers;
    }
}
