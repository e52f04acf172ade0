use nalgebra::Vector3;
use tracing::warn;

use crate::components::{
    BodyAxes, BodySection, CenterQuery, ControlState, FlightCondition, ForceBasis, LiftingSurface,
    VehicleSnapshot,
};
use crate::resources::EvaluationSettings;
use crate::systems::wind_frame::{build_wind_frame, WindFrame};

/// Everything an element query needs for one flight condition.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext {
    pub axes: BodyAxes,
    pub wind: WindFrame,
    pub condition: FlightCondition,
    pub angular_velocity: Vector3<f64>,
    pub center_of_mass: Vector3<f64>,
    /// Point about which moments are taken.
    pub moment_reference: Vector3<f64>,
    pub basis: ForceBasis,
    pub clear: bool,
    pub reset_stall: bool,
}

impl EvaluationContext {
    pub fn new(
        vehicle: &VehicleSnapshot,
        condition: &FlightCondition,
        settings: &EvaluationSettings,
    ) -> Self {
        let axes = vehicle.body_axes();
        let wind = build_wind_frame(condition.alpha, condition.beta, &axes, settings.sideslip);
        let moment_reference = if settings.moments_at_center_of_mass {
            vehicle.center_of_mass
        } else {
            Vector3::zeros()
        };

        Self {
            axes,
            wind,
            condition: *condition,
            angular_velocity: condition.angular_velocity(&axes),
            center_of_mass: vehicle.center_of_mass,
            moment_reference,
            basis: settings.basis,
            clear: settings.clear,
            reset_stall: settings.reset_stall,
        }
    }

    /// Free-stream velocity plus the rotation-induced velocity at `point`.
    pub fn local_velocity(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let relative = point - self.center_of_mass;
        self.wind.forward + self.angular_velocity.cross(&relative)
    }

    fn control_state(&self, local_velocity: Vector3<f64>) -> ControlState {
        ControlState {
            center_of_mass: self.center_of_mass,
            local_velocity,
            pitch: self.condition.pitch_input,
            yaw: self.condition.yaw_input,
            roll: self.condition.roll_input,
            flap_setting: self.condition.flap_setting,
            spoilers: self.condition.spoilers,
        }
    }
}

/// Planform data a lifting surface adds to the reference accumulators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub area: f64,
    pub mac: f64,
    pub semispan: f64,
}

/// Force on a lifting surface and its arm from the moment reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLoad {
    pub force: Vector3<f64>,
    pub arm: Vector3<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOutcome {
    Contributed {
        geometry: SurfaceGeometry,
        load: SurfaceLoad,
    },
    /// Wake-shadowed: geometry counts towards the reference, force does not.
    Shielded { geometry: SurfaceGeometry },
    Skipped,
}

impl SurfaceOutcome {
    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        match self {
            Self::Contributed { geometry, .. } | Self::Shielded { geometry } => Some(*geometry),
            Self::Skipped => None,
        }
    }

    pub fn load(&self) -> Option<SurfaceLoad> {
        match self {
            Self::Contributed { load, .. } => Some(*load),
            _ => None,
        }
    }
}

/// Pushes the context's control inputs into `surface` when it is
/// controllable, and returns the unit local velocity at its aerodynamic
/// centre.
pub fn apply_control_state(
    surface: &mut dyn LiftingSurface,
    context: &EvaluationContext,
) -> Vector3<f64> {
    let velocity = context.local_velocity(&surface.aerodynamic_center());
    let direction = velocity
        .try_normalize(f64::EPSILON)
        .unwrap_or(context.wind.forward);

    if let Some(control) = surface.as_control_surface() {
        control.set_control_state(&context.control_state(direction));
    }
    direction
}

/// Evaluates one lifting surface.
///
/// Order matters: lift history is cleared first (when requested), control
/// state is pushed next, and only then is the shielded flag consulted.
pub fn evaluate_lifting_surface(
    surface: &mut dyn LiftingSurface,
    context: &EvaluationContext,
) -> SurfaceOutcome {
    if !surface.is_valid() {
        warn!("Skipping lifting surface '{}': invalid backing data", surface.name());
        return SurfaceOutcome::Skipped;
    }

    if context.clear {
        surface.clear_lift_history(context.reset_stall);
    }

    let center = surface.aerodynamic_center();
    let direction = apply_control_state(surface, context);

    let geometry = SurfaceGeometry {
        area: surface.area(),
        mac: surface.mean_aerodynamic_chord(),
        semispan: surface.semispan(),
    };
    if !(geometry.area.is_finite() && geometry.mac.is_finite() && geometry.semispan.is_finite()) {
        warn!("Skipping lifting surface '{}': non-finite geometry", surface.name());
        return SurfaceOutcome::Skipped;
    }

    if surface.is_shielded() {
        return SurfaceOutcome::Shielded { geometry };
    }

    let force = match surface.compute_force(&direction, context.condition.mach, &context.basis) {
        Ok(force) if force.iter().all(|f| f.is_finite()) => force * context.basis.force_scale,
        Ok(_) => {
            warn!("Skipping lifting surface '{}': non-finite force", surface.name());
            return SurfaceOutcome::Skipped;
        }
        Err(e) => {
            warn!("Skipping lifting surface '{}': {}", surface.name(), e);
            return SurfaceOutcome::Skipped;
        }
    };

    SurfaceOutcome::Contributed {
        geometry,
        load: SurfaceLoad {
            force,
            arm: center - context.moment_reference,
        },
    }
}

/// Queries every body section at the free-stream velocity and returns the
/// merged force/torque about the origin. Sections that fail are left out
/// of the merge entirely.
pub fn evaluate_body_sections(
    sections: &[Box<dyn BodySection>],
    context: &EvaluationContext,
) -> CenterQuery {
    let mut merged = CenterQuery::new();
    for section in sections {
        if !section.is_valid() {
            warn!("Skipping body section '{}': invalid backing data", section.name());
            continue;
        }

        let mut query = CenterQuery::new();
        match section.predict_forces(
            context.condition.mach,
            &context.wind.forward,
            &context.basis,
            &mut query,
        ) {
            Ok(()) => merged.merge(&query),
            Err(e) => warn!("Skipping body section '{}': {}", section.name(), e),
        }
    }
    merged
}
