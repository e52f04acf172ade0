use tracing::{debug, info};

use crate::components::{
    CoefficientResult, FlightCondition, ReferenceQuantities, ResolvedReference, VehicleSnapshot,
};
use crate::resources::{EvaluationSettings, SweepConfig};
use crate::systems::accumulator::{CoefficientAccumulator, ElementTally};
use crate::systems::element_forces::{
    apply_control_state, evaluate_body_sections, evaluate_lifting_surface, EvaluationContext,
};
use crate::systems::normalizer::normalize;
use crate::systems::sweep::{run_sweep, spawn_sweep, CancelToken, SweepGrid, SweepHandle, SweepMode, SweepPoint};
use crate::utils::AeroError;

/// Coefficients of one evaluation with the reference they were normalised by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub coefficients: CoefficientResult,
    pub reference: ResolvedReference,
    pub tally: ElementTally,
}

/// Evaluates `vehicle` at `condition`, returning the reference data as well.
///
/// Element state is only touched through control-state pushes and, when
/// `settings.clear` is set, lift-history resets.
pub fn evaluate_detailed(
    vehicle: &mut VehicleSnapshot,
    condition: &FlightCondition,
    settings: &EvaluationSettings,
) -> Result<Evaluation, AeroError> {
    if !condition.is_finite() {
        return Err(AeroError::InvalidParameter(
            "flight condition contains a non-finite value".to_string(),
        ));
    }

    let context = EvaluationContext::new(vehicle, condition, settings);
    let mut accumulator = CoefficientAccumulator::new(
        context.axes,
        ReferenceQuantities::with_fallback(vehicle.max_cross_section, vehicle.body_length),
    );

    for surface in vehicle.lifting_surfaces.iter_mut() {
        let outcome = evaluate_lifting_surface(surface.as_mut(), &context);
        accumulator.add_surface(&outcome);
    }

    let body = evaluate_body_sections(&vehicle.body_sections, &context);
    accumulator.add_body(&body, &context.moment_reference, context.basis.force_scale);

    let (raw, reference, tally) = accumulator.finish();
    let (coefficients, reference) = normalize(&raw, &reference)?;

    Ok(Evaluation {
        coefficients,
        reference,
        tally,
    })
}

pub fn evaluate_vehicle(
    vehicle: &mut VehicleSnapshot,
    condition: &FlightCondition,
    settings: &EvaluationSettings,
) -> Result<CoefficientResult, AeroError> {
    evaluate_detailed(vehicle, condition, settings).map(|e| e.coefficients)
}

/// Holds the vehicle snapshot between evaluations and dispatches single
/// evaluations and sweeps against it.
#[derive(Debug, Clone, Default)]
pub struct CoefficientEngine {
    vehicle: Option<VehicleSnapshot>,
    settings: EvaluationSettings,
}

impl CoefficientEngine {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self {
            vehicle: None,
            settings,
        }
    }

    /// Replaces the vehicle data the engine evaluates.
    pub fn update_aero_data(&mut self, vehicle: VehicleSnapshot) {
        info!(
            "Aero data for '{}': {} lifting surfaces, {} body sections",
            vehicle.name,
            vehicle.lifting_surfaces.len(),
            vehicle.body_sections.len()
        );
        self.vehicle = Some(vehicle);
    }

    pub fn clear_aero_data(&mut self) {
        self.vehicle = None;
    }

    pub fn is_ready(&self) -> bool {
        self.vehicle.is_some()
    }

    pub fn vehicle(&self) -> Option<&VehicleSnapshot> {
        self.vehicle.as_ref()
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EvaluationSettings {
        &mut self.settings
    }

    fn vehicle_mut(&mut self) -> Result<&mut VehicleSnapshot, AeroError> {
        self.vehicle.as_mut().ok_or(AeroError::NotReady)
    }

    pub fn compute_coefficients(
        &mut self,
        condition: &FlightCondition,
    ) -> Result<CoefficientResult, AeroError> {
        self.compute_detailed(condition).map(|e| e.coefficients)
    }

    pub fn compute_detailed(&mut self, condition: &FlightCondition) -> Result<Evaluation, AeroError> {
        let settings = self.settings;
        let vehicle = self.vehicle_mut()?;
        let evaluation = evaluate_detailed(vehicle, condition, &settings)?;
        debug!("{}", evaluation.coefficients);
        Ok(evaluation)
    }

    /// Pushes the control inputs, flap setting and spoiler flag of
    /// `condition` into every unshielded controllable surface without
    /// evaluating forces.
    pub fn set_state(&mut self, condition: &FlightCondition) -> Result<(), AeroError> {
        let settings = self.settings;
        let vehicle = self.vehicle_mut()?;
        let context = EvaluationContext::new(vehicle, condition, &settings);
        for surface in vehicle.lifting_surfaces.iter_mut() {
            if surface.is_valid() && !surface.is_shielded() {
                apply_control_state(surface.as_mut(), &context);
            }
        }
        Ok(())
    }

    /// Evaluates the whole grid described by `config`.
    pub fn sweep(
        &mut self,
        config: &SweepConfig,
        mode: SweepMode,
        cancel: &CancelToken,
    ) -> Result<Vec<SweepPoint>, AeroError> {
        let settings = self.settings;
        let vehicle = self.vehicle_mut()?;
        let grid = SweepGrid::new(config)?;
        run_sweep(vehicle, &grid, &settings, mode, cancel)
    }

    /// Runs the sweep on a worker thread against a copy of the vehicle.
    pub fn spawn_sweep(
        &self,
        config: &SweepConfig,
        mode: SweepMode,
        capacity: usize,
    ) -> Result<SweepHandle, AeroError> {
        let vehicle = self.vehicle.clone().ok_or(AeroError::NotReady)?;
        let grid = SweepGrid::new(config)?;
        Ok(spawn_sweep(vehicle, grid, self.settings, mode, capacity))
    }
}
