use nalgebra::Vector3;

use crate::components::{BodyAxes, CenterQuery, RawCoefficients, ReferenceQuantities};
use crate::systems::element_forces::SurfaceOutcome;

/// Sums body-axis forces and moments over all elements of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct CoefficientAccumulator {
    axes: BodyAxes,
    raw: RawCoefficients,
    reference: ReferenceQuantities,
    contributing: usize,
    shielded: usize,
    skipped: usize,
}

/// How many lifting surfaces ended up in each outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementTally {
    pub contributing: usize,
    pub shielded: usize,
    pub skipped: usize,
}

impl CoefficientAccumulator {
    pub fn new(axes: BodyAxes, reference: ReferenceQuantities) -> Self {
        Self {
            axes,
            raw: RawCoefficients::default(),
            reference,
            contributing: 0,
            shielded: 0,
            skipped: 0,
        }
    }

    pub fn add_surface(&mut self, outcome: &SurfaceOutcome) {
        if let Some(geometry) = outcome.geometry() {
            self.reference
                .add_surface(geometry.area, geometry.mac, geometry.semispan);
        }

        match outcome {
            SurfaceOutcome::Contributed { load, .. } => {
                self.raw.add_force(&load.force, &self.axes);
                let moment = -load.arm.cross(&load.force);
                self.raw.add_moment(&moment, &self.axes);
                self.contributing += 1;
            }
            SurfaceOutcome::Shielded { .. } => self.shielded += 1,
            SurfaceOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Folds in the merged body-section query. `scale` converts the query's
    /// force units to the accumulated units.
    pub fn add_body(&mut self, query: &CenterQuery, moment_reference: &Vector3<f64>, scale: f64) {
        let force = query.force() * scale;
        self.raw.add_body_force(&force, &self.axes);

        let moment = -query.torque_at(moment_reference) * scale;
        self.raw.add_moment(&moment, &self.axes);
    }

    pub fn raw(&self) -> &RawCoefficients {
        &self.raw
    }

    pub fn reference(&self) -> &ReferenceQuantities {
        &self.reference
    }

    pub fn finish(self) -> (RawCoefficients, ReferenceQuantities, ElementTally) {
        (
            self.raw,
            self.reference,
            ElementTally {
                contributing: self.contributing,
                shielded: self.shielded,
                skipped: self.skipped,
            },
        )
    }
}
