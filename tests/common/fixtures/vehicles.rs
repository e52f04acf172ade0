use aerodump::components::{Airfoil, FlatPlateWing};
use aerodump::VehicleSnapshot;
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{FixedForceSection, FixedForceSurface};

/// Randomly laid out surfaces and sections with fixed forces.
#[derive(Debug, Clone)]
pub struct RandomLayout {
    pub surfaces: Vec<FixedForceSurface>,
    pub sections: Vec<FixedForceSection>,
}

impl RandomLayout {
    pub fn generate(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let vector = |rng: &mut ChaCha8Rng, bound: f64| {
            Vector3::new(
                rng.gen_range(-bound..bound),
                rng.gen_range(-bound..bound),
                rng.gen_range(-bound..bound),
            )
        };

        let surfaces = (0..rng.gen_range(2..6))
            .map(|i| {
                let area = rng.gen_range(0.5..5.0);
                let mac = rng.gen_range(0.2..2.0);
                let semispan = rng.gen_range(0.5..6.0);
                let force = vector(&mut rng, 2.0);
                let center = vector(&mut rng, 3.0);
                FixedForceSurface::new(&format!("surface_{}", i), area, force)
                    .with_planform(mac, semispan)
                    .at(center)
            })
            .collect();

        let sections = (0..rng.gen_range(1..4))
            .map(|i| {
                let point = vector(&mut rng, 3.0);
                let force = vector(&mut rng, 0.5);
                FixedForceSection::new(&format!("section_{}", i), point, force)
            })
            .collect();

        Self { surfaces, sections }
    }

    /// Every area and every force multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            surfaces: self.surfaces.iter().map(|s| s.scaled(factor)).collect(),
            sections: self.sections.iter().map(|s| s.scaled(factor)).collect(),
        }
    }

    pub fn build(&self) -> VehicleSnapshot {
        let mut vehicle = VehicleSnapshot::new("random").with_center_of_mass(Vector3::new(0.1, -0.2, 0.3));
        for surface in &self.surfaces {
            vehicle = vehicle.with_surface(surface.clone());
        }
        for section in &self.sections {
            vehicle = vehicle.with_section(section.clone());
        }
        vehicle
    }
}

/// One surface reporting `force` on `area`, at the origin.
pub fn single_surface_vehicle(area: f64, force: Vector3<f64>) -> VehicleSnapshot {
    VehicleSnapshot::new("single").with_surface(FixedForceSurface::new("surface", area, force))
}

/// A single flat-plate wing with a 15 degree stall and 3 degree recovery band.
pub fn stalling_wing_vehicle() -> VehicleSnapshot {
    let wing = FlatPlateWing::new("wing", 10.0, 1.5, 5.0).with_airfoil(Airfoil {
        stall_angle: 15.0,
        stall_recovery: 3.0,
        ..Default::default()
    });
    VehicleSnapshot::new("stall").with_surface(wing)
}
