use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{
    Airfoil, AxisConvention, BodyAxes, BodyRing, ControlAuthority, FlatPlateWing, VehicleSnapshot,
};
use crate::utils::ConfigError;

/// Flat-plate lifting surface as written in a vehicle file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub name: String,
    pub area: f64,
    pub mac: f64,
    pub semispan: f64,
    pub aerodynamic_center: Vector3<f64>,
    /// Defaults to the vehicle's forward axis.
    #[serde(default)]
    pub chord_axis: Option<Vector3<f64>>,
    /// Defaults to the vehicle's up axis.
    #[serde(default)]
    pub normal_axis: Option<Vector3<f64>>,
    #[serde(default)]
    pub incidence: f64,
    #[serde(default)]
    pub airfoil: Airfoil,
    #[serde(default)]
    pub control: Option<ControlAuthority>,
    #[serde(default)]
    pub shielded: bool,
}

/// Body ring as written in a vehicle file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub centroid: Vector3<f64>,
    pub cross_section: f64,
    pub length: f64,
    #[serde(default = "default_axial_drag")]
    pub axial_drag: f64,
    #[serde(default = "default_crossflow_drag")]
    pub crossflow_drag: f64,
}

fn default_axial_drag() -> f64 {
    0.1
}

fn default_crossflow_drag() -> f64 {
    1.2
}

fn default_center_of_mass() -> Vector3<f64> {
    Vector3::zeros()
}

/// Vehicle description built from the reference element models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    #[serde(default)]
    pub axes: AxisConvention,
    #[serde(default = "default_center_of_mass")]
    pub center_of_mass: Vector3<f64>,
    #[serde(default)]
    pub mass: f64,
    /// Defaults to the summed section lengths.
    #[serde(default)]
    pub body_length: Option<f64>,
    /// Defaults to the largest section cross-section.
    #[serde(default)]
    pub max_cross_section: Option<f64>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceConfig>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl VehicleConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for surface in &self.surfaces {
            let geometry = [surface.area, surface.mac, surface.semispan];
            if geometry.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "surface '{}' needs finite, non-negative area, chord and semispan",
                    surface.name
                )));
            }
        }
        for section in &self.sections {
            if !section.cross_section.is_finite() || section.cross_section < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "section '{}' has an invalid cross-section",
                    section.name
                )));
            }
            if !section.length.is_finite() || section.length <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "section '{}' must have a positive length",
                    section.name
                )));
            }
        }
        if !self.center_of_mass.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::ValidationError(
                "center of mass must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<VehicleSnapshot, ConfigError> {
        self.validate()?;
        let axes = BodyAxes::for_convention(self.axes);

        let body_length = self
            .body_length
            .unwrap_or_else(|| self.sections.iter().map(|s| s.length).sum());
        let max_cross_section = self.max_cross_section.unwrap_or_else(|| {
            self.sections
                .iter()
                .map(|s| s.cross_section)
                .fold(0.0, f64::max)
        });

        let mut vehicle = VehicleSnapshot::new(self.name.clone())
            .with_axes(self.axes)
            .with_center_of_mass(self.center_of_mass)
            .with_mass(self.mass)
            .with_body(body_length, max_cross_section);

        for surface in &self.surfaces {
            let mut wing =
                FlatPlateWing::new(surface.name.clone(), surface.area, surface.mac, surface.semispan)
                    .at(surface.aerodynamic_center)
                    .oriented(
                        surface.chord_axis.unwrap_or(axes.forward),
                        surface.normal_axis.unwrap_or(axes.up),
                    )
                    .with_incidence(surface.incidence)
                    .with_airfoil(surface.airfoil)
                    .shielded(surface.shielded);
            if let Some(control) = surface.control {
                wing = wing.with_control(control);
            }
            vehicle = vehicle.with_surface(wing);
        }

        for section in &self.sections {
            vehicle = vehicle.with_section(
                BodyRing::new(section.name.clone(), section.cross_section, section.length)
                    .at(section.centroid)
                    .along(axes.forward)
                    .with_drag(section.axial_drag, section.crossflow_drag),
            );
        }

        Ok(vehicle)
    }

    /// High-wing single-engine aircraft with ailerons, flaps, spoilers,
    /// elevator and rudder.
    pub fn light_aircraft() -> Self {
        let aileron = |roll_gain: f64| ControlAuthority {
            roll_gain,
            max_deflection: 20.0,
            flap_step: 10.0,
            spoiler_lift_loss: 0.6,
            spoiler_drag: 0.08,
            ..Default::default()
        };

        Self {
            name: "Light Aircraft".to_string(),
            axes: AxisConvention::Horizontal,
            center_of_mass: Vector3::new(0.0, 0.0, 0.3),
            mass: 1100.0,
            body_length: None,
            max_cross_section: None,
            surfaces: vec![
                SurfaceConfig {
                    name: "left wing".to_string(),
                    area: 8.0,
                    mac: 1.5,
                    semispan: 5.5,
                    aerodynamic_center: Vector3::new(-2.7, 0.6, 0.1),
                    chord_axis: None,
                    normal_axis: None,
                    incidence: 2.0,
                    airfoil: Airfoil::default(),
                    control: Some(aileron(12.0)),
                    shielded: false,
                },
                SurfaceConfig {
                    name: "right wing".to_string(),
                    area: 8.0,
                    mac: 1.5,
                    semispan: 5.5,
                    aerodynamic_center: Vector3::new(2.7, 0.6, 0.1),
                    chord_axis: None,
                    normal_axis: None,
                    incidence: 2.0,
                    airfoil: Airfoil::default(),
                    control: Some(aileron(-12.0)),
                    shielded: false,
                },
                SurfaceConfig {
                    name: "horizontal tail".to_string(),
                    area: 3.2,
                    mac: 0.9,
                    semispan: 1.8,
                    aerodynamic_center: Vector3::new(0.0, 0.2, -4.6),
                    chord_axis: None,
                    normal_axis: None,
                    incidence: -1.5,
                    airfoil: Airfoil {
                        lift_slope: 4.5,
                        ..Default::default()
                    },
                    control: Some(ControlAuthority {
                        pitch_gain: 20.0,
                        ..Default::default()
                    }),
                    shielded: false,
                },
                SurfaceConfig {
                    name: "vertical fin".to_string(),
                    area: 1.6,
                    mac: 1.0,
                    semispan: 1.4,
                    aerodynamic_center: Vector3::new(0.0, 0.9, -4.8),
                    chord_axis: None,
                    normal_axis: Some(Vector3::x()),
                    incidence: 0.0,
                    airfoil: Airfoil {
                        lift_slope: 3.5,
                        ..Default::default()
                    },
                    control: Some(ControlAuthority {
                        yaw_gain: 25.0,
                        ..Default::default()
                    }),
                    shielded: false,
                },
            ],
            sections: vec![
                SectionConfig {
                    name: "cowling".to_string(),
                    centroid: Vector3::new(0.0, 0.0, 2.0),
                    cross_section: 0.9,
                    length: 1.6,
                    axial_drag: 0.15,
                    crossflow_drag: 1.1,
                },
                SectionConfig {
                    name: "cabin".to_string(),
                    centroid: Vector3::new(0.0, 0.1, 0.2),
                    cross_section: 1.3,
                    length: 2.2,
                    axial_drag: default_axial_drag(),
                    crossflow_drag: default_crossflow_drag(),
                },
                SectionConfig {
                    name: "tail cone".to_string(),
                    centroid: Vector3::new(0.0, 0.1, -2.8),
                    cross_section: 0.5,
                    length: 3.2,
                    axial_drag: 0.05,
                    crossflow_drag: 0.9,
                },
            ],
        }
    }

    /// Finless slender body assembled standing up. Has no planform area, so
    /// its coefficients are normalised by the body cross-section and length.
    pub fn slender_body() -> Self {
        Self {
            name: "Slender Body".to_string(),
            axes: AxisConvention::Vertical,
            center_of_mass: Vector3::new(0.0, 2.5, 0.0),
            mass: 450.0,
            body_length: None,
            max_cross_section: None,
            surfaces: Vec::new(),
            sections: (0..4)
                .map(|i| SectionConfig {
                    name: format!("stage {}", i + 1),
                    centroid: Vector3::new(0.0, 1.5 * i as f64 + 0.75, 0.0),
                    cross_section: 0.2,
                    length: 1.5,
                    axial_drag: if i == 3 { 0.3 } else { 0.02 },
                    crossflow_drag: 1.2,
                })
                .collect(),
        }
    }

    /// Looks up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "light_aircraft" => Some(Self::light_aircraft()),
            "slender_body" => Some(Self::slender_body()),
            _ => None,
        }
    }
}
