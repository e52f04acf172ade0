use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{BodySection, LiftingSurface};

/// Orientation in which the vehicle was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisConvention {
    /// Built lying down: forward = +z, up = +y, right = +x.
    #[default]
    Horizontal,
    /// Built standing up: forward = +y, up = -z, right = +x.
    Vertical,
}

/// Orthonormal body basis in vehicle coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyAxes {
    pub forward: Vector3<f64>,
    pub up: Vector3<f64>,
    pub right: Vector3<f64>,
}

impl BodyAxes {
    pub fn for_convention(convention: AxisConvention) -> Self {
        match convention {
            AxisConvention::Horizontal => Self {
                forward: Vector3::z(),
                up: Vector3::y(),
                right: Vector3::x(),
            },
            AxisConvention::Vertical => Self {
                forward: Vector3::y(),
                up: -Vector3::z(),
                right: Vector3::x(),
            },
        }
    }
}

impl Default for BodyAxes {
    fn default() -> Self {
        Self::for_convention(AxisConvention::default())
    }
}

/// Everything the engine reads about a vehicle for one batch of evaluations.
#[derive(Debug, Clone)]
pub struct VehicleSnapshot {
    pub name: String,
    pub lifting_surfaces: Vec<Box<dyn LiftingSurface>>,
    pub body_sections: Vec<Box<dyn BodySection>>,
    /// Mass-weighted centre of mass in vehicle coordinates.
    pub center_of_mass: Vector3<f64>,
    pub mass: f64,
    /// Reference body length, used as chord when there is no planform area.
    pub body_length: f64,
    /// Largest body cross-section, used as area when there is no planform area.
    pub max_cross_section: f64,
    pub axes: AxisConvention,
}

impl VehicleSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifting_surfaces: Vec::new(),
            body_sections: Vec::new(),
            center_of_mass: Vector3::zeros(),
            mass: 0.0,
            body_length: 0.0,
            max_cross_section: 0.0,
            axes: AxisConvention::default(),
        }
    }

    pub fn with_surface(mut self, surface: impl LiftingSurface + 'static) -> Self {
        self.lifting_surfaces.push(Box::new(surface));
        self
    }

    pub fn with_section(mut self, section: impl BodySection + 'static) -> Self {
        self.body_sections.push(Box::new(section));
        self
    }

    pub fn with_center_of_mass(mut self, center_of_mass: Vector3<f64>) -> Self {
        self.center_of_mass = center_of_mass;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_body(mut self, body_length: f64, max_cross_section: f64) -> Self {
        self.body_length = body_length;
        self.max_cross_section = max_cross_section;
        self
    }

    pub fn with_axes(mut self, axes: AxisConvention) -> Self {
        self.axes = axes;
        self
    }

    pub fn body_axes(&self) -> BodyAxes {
        BodyAxes::for_convention(self.axes)
    }

    pub fn element_count(&self) -> usize {
        self.lifting_surfaces.len() + self.body_sections.len()
    }
}
