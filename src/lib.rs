//! Aerodynamic coefficient dumps for vehicles assembled from discrete
//! lifting surfaces and body sections.
//!
//! The engine evaluates axial, normal and side force coefficients together
//! with roll, pitch and yaw moment coefficients at a single flight condition,
//! or across a six-axis sweep grid of Mach, alpha, beta and control inputs.

pub mod components;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{
    AxisConvention, BodyAxes, BodySection, CenterQuery, CoefficientResult, ControlState,
    ControlSurface, ElementError, FlightCondition, ForceBasis, LiftingSurface, VehicleSnapshot,
};
pub use resources::{DumpConfig, EvaluationSettings, SweepConfig, SweepRange};
pub use systems::{CancelToken, CoefficientEngine, SweepGrid, SweepMode, SweepPoint};
pub use utils::AeroError;
