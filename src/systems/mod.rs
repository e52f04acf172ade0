pub mod accumulator;
pub mod element_forces;
pub mod engine;
pub mod gravity;
pub mod normalizer;
pub mod sweep;
pub mod wind_frame;

pub use accumulator::{CoefficientAccumulator, ElementTally};
pub use element_forces::{
    apply_control_state, evaluate_body_sections, evaluate_lifting_surface, EvaluationContext,
    SurfaceGeometry, SurfaceLoad, SurfaceOutcome,
};
pub use engine::{evaluate_detailed, evaluate_vehicle, CoefficientEngine, Evaluation};
pub use gravity::{gravitational_acceleration, CelestialBody};
pub use normalizer::{normalize, resolve_reference};
pub use sweep::{run_sweep, spawn_sweep, CancelToken, SweepGrid, SweepHandle, SweepMode, SweepPoint};
pub use wind_frame::{build_wind_frame, SideslipSource, WindFrame};
