use std::io;
use thiserror::Error;

use crate::resources::SweepAxis;

/// Failures of a coefficient evaluation or a sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AeroError {
    #[error("Invalid {axis} range: min {min} is greater than max {max}")]
    InvalidRange { axis: SweepAxis, min: f64, max: f64 },

    #[error("Invalid {axis} grid size: count {count} must be at least 1")]
    InvalidGridSize { axis: SweepAxis, count: i64 },

    #[error("Sweep grid of {points} points exceeds the limit of {limit}")]
    GridTooLarge { points: u64, limit: usize },

    #[error("Degenerate geometry: no lifting area and no body cross-section to normalize by")]
    DegenerateGeometry,

    #[error("Vehicle aerodynamic data has not been loaded")]
    NotReady,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Sweep cancelled after {completed} of {total} points")]
    Cancelled { completed: usize, total: usize },

    #[error("Sweep worker terminated unexpectedly")]
    WorkerFailed,
}

/// Failure of a single aerodynamic element. Recovered by skipping the element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("Element '{0}' has no backing data")]
    MissingBacking(String),

    #[error("Element '{0}' produced a non-finite force")]
    NonFinite(String),

    #[error("Element '{name}' model error: {reason}")]
    Model { name: String, reason: String },
}

/// Failures loading, saving or validating configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to write JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
