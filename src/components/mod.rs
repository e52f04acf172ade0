mod coefficients;
mod elements;
mod flight_condition;
pub mod models;
mod vehicle;

pub use coefficients::*;
pub use elements::*;
pub use flight_condition::*;
pub use models::{Airfoil, BodyRing, ControlAuthority, FlatPlateWing};
pub use vehicle::*;

pub use crate::utils::ElementError;
