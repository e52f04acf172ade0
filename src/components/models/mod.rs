//! Reference element models used by the CLI presets and the tests.
mod body;
mod wing;

pub use body::BodyRing;
pub use wing::{Airfoil, ControlAuthority, FlatPlateWing};
