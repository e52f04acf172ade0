pub mod config;
mod report;
pub mod sanitize;

pub use config::*;
pub use report::SweepReport;
pub use sanitize::{sanitize_count, sanitize_float, RangeText, Sanitized, SweepForm};
