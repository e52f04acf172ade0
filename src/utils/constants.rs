/// Relative tolerance below which a reference quantity counts as zero.
pub const NEARLY_ZERO_TOLERANCE: f64 = 1e-12;

/// Default ceiling on the number of points in a sweep grid.
pub const DEFAULT_MAX_GRID_POINTS: usize = 1_000_000;

// Force query calibration used by the editor-style dump
pub const REFERENCE_DENSITY: f64 = 2.0; // kg/m^3, unit dynamic pressure at unit speed
pub const REFERENCE_REYNOLDS_PER_LENGTH: f64 = 10_000.0; // 1/m
pub const REFERENCE_PSEUDO_KNUDSEN: f64 = 0.0;
pub const REFERENCE_SKIN_FRICTION_DRAG: f64 = 0.005;
pub const KILONEWTONS_TO_NEWTONS: f64 = 1000.0;

// Sanitizer limits
pub const MACH_LIMITS: (f64, f64) = (0.0, 100.0);
pub const ANGLE_LIMITS: (f64, f64) = (-90.0, 90.0); // degrees
pub const CONTROL_LIMITS: (f64, f64) = (-1.0, 1.0);
