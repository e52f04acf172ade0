use nalgebra::{Matrix3, Vector3};

use crate::utils::NEARLY_ZERO_TOLERANCE;

/// Returns true when `a` and `b` agree to within a relative tolerance.
///
/// Near zero the comparison degrades to an absolute one so that tiny sums of
/// planform area are still recognised as "no area".
#[inline]
pub fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tolerance * scale
}

#[inline]
pub fn nearly_zero(value: f64) -> bool {
    nearly_equal(value, 0.0, NEARLY_ZERO_TOLERANCE)
}

/// Evenly spaced samples over `[min, max]`; a single sample sits at `min`.
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        n => {
            let step = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

/// Rotation about a unit `axis` from precomputed cosine and sine terms
/// (Rodrigues' formula).
pub fn axis_rotation(axis: &Vector3<f64>, cos: f64, sin: f64) -> Matrix3<f64> {
    let cross = Matrix3::new(
        0.0, -axis.z, axis.y, //
        axis.z, 0.0, -axis.x, //
        -axis.y, axis.x, 0.0,
    );
    Matrix3::identity() * cos + cross * sin + (axis * axis.transpose()) * (1.0 - cos)
}
