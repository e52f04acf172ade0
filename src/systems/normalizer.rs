use tracing::debug;

use crate::components::{CoefficientResult, RawCoefficients, ReferenceQuantities, ResolvedReference};
use crate::utils::{nearly_zero, AeroError};

/// Picks the reference area, chord and semispan for normalisation.
///
/// With no planform area the body cross-section and length stand in, with a
/// unit semispan. Fails when the chosen area or chord is still zero.
pub fn resolve_reference(reference: &ReferenceQuantities) -> Result<ResolvedReference, AeroError> {
    let resolved = if nearly_zero(reference.total_area) {
        debug!(
            "No lifting area, normalising by body cross-section {} and length {}",
            reference.fallback_area, reference.fallback_length
        );
        ResolvedReference {
            area: reference.fallback_area,
            mac: reference.fallback_length,
            semispan: reference.fallback_span,
            from_fallback: true,
        }
    } else {
        ResolvedReference {
            area: reference.total_area,
            mac: reference.total_mac_area / reference.total_area,
            semispan: reference.total_span_area / reference.total_area,
            from_fallback: false,
        }
    };

    if !resolved.area.is_finite()
        || !resolved.mac.is_finite()
        || nearly_zero(resolved.area)
        || nearly_zero(resolved.mac)
    {
        return Err(AeroError::DegenerateGeometry);
    }
    Ok(resolved)
}

/// Divides forces by the reference area and moments by area times chord.
pub fn normalize(
    raw: &RawCoefficients,
    reference: &ReferenceQuantities,
) -> Result<(CoefficientResult, ResolvedReference), AeroError> {
    let resolved = resolve_reference(reference)?;
    let moment_scale = resolved.area * resolved.mac;

    let result = CoefficientResult {
        ca: raw.axial / resolved.area,
        cn: raw.normal / resolved.area,
        cy: raw.side / resolved.area,
        cmx: raw.roll / moment_scale,
        cmy: raw.pitch / moment_scale,
        cmz: raw.yaw / moment_scale,
    };
    Ok((result, resolved))
}
