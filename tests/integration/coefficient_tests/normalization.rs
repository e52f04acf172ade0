use crate::common::*;
use aerodump::systems::{evaluate_detailed, evaluate_vehicle};
use aerodump::{AeroError, CoefficientResult, EvaluationSettings, VehicleSnapshot};
use aerodump::resources::VehicleConfig;
use approx::assert_relative_eq;
use nalgebra::Vector3;

#[test]
fn test_single_surface_identity_at_zero_incidence() {
    let force = Vector3::new(0.4, -1.5, 2.5);
    let area = 4.0;
    let mut vehicle = single_surface_vehicle(area, force);

    let result = evaluate_vehicle(&mut vehicle, &level_condition(), &unit_scale_settings()).unwrap();

    // Horizontal axes: right = x, up = y, forward = z
    assert_relative_eq!(result.ca, force.z / area, epsilon = 1e-12);
    assert_relative_eq!(result.cn, force.y / area, epsilon = 1e-12);
    assert_relative_eq!(result.cy, force.x / area, epsilon = 1e-12);
    assert_relative_eq!(result.cmx, 0.0);
    assert_relative_eq!(result.cmy, 0.0);
    assert_relative_eq!(result.cmz, 0.0);
}

#[test]
fn test_default_basis_converts_kilonewtons() {
    let force = Vector3::new(0.0, 2.0, 0.0);
    let mut vehicle = single_surface_vehicle(5.0, force);

    let result =
        evaluate_vehicle(&mut vehicle, &level_condition(), &EvaluationSettings::default()).unwrap();
    assert_relative_eq!(result.cn, 2000.0 / 5.0, epsilon = 1e-9);
}

#[test]
fn test_scaling_areas_with_forces_leaves_coefficients_unchanged() {
    let settings = unit_scale_settings();
    let condition = create_condition(0.5, 6.0, -2.0);

    for seed in [1, 7, 42] {
        let layout = RandomLayout::generate(seed);
        let base = evaluate_vehicle(&mut layout.build(), &condition, &settings).unwrap();
        assert_coefficients_valid(&base);

        for factor in [0.5, 2.0, 10.0] {
            let scaled =
                evaluate_vehicle(&mut layout.scaled(factor).build(), &condition, &settings).unwrap();
            assert_coefficients_eq(&scaled, &base, 1e-10);
        }
    }
}

#[test]
fn test_coefficients_are_linear_in_force() {
    let settings = unit_scale_settings();
    let mut surface = FixedForceSurface::new("wing", 3.0, Vector3::new(0.3, 1.2, -0.4))
        .at(Vector3::new(1.0, 0.5, -2.0));
    let base = evaluate_vehicle(
        &mut VehicleSnapshot::new("base").with_surface(surface.clone()),
        &level_condition(),
        &settings,
    )
    .unwrap();

    surface.force *= 3.0;
    let tripled = evaluate_vehicle(
        &mut VehicleSnapshot::new("tripled").with_surface(surface),
        &level_condition(),
        &settings,
    )
    .unwrap();

    let expected = CoefficientResult {
        ca: base.ca * 3.0,
        cn: base.cn * 3.0,
        cy: base.cy * 3.0,
        cmx: base.cmx * 3.0,
        cmy: base.cmy * 3.0,
        cmz: base.cmz * 3.0,
    };
    assert_coefficients_eq(&tripled, &expected, 1e-12);
}

#[test]
fn test_no_area_and_no_body_is_degenerate() {
    let mut empty = VehicleSnapshot::new("empty");
    assert_eq!(
        evaluate_vehicle(&mut empty, &level_condition(), &EvaluationSettings::default()),
        Err(AeroError::DegenerateGeometry)
    );

    // A body with cross-section but no length still has no reference chord
    let mut flat = VehicleSnapshot::new("flat").with_body(0.0, 1.0);
    assert_eq!(
        evaluate_vehicle(&mut flat, &level_condition(), &EvaluationSettings::default()),
        Err(AeroError::DegenerateGeometry)
    );
}

#[test]
fn test_body_only_vehicle_uses_fallback_reference() {
    let mut vehicle = VehicleConfig::slender_body().build().unwrap();
    let evaluation = evaluate_detailed(
        &mut vehicle,
        &create_condition(0.8, 5.0, 0.0),
        &EvaluationSettings::fresh(),
    )
    .unwrap();

    assert!(evaluation.reference.from_fallback);
    assert_relative_eq!(evaluation.reference.area, vehicle.max_cross_section);
    assert_relative_eq!(evaluation.reference.mac, vehicle.body_length);
    assert_relative_eq!(evaluation.reference.semispan, 1.0);
    assert_coefficients_valid(&evaluation.coefficients);
}

#[test]
fn test_shielded_surface_removes_force_but_keeps_area() {
    let settings = unit_scale_settings();
    let force = Vector3::new(0.0, 3.0, 0.0);
    let lifting = FixedForceSurface::new("wing", 6.0, force);
    let tail = FixedForceSurface::new("tail", 2.0, Vector3::new(0.0, 1.0, 0.0));

    let mut open = VehicleSnapshot::new("open")
        .with_surface(lifting.clone())
        .with_surface(tail.clone());
    let mut shadowed = VehicleSnapshot::new("shadowed")
        .with_surface(lifting)
        .with_surface(tail.shielded());

    let open = evaluate_detailed(&mut open, &level_condition(), &settings).unwrap();
    let shadowed = evaluate_detailed(&mut shadowed, &level_condition(), &settings).unwrap();

    assert_relative_eq!(open.reference.area, 8.0);
    assert_relative_eq!(shadowed.reference.area, 8.0);
    assert_relative_eq!(open.coefficients.cn, 4.0 / 8.0, epsilon = 1e-12);
    assert_relative_eq!(shadowed.coefficients.cn, 3.0 / 8.0, epsilon = 1e-12);
    assert_eq!(shadowed.tally.shielded, 1);
    assert_eq!(shadowed.tally.contributing, 1);
}

#[test]
fn test_invalid_surface_contributes_nothing() {
    let settings = unit_scale_settings();
    let mut vehicle = VehicleSnapshot::new("partial")
        .with_surface(FixedForceSurface::new("wing", 4.0, Vector3::new(0.0, 2.0, 0.0)))
        .with_surface(FixedForceSurface::new("lost", 100.0, Vector3::new(0.0, 50.0, 0.0)).invalid());

    let evaluation = evaluate_detailed(&mut vehicle, &level_condition(), &settings).unwrap();
    assert_relative_eq!(evaluation.reference.area, 4.0);
    assert_relative_eq!(evaluation.coefficients.cn, 0.5, epsilon = 1e-12);
    assert_eq!(evaluation.tally.skipped, 1);
}

#[test]
fn test_area_weighted_reference_chord_and_span() {
    let settings = unit_scale_settings();
    let mut vehicle = VehicleSnapshot::new("mixed")
        .with_surface(FixedForceSurface::new("wing", 3.0, Vector3::zeros()).with_planform(2.0, 4.0))
        .with_surface(FixedForceSurface::new("tail", 1.0, Vector3::zeros()).with_planform(1.0, 1.0));

    let evaluation = evaluate_detailed(&mut vehicle, &level_condition(), &settings).unwrap();
    assert_relative_eq!(evaluation.reference.mac, 7.0 / 4.0, epsilon = 1e-12);
    assert_relative_eq!(evaluation.reference.semispan, 13.0 / 4.0, epsilon = 1e-12);
}

#[test]
fn test_pitching_moment_about_center_of_mass() {
    let settings = unit_scale_settings();
    // Upward force behind the centre of mass pitches the nose down
    let tail = FixedForceSurface::new("tail", 2.0, Vector3::new(0.0, 1.0, 0.0))
        .at(Vector3::new(0.0, 0.0, -4.0));
    let mut vehicle = VehicleSnapshot::new("tail")
        .with_surface(tail)
        .with_center_of_mass(Vector3::new(0.0, 0.0, 0.5));

    let result = evaluate_vehicle(&mut vehicle, &level_condition(), &settings).unwrap();
    // arm = (0, 0, -4.5); -(arm x F) = (-4.5, 0, 0), projected on right = x
    assert_relative_eq!(result.cmy, -4.5 / 2.0, epsilon = 1e-12);
    assert_relative_eq!(result.cmx, 0.0, epsilon = 1e-12);
    assert_relative_eq!(result.cmz, 0.0, epsilon = 1e-12);
}
