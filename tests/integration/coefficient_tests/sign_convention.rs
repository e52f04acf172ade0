use crate::common::*;
use aerodump::systems::evaluate_vehicle;
use aerodump::{AxisConvention, EvaluationSettings, VehicleSnapshot};
use nalgebra::Vector3;

fn lifting_and_body(
    force: Vector3<f64>,
    point: Vector3<f64>,
    axes: AxisConvention,
) -> (VehicleSnapshot, VehicleSnapshot) {
    let lifting = VehicleSnapshot::new("lifting")
        .with_axes(axes)
        .with_center_of_mass(Vector3::new(0.2, 0.1, -0.3))
        .with_surface(FixedForceSurface::new("wing", 3.0, force).at(point));

    // Same reference area, force carried by a body section instead
    let body = VehicleSnapshot::new("body")
        .with_axes(axes)
        .with_center_of_mass(Vector3::new(0.2, 0.1, -0.3))
        .with_surface(FixedForceSurface::new("wing", 3.0, Vector3::zeros()).at(point).shielded())
        .with_section(FixedForceSection::new("section", point, force));

    (lifting, body)
}

#[test]
fn test_body_force_flips_axial_and_normal_only() {
    let settings = unit_scale_settings();
    let condition = create_condition(0.4, 3.0, 1.0);

    for axes in [AxisConvention::Horizontal, AxisConvention::Vertical] {
        let (mut lifting, mut body) = lifting_and_body(
            Vector3::new(0.7, -1.1, 0.9),
            Vector3::new(1.5, -0.5, 2.0),
            axes,
        );

        let lifting = evaluate_vehicle(&mut lifting, &condition, &settings).unwrap();
        let body = evaluate_vehicle(&mut body, &condition, &settings).unwrap();
        assert_axial_normal_flipped(&body, &lifting);
    }
}

#[test]
fn test_body_and_lifting_share_force_scale() {
    let (mut lifting, mut body) = lifting_and_body(
        Vector3::new(0.0, 0.004, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        AxisConvention::Horizontal,
    );
    let settings = EvaluationSettings::default();

    let lifting = evaluate_vehicle(&mut lifting, &level_condition(), &settings).unwrap();
    let body = evaluate_vehicle(&mut body, &level_condition(), &settings).unwrap();
    assert_axial_normal_flipped(&body, &lifting);
}

#[test]
fn test_positive_sideslip_gives_side_force_towards_right() {
    // A fin that pushes along the local velocity component across the body
    let settings = unit_scale_settings();
    let wind = aerodump::systems::build_wind_frame(
        0.0,
        5.0,
        &aerodump::BodyAxes::default(),
        settings.sideslip,
    );
    assert!(wind.forward.x > 0.0);

    let mut vehicle = single_surface_vehicle(1.0, wind.forward);
    let result = evaluate_vehicle(&mut vehicle, &create_condition(0.3, 0.0, 5.0), &settings).unwrap();
    assert!(result.cy > 0.0);
    assert!(result.ca > 0.0);
}
