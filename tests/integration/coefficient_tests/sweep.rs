use crate::common::*;
use aerodump::resources::{SweepRange, VehicleConfig};
use aerodump::systems::{run_sweep, spawn_sweep};
use aerodump::{AeroError, CancelToken, EvaluationSettings, SweepGrid, SweepMode};
use approx::assert_relative_eq;
use std::collections::HashSet;

#[test]
fn test_grid_cardinality_is_product_of_counts() {
    let config = create_sweep_config([2, 3, 1, 1, 1, 1]);
    let mut vehicle = VehicleConfig::light_aircraft().build().unwrap();
    let grid = SweepGrid::new(&config).unwrap();

    let points = run_sweep(
        &mut vehicle,
        &grid,
        &EvaluationSettings::fresh(),
        SweepMode::Parallel,
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(points.len(), 6);
    let indices: Vec<usize> = points.iter().map(|p| p.index).collect();
    assert_eq!(indices, (0..6).collect::<Vec<_>>());

    let distinct: HashSet<(u64, u64)> = points
        .iter()
        .map(|p| (p.condition.mach.to_bits(), p.condition.alpha.to_bits()))
        .collect();
    assert_eq!(distinct.len(), 6);
    for point in &points {
        assert_coefficients_valid(&point.coefficients);
    }
}

#[test]
fn test_parallel_sweep_is_deterministic() {
    let config = create_sweep_config([2, 3, 2, 2, 1, 2]);
    let grid = SweepGrid::new(&config).unwrap();
    let settings = EvaluationSettings::default();
    let mut vehicle = VehicleConfig::light_aircraft().build().unwrap();

    let first = run_sweep(&mut vehicle, &grid, &settings, SweepMode::Parallel, &CancelToken::new()).unwrap();
    let second = run_sweep(&mut vehicle, &grid, &settings, SweepMode::Parallel, &CancelToken::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sequential_with_clearing_matches_parallel() {
    let config = create_sweep_config([2, 4, 2, 1, 1, 1]);
    let grid = SweepGrid::new(&config).unwrap();
    let settings = EvaluationSettings::fresh();

    let mut parallel_vehicle = VehicleConfig::light_aircraft().build().unwrap();
    let mut sequential_vehicle = parallel_vehicle.clone();

    let parallel = run_sweep(
        &mut parallel_vehicle,
        &grid,
        &settings,
        SweepMode::Parallel,
        &CancelToken::new(),
    )
    .unwrap();
    let sequential = run_sweep(
        &mut sequential_vehicle,
        &grid,
        &settings,
        SweepMode::Sequential,
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(parallel, sequential);
}

fn stall_sweep_grid() -> SweepGrid {
    let config = aerodump::SweepConfig {
        // Two identical Mach values revisit the same alphas after stalling
        mach: SweepRange::new(0.1, 0.1, 2),
        alpha: SweepRange::new(13.0, 20.0, 2),
        beta: SweepRange::fixed(0.0),
        pitch: SweepRange::fixed(0.0),
        yaw: SweepRange::fixed(0.0),
        roll: SweepRange::fixed(0.0),
        ..Default::default()
    };
    SweepGrid::new(&config).unwrap()
}

#[test]
fn test_sequential_sweep_carries_stall_history() {
    let grid = stall_sweep_grid();
    let settings = EvaluationSettings::default();

    let mut vehicle = stalling_wing_vehicle();
    let parallel =
        run_sweep(&mut vehicle, &grid, &settings, SweepMode::Parallel, &CancelToken::new()).unwrap();

    let mut vehicle = stalling_wing_vehicle();
    let sequential =
        run_sweep(&mut vehicle, &grid, &settings, SweepMode::Sequential, &CancelToken::new())
            .unwrap();

    // Index 2 revisits 13 degrees right after the 20 degree point stalled the wing
    assert_eq!(parallel[0], sequential[0]);
    assert_eq!(parallel[2].condition, sequential[2].condition);
    assert!(parallel[2].coefficients.cn > sequential[2].coefficients.cn);
    assert_relative_eq!(parallel[0].coefficients.cn, parallel[2].coefficients.cn);
}

#[test]
fn test_clearing_stall_removes_history() {
    let grid = stall_sweep_grid();

    let mut vehicle = stalling_wing_vehicle();
    let parallel = run_sweep(
        &mut vehicle,
        &grid,
        &EvaluationSettings::default(),
        SweepMode::Parallel,
        &CancelToken::new(),
    )
    .unwrap();

    let mut vehicle = stalling_wing_vehicle();
    let cleared = run_sweep(
        &mut vehicle,
        &grid,
        &EvaluationSettings::fresh(),
        SweepMode::Sequential,
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(parallel, cleared);
}

#[test]
fn test_cancelled_sweep_returns_cancelled() {
    let config = create_sweep_config([2, 3, 1, 1, 1, 1]);
    let grid = SweepGrid::new(&config).unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();

    for mode in [SweepMode::Parallel, SweepMode::Sequential] {
        let mut vehicle = VehicleConfig::light_aircraft().build().unwrap();
        let result = run_sweep(&mut vehicle, &grid, &EvaluationSettings::default(), mode, &cancel);
        assert!(matches!(result, Err(AeroError::Cancelled { total: 6, .. })));
    }
}

#[test]
fn test_invalid_ranges_rejected_before_evaluation() {
    let mut config = create_sweep_config([2, 3, 1, 1, 1, 1]);
    config.alpha = SweepRange::new(10.0, -10.0, 3);
    assert!(matches!(
        SweepGrid::new(&config),
        Err(AeroError::InvalidRange { .. })
    ));

    let mut config = create_sweep_config([2, 3, 1, 1, 1, 1]);
    config.yaw.count = 0;
    assert!(matches!(
        SweepGrid::new(&config),
        Err(AeroError::InvalidGridSize { count: 0, .. })
    ));

    let config = create_sweep_config([10, 10, 10, 10, 10, 10]);
    assert!(matches!(
        SweepGrid::with_limit(&config, 1000),
        Err(AeroError::GridTooLarge { points: 1_000_000, limit: 1000 })
    ));
}

#[test]
fn test_streamed_sweep_matches_blocking_sweep() {
    let config = create_sweep_config([2, 3, 2, 1, 1, 2]);
    let grid = SweepGrid::new(&config).unwrap();
    let settings = EvaluationSettings::fresh();
    let mut vehicle = VehicleConfig::light_aircraft().build().unwrap();

    let blocking =
        run_sweep(&mut vehicle, &grid, &settings, SweepMode::Parallel, &CancelToken::new()).unwrap();

    let handle = spawn_sweep(vehicle, grid, settings, SweepMode::Parallel, 4);
    assert_eq!(handle.total(), blocking.len());
    let first = handle.points().recv().unwrap();
    let mut streamed = handle.wait().unwrap();
    streamed.push(first);
    streamed.sort_by_key(|p| p.index);

    assert_eq!(streamed, blocking);
}

#[test]
fn test_streamed_sweep_can_be_cancelled() {
    let config = create_sweep_config([10, 10, 10, 10, 1, 1]);
    let grid = SweepGrid::new(&config).unwrap();
    let vehicle = VehicleConfig::light_aircraft().build().unwrap();

    let handle = spawn_sweep(vehicle, grid, EvaluationSettings::default(), SweepMode::Sequential, 1);
    assert!(handle.points().recv().is_ok());
    handle.cancel();

    assert!(matches!(
        handle.wait(),
        Err(AeroError::Cancelled { total: 10_000, .. })
    ));
}
