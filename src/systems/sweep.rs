use crossbeam_channel::{Receiver, Sender};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

use crate::components::{CoefficientResult, FlightCondition, VehicleSnapshot};
use crate::resources::{EvaluationSettings, SweepAxis, SweepConfig};
use crate::systems::engine::evaluate_vehicle;
use crate::utils::AeroError;

/// Cartesian grid over the six swept axes.
///
/// Points are addressed by a flat index with Mach as the slowest-varying
/// axis and roll input as the fastest; nothing is materialised up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    values: [Vec<f64>; 6],
    template: FlightCondition,
    len: usize,
}

impl SweepGrid {
    /// Validates the ranges and the grid size before anything is evaluated.
    pub fn new(config: &SweepConfig) -> Result<Self, AeroError> {
        Self::with_limit(config, config.max_grid_points)
    }

    pub fn with_limit(config: &SweepConfig, max_points: usize) -> Result<Self, AeroError> {
        config.validate()?;

        let points = config.point_count();
        if points > max_points as u64 {
            return Err(AeroError::GridTooLarge {
                points,
                limit: max_points,
            });
        }
        let len = usize::try_from(points).map_err(|_| AeroError::GridTooLarge {
            points,
            limit: max_points,
        })?;

        debug!("Sweep grid of {} points", len);
        Ok(Self {
            values: SweepAxis::ALL.map(|axis| config.range(axis).values()),
            template: config.base_condition(),
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn values(&self, axis: SweepAxis) -> &[f64] {
        &self.values[axis as usize]
    }

    /// Flight condition at a flat grid index.
    pub fn condition(&self, index: usize) -> Option<FlightCondition> {
        if index >= self.len {
            return None;
        }

        let mut picked = [0.0; 6];
        let mut remainder = index;
        for axis in SweepAxis::ALL.iter().rev() {
            let values = self.values(*axis);
            picked[*axis as usize] = values[remainder % values.len()];
            remainder /= values.len();
        }

        Some(FlightCondition {
            mach: picked[SweepAxis::Mach as usize],
            alpha: picked[SweepAxis::Alpha as usize],
            beta: picked[SweepAxis::Beta as usize],
            pitch_input: picked[SweepAxis::Pitch as usize],
            yaw_input: picked[SweepAxis::Yaw as usize],
            roll_input: picked[SweepAxis::Roll as usize],
            ..self.template
        })
    }

    pub fn conditions(&self) -> impl Iterator<Item = FlightCondition> + '_ {
        (0..self.len).filter_map(move |index| self.condition(index))
    }
}

/// How grid points share element state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepMode {
    /// Each point evaluates a private copy of the vehicle on the rayon pool.
    #[default]
    Parallel,
    /// One vehicle is evaluated point after point, carrying stall and lift
    /// history across points unless clearing is enabled.
    Sequential,
}

/// Shared flag that stops a running sweep from starting new points.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub index: usize,
    pub condition: FlightCondition,
    pub coefficients: CoefficientResult,
}

fn evaluate_point(
    vehicle: &mut VehicleSnapshot,
    grid: &SweepGrid,
    index: usize,
    settings: &EvaluationSettings,
) -> Result<SweepPoint, AeroError> {
    let condition = grid
        .condition(index)
        .ok_or_else(|| AeroError::InvalidParameter(format!("grid index {} out of range", index)))?;
    let coefficients = evaluate_vehicle(vehicle, &condition, settings)?;
    Ok(SweepPoint {
        index,
        condition,
        coefficients,
    })
}

/// Evaluates every grid point and returns the results in grid order.
///
/// In parallel mode `vehicle` is only read; in sequential mode it carries
/// whatever element state the evaluations leave behind.
pub fn run_sweep(
    vehicle: &mut VehicleSnapshot,
    grid: &SweepGrid,
    settings: &EvaluationSettings,
    mode: SweepMode,
    cancel: &CancelToken,
) -> Result<Vec<SweepPoint>, AeroError> {
    let total = grid.len();
    info!("Sweeping '{}' over {} points ({:?})", vehicle.name, total, mode);

    let points = match mode {
        SweepMode::Parallel => {
            let vehicle: &VehicleSnapshot = vehicle;
            let completed = AtomicUsize::new(0);
            (0..total)
                .into_par_iter()
                .map(|index| {
                    if cancel.is_cancelled() {
                        return Err(AeroError::Cancelled {
                            completed: completed.load(Ordering::Relaxed),
                            total,
                        });
                    }
                    let mut snapshot = vehicle.clone();
                    let point = evaluate_point(&mut snapshot, grid, index, settings)?;
                    completed.fetch_add(1, Ordering::Relaxed);
                    Ok(point)
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        SweepMode::Sequential => {
            let mut points = Vec::with_capacity(total);
            for index in 0..total {
                if cancel.is_cancelled() {
                    return Err(AeroError::Cancelled {
                        completed: index,
                        total,
                    });
                }
                points.push(evaluate_point(vehicle, grid, index, settings)?);
            }
            points
        }
    };

    info!("Sweep of '{}' finished", vehicle.name);
    Ok(points)
}

/// A sweep running on its own thread, streaming points as they finish.
pub struct SweepHandle {
    points: Receiver<SweepPoint>,
    cancel: CancelToken,
    worker: JoinHandle<Result<usize, AeroError>>,
    total: usize,
}

impl SweepHandle {
    /// Points in completion order. Parallel sweeps may deliver them out of
    /// grid order; use `SweepPoint::index` to place them.
    pub fn points(&self) -> &Receiver<SweepPoint> {
        &self.points
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Drains the remaining points, joins the worker and returns every point
    /// not already taken from `points()`, sorted by grid index.
    pub fn wait(self) -> Result<Vec<SweepPoint>, AeroError> {
        let mut remaining: Vec<SweepPoint> = self.points.iter().collect();
        let streamed = self.worker.join().map_err(|_| AeroError::WorkerFailed)??;
        debug!("Sweep worker streamed {} points", streamed);
        remaining.sort_by_key(|p| p.index);
        Ok(remaining)
    }
}

/// Starts a sweep on a worker thread. At most `capacity` finished points
/// are buffered before workers wait for the receiver.
pub fn spawn_sweep(
    vehicle: VehicleSnapshot,
    grid: SweepGrid,
    settings: EvaluationSettings,
    mode: SweepMode,
    capacity: usize,
) -> SweepHandle {
    let (sender, receiver) = crossbeam_channel::bounded(capacity.max(1));
    let cancel = CancelToken::new();
    let total = grid.len();

    let worker_cancel = cancel.clone();
    let worker = thread::spawn(move || {
        stream_sweep(vehicle, &grid, &settings, mode, &worker_cancel, &sender)
    });

    SweepHandle {
        points: receiver,
        cancel,
        worker,
        total,
    }
}

fn stream_sweep(
    mut vehicle: VehicleSnapshot,
    grid: &SweepGrid,
    settings: &EvaluationSettings,
    mode: SweepMode,
    cancel: &CancelToken,
    sender: &Sender<SweepPoint>,
) -> Result<usize, AeroError> {
    let total = grid.len();
    let completed = AtomicUsize::new(0);

    let emit = |vehicle: &mut VehicleSnapshot, index: usize| -> Result<(), AeroError> {
        let cancelled = || AeroError::Cancelled {
            completed: completed.load(Ordering::Relaxed),
            total,
        };
        if cancel.is_cancelled() {
            return Err(cancelled());
        }
        let point = evaluate_point(vehicle, grid, index, settings)?;
        if sender.send(point).is_err() {
            // Receiver dropped, nobody is listening any more
            cancel.cancel();
            return Err(cancelled());
        }
        completed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    };

    info!("Streaming sweep of '{}' over {} points ({:?})", vehicle.name, total, mode);
    match mode {
        SweepMode::Parallel => {
            let vehicle = &vehicle;
            (0..total).into_par_iter().try_for_each(|index| {
                let mut snapshot = vehicle.clone();
                emit(&mut snapshot, index)
            })?;
        }
        SweepMode::Sequential => {
            for index in 0..total {
                emit(&mut vehicle, index)?;
            }
        }
    }
    Ok(completed.into_inner())
}
