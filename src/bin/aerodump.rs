//! aerodump - aerodynamic coefficient dumps for modular vehicles

use aerodump::resources::{DumpConfig, RangeText, SweepAxis, SweepForm, SweepReport, VehicleConfig};
use aerodump::systems::{CancelToken, CoefficientEngine, SweepMode, SweepPoint};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "aerodump")]
#[command(about = "Dump aerodynamic coefficients of a vehicle over a flight-condition sweep")]
#[command(version)]
struct Cli {
    /// Vehicle description (YAML)
    #[arg(short, long)]
    vehicle: Option<PathBuf>,

    /// Built-in vehicle preset (light_aircraft, slender_body)
    #[arg(short, long, conflicts_with = "vehicle")]
    preset: Option<String>,

    /// Dump configuration (YAML); defaults to the user config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mach range as MIN:MAX:COUNT
    #[arg(long, allow_hyphen_values = true)]
    mach: Option<String>,

    /// Angle of attack range (deg) as MIN:MAX:COUNT
    #[arg(long, allow_hyphen_values = true)]
    alpha: Option<String>,

    /// Sideslip range (deg) as MIN:MAX:COUNT
    #[arg(long, allow_hyphen_values = true)]
    beta: Option<String>,

    /// Pitch input range as MIN:MAX:COUNT
    #[arg(long, allow_hyphen_values = true)]
    pitch: Option<String>,

    /// Yaw input range as MIN:MAX:COUNT
    #[arg(long, allow_hyphen_values = true)]
    yaw: Option<String>,

    /// Roll input range as MIN:MAX:COUNT
    #[arg(long, allow_hyphen_values = true)]
    roll: Option<String>,

    /// Evaluate once at the range minima instead of sweeping
    #[arg(long)]
    single: bool,

    /// Evaluate grid points one after another on a single vehicle
    #[arg(long)]
    sequential: bool,

    /// Clear lift and stall history before every evaluation
    #[arg(long)]
    clear: bool,

    /// Take moments about the vehicle origin instead of the centre of mass
    #[arg(long)]
    origin_moments: bool,

    /// Largest accepted grid
    #[arg(long)]
    max_points: Option<usize>,

    /// Write a JSON report here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the effective dump configuration here and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> [(SweepAxis, Option<&String>); 6] {
        [
            (SweepAxis::Mach, self.mach.as_ref()),
            (SweepAxis::Alpha, self.alpha.as_ref()),
            (SweepAxis::Beta, self.beta.as_ref()),
            (SweepAxis::Pitch, self.pitch.as_ref()),
            (SweepAxis::Yaw, self.yaw.as_ref()),
            (SweepAxis::Roll, self.roll.as_ref()),
        ]
    }

    fn dump_config(&self) -> Result<DumpConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => DumpConfig::load(path)?,
            None => DumpConfig::load_or_default()?,
        };

        let mut form = SweepForm::from_config(&config.sweep);
        for (axis, text) in self.overrides() {
            if let Some(text) = text {
                *form.field_mut(axis) = RangeText::parse_triple(text)?;
            }
        }
        form.apply(&mut config.sweep)?;

        if let Some(max_points) = self.max_points {
            config.sweep.max_grid_points = max_points;
        }
        if self.clear {
            config.evaluation.clear = true;
            config.evaluation.reset_stall = true;
        }
        if self.origin_moments {
            config.evaluation.moments_at_center_of_mass = false;
        }
        Ok(config)
    }

    fn vehicle_config(&self) -> Result<VehicleConfig, Box<dyn Error>> {
        if let Some(path) = &self.vehicle {
            return Ok(VehicleConfig::load(path)?);
        }
        let name = self.preset.as_deref().unwrap_or("light_aircraft");
        VehicleConfig::preset(name).ok_or_else(|| format!("unknown vehicle preset '{}'", name).into())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.dump_config()?;

    if let Some(path) = &cli.save_config {
        config.save(path)?;
        info!("Saved dump configuration to {}", path.display());
        return Ok(());
    }

    let vehicle = cli.vehicle_config()?.build()?;
    let vehicle_name = vehicle.name.clone();
    let mut engine = CoefficientEngine::new(config.evaluation);
    engine.update_aero_data(vehicle);

    let points = if cli.single {
        let condition = config.sweep.base_condition();
        let coefficients = engine.compute_coefficients(&condition)?;
        vec![SweepPoint {
            index: 0,
            condition,
            coefficients,
        }]
    } else {
        let mode = if cli.sequential {
            SweepMode::Sequential
        } else {
            SweepMode::Parallel
        };
        engine.sweep(&config.sweep, mode, &CancelToken::new())?
    };

    match &cli.output {
        Some(path) => {
            let report = SweepReport::new(vehicle_name, config.sweep, config.evaluation, points);
            report.write(path)?;
            info!("Wrote {} points to {}", report.points.len(), path.display());
        }
        None => {
            for point in &points {
                let c = &point.condition;
                println!(
                    "M {:.3} a {:.2} b {:.2} p {:.2} y {:.2} r {:.2} | {}",
                    c.mach,
                    c.alpha,
                    c.beta,
                    c.pitch_input,
                    c.yaw_input,
                    c.roll_input,
                    point.coefficients
                );
            }
        }
    }

    Ok(())
}
