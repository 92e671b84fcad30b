//! Expanse command-line runner
//!
//! Runs the simulator headless for a number of ticks, writing periodic
//! snapshots, and reports the final scalar readings.
//!
//! ```bash
//! expanse --law lambda-cdm --ticks 600 --save-interval 0
//! RUST_LOG=expanse_observe=debug expanse --num 5 --ticks 10 --print-frame
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use expanse_model::ExpansionLaw;
use expanse_observe::{SolverMode, SpaceTime};
use expanse_runtime::{load_snapshot, random_field, ExpanseConfig, Simulator};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "expanse")]
#[command(about = "Point objects in expanding space, seen from the origin")]
struct Cli {
    /// JSON configuration file (flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed objects from a snapshot instead of generating them
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of random objects to create if no input is given
    #[arg(long)]
    num: Option<usize>,

    /// Half-width of the square random objects are drawn from
    #[arg(long)]
    spread: Option<f64>,

    /// Seed for the random object field
    #[arg(long)]
    seed: Option<u64>,

    /// Expansion law
    #[arg(long, value_enum)]
    law: Option<LawArg>,

    /// Scale factor growth per second (constant law)
    #[arg(long)]
    expansion_rate: Option<f64>,

    /// Matter density fraction (lambda-cdm law)
    #[arg(long)]
    omega_matter: Option<f64>,

    /// Dark-energy density fraction (lambda-cdm law)
    #[arg(long)]
    omega_dark_energy: Option<f64>,

    /// Hubble parameter (lambda-cdm law)
    #[arg(long)]
    hubble_param: Option<f64>,

    #[arg(long)]
    initial_scale_factor: Option<f64>,

    #[arg(long)]
    light_speed: Option<f64>,

    /// Multiply light speed by this factor every tick
    #[arg(long)]
    light_speed_decay: Option<f64>,

    /// Quantity averaged by the light delay solver
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Frame time per tick in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Number of ticks to run
    #[arg(short, long, default_value = "600")]
    ticks: u64,

    /// Seconds between automatic snapshots; 0 to disable
    #[arg(long)]
    save_interval: Option<f64>,

    /// Directory snapshots are written to
    #[arg(long)]
    snapshots_dir: Option<PathBuf>,

    /// Print the final frame's projections as JSON lines
    #[arg(long)]
    print_frame: bool,

    /// Log as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LawArg {
    Static,
    Constant,
    LambdaCdm,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    ScaleFactor,
    LightSpeed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = build_config(&cli)?;
    config.validate().context("invalid configuration")?;

    let space = match &cli.input {
        Some(path) => {
            let snapshot = load_snapshot(path)?;
            info!(path = %path.display(), objects = snapshot.objects.len(), "seeding from snapshot");
            SpaceTime::from_snapshot(config.cosmology.clone(), config.solver.clone(), &snapshot)?
        }
        None => SpaceTime::new(
            config.cosmology.clone(),
            config.solver.clone(),
            random_field(&config.objects),
        )?,
    };

    let mut sim = Simulator::new(space, config.simulator.clone())?;
    sim.every(1.0, |space, t| {
        let scalars = space.scalar_snapshot();
        debug!(t, ?scalars, "hud");
    });
    sim.run(cli.ticks)?;

    for (label, value) in sim.readings() {
        info!("{label}: {value:.4}");
    }

    if cli.print_frame {
        for projection in sim.frame() {
            let line = serde_json::json!({
                "role": projection.role.name(),
                "pos": projection.position.to_array(),
            });
            println!("{line}");
        }
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// File configuration (or defaults) with command-line overrides applied
fn build_config(cli: &Cli) -> Result<ExpanseConfig> {
    let mut config = match &cli.config {
        Some(path) => ExpanseConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExpanseConfig::default(),
    };

    let cosmology = &mut config.cosmology;
    cosmology.law = override_law(cosmology.law, cli);
    if let Some(a) = cli.initial_scale_factor {
        cosmology.initial_scale_factor = a;
    }
    if let Some(c) = cli.light_speed {
        cosmology.light_speed = c;
    }
    if let Some(factor) = cli.light_speed_decay {
        *cosmology = cosmology.clone().with_light_speed_decay(factor);
    }

    if let Some(mode) = cli.mode {
        config.solver.mode = match mode {
            ModeArg::ScaleFactor => SolverMode::ScaleFactor,
            ModeArg::LightSpeed => SolverMode::LightSpeed,
        };
    }

    let simulator = &mut config.simulator;
    if let Some(dt) = cli.dt {
        simulator.dt = dt;
    }
    if let Some(interval) = cli.save_interval {
        simulator.save_interval = interval;
    }
    if let Some(dir) = &cli.snapshots_dir {
        simulator.snapshots_dir = dir.clone();
    }

    let objects = &mut config.objects;
    if let Some(num) = cli.num {
        objects.num = num;
    }
    if let Some(spread) = cli.spread {
        objects.spread = spread;
    }
    if let Some(seed) = cli.seed {
        objects.seed = seed;
    }

    Ok(config)
}

/// Parameters not given on the command line come from the configured law
/// when it is of the same kind, otherwise from defaults.
fn override_law(current: ExpansionLaw, cli: &Cli) -> ExpansionLaw {
    let kind = match (cli.law, current) {
        (Some(kind), _) => kind,
        (None, ExpansionLaw::Static) => LawArg::Static,
        (None, ExpansionLaw::Constant { .. }) => LawArg::Constant,
        (None, ExpansionLaw::LambdaCdm { .. }) => LawArg::LambdaCdm,
    };

    match kind {
        LawArg::Static => ExpansionLaw::Static,
        LawArg::Constant => {
            let base = match current {
                ExpansionLaw::Constant { expansion_rate } => expansion_rate,
                _ => 0.1,
            };
            ExpansionLaw::Constant {
                expansion_rate: cli.expansion_rate.unwrap_or(base),
            }
        }
        LawArg::LambdaCdm => {
            let (om, ode, h) = match current {
                ExpansionLaw::LambdaCdm {
                    omega_matter,
                    omega_dark_energy,
                    hubble_param,
                } => (omega_matter, omega_dark_energy, hubble_param),
                _ => (0.3, 0.7, 1.0),
            };
            ExpansionLaw::LambdaCdm {
                omega_matter: cli.omega_matter.unwrap_or(om),
                omega_dark_energy: cli.omega_dark_energy.unwrap_or(ode),
                hubble_param: cli.hubble_param.unwrap_or(h),
            }
        }
    }
}
