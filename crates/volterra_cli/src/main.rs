//!
//! Simulates Lotka-Volterra rabbit/fox dynamics and reports on the result.
//!
//! Usage: `volterra [--preset NAME] [--report] [--csv PATH] [--plot] ...`

mod output;
mod presets;

use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use volterra_core::analysis::analyze;
use volterra_core::equilibrium::fixed_points;
use volterra_core::model::LotkaVolterra;
use volterra_core::simulate::{simulate, Scheme, SimulationConfig, Trajectory};
use volterra_plot::TrajectoryApp;

use presets::Preset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemeArg {
    /// Explicit Euler; matches the naive reference behavior but drifts.
    Euler,
    /// Classic 4th-order Runge-Kutta.
    Rk4,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Euler => Scheme::Euler,
            SchemeArg::Rk4 => Scheme::Rk4,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "volterra")]
#[command(about = "Simulate Lotka-Volterra rabbit/fox population dynamics")]
struct Args {
    /// Prey growth rate (alpha)
    #[arg(long, default_value_t = 1.5)]
    alpha: f64,

    /// Predation rate (beta)
    #[arg(long, default_value_t = 1.0)]
    beta: f64,

    /// Predator death rate (gamma)
    #[arg(long, default_value_t = 3.0)]
    gamma: f64,

    /// Predator growth per predation (delta)
    #[arg(long, default_value_t = 1.0)]
    delta: f64,

    /// Initial rabbit population
    #[arg(long, default_value_t = 10.0)]
    rabbits: f64,

    /// Initial fox population
    #[arg(long, default_value_t = 4.0)]
    foxes: f64,

    /// Step size
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Simulated time span; a fractional number of steps is truncated
    #[arg(long, default_value_t = 20.0)]
    horizon: f64,

    /// Integration scheme
    #[arg(long, value_enum, default_value_t = SchemeArg::Rk4)]
    scheme: SchemeArg,

    /// Run a named scenario instead of the parameter flags
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Simulate every preset scenario and print a comparison
    #[arg(long)]
    compare: bool,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the trajectory as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the analysis report
    #[arg(long)]
    report: bool,

    /// Open a window with the time-series and phase-plane charts
    #[arg(long)]
    plot: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if args.compare {
        return compare(args.scheme.into());
    }

    let (model, config) = match args.preset {
        Some(preset) => {
            info!("Running preset scenario: {}", preset.name());
            (preset.model(), preset.config())
        }
        None => (
            LotkaVolterra {
                alpha: args.alpha,
                beta: args.beta,
                gamma: args.gamma,
                delta: args.delta,
            },
            SimulationConfig {
                x0: args.rabbits,
                y0: args.foxes,
                t0: 0.0,
                dt: args.dt,
                horizon: args.horizon,
            },
        ),
    };

    let trajectory = simulate(model, config, args.scheme.into())?;
    let last = trajectory.last().expect("trajectory is never empty");
    info!(
        "Integrated {} samples to t={:.2}: {:.2} rabbits, {:.2} foxes",
        trajectory.len(),
        last.t,
        last.x,
        last.y
    );

    if let Some(path) = &args.csv {
        output::write_csv(path, &trajectory)?;
        info!("Wrote {}", path.display());
    }
    if let Some(path) = &args.json {
        output::write_json(path, &trajectory)?;
        info!("Wrote {}", path.display());
    }

    if args.report {
        let equilibria = fixed_points(&model)?;
        let insights = analyze(&trajectory)?;
        output::print_report(&equilibria, &insights);
    }

    if args.plot {
        show_plot(&trajectory)?;
    }

    Ok(())
}

/// Runs every preset on its own thread; each simulation is a pure function
/// of its inputs, so the sweep shares nothing.
fn compare(scheme: Scheme) -> Result<()> {
    let results: Vec<Result<_>> = presets::ALL
        .par_iter()
        .map(|&preset| {
            let trajectory = simulate(preset.model(), preset.config(), scheme)?;
            let insights = analyze(&trajectory)?;
            Ok((preset, insights))
        })
        .collect();

    println!(
        "{:<16} {:>10} {:>10} {:>8} {:>10}",
        "scenario", "peak", "low", "cycles", "period"
    );
    for result in results {
        let (preset, insights) = result?;
        println!(
            "{:<16} {:>10.1} {:>10.1} {:>8} {:>10}",
            preset.name(),
            insights.prey.max,
            insights.prey.min,
            insights.prey.peak_count,
            insights
                .prey
                .mean_period
                .map_or_else(|| "-".to_string(), |p| format!("{p:.1}")),
        );
    }
    Ok(())
}

fn show_plot(trajectory: &Trajectory) -> Result<()> {
    TrajectoryApp::new()
        .add_population("Rabbits", &trajectory.prey_series())
        .add_population("Foxes", &trajectory.predator_series())
        .add_orbit("Orbit", &trajectory.phase_orbit())
        .run("Volterra")
        .map_err(|err| anyhow!("plot window failed: {err}"))
}
