//! FERMKIN CLI entry point.
//!
//! Runs one batch/fed-batch fermentation scenario (Arrhenius-corrected
//! kinetics integrated by explicit Euler over a temperature schedule)
//! and writes the trajectory to CSV.

mod config;

use anyhow::{Context, Result};
use clap::Parser;

use fermkin_io::write_trajectory_csv;
use fermkin_kinetics::FermentationSimulator;

use crate::config::{ScenarioConfig, TemperatureMode};

/// FERMKIN version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "fermkin")]
#[command(version = VERSION)]
#[command(about = "Fermentation kinetics simulator: synthetic bioreactor trajectories", long_about = None)]
struct Args {
    /// Scenario file path (TOML format)
    ///
    /// Loads initial state, kinetic parameters, temperature schedule and
    /// output destination. Omitted sections fall back to the reference
    /// scenario. Command-line flags below override individual values.
    ///
    /// Example: --config scenarios/fed_batch.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Output CSV path (overrides [output].path)
    ///
    /// Example: --output runs/fermentation_X_0.137.csv
    #[arg(short, long)]
    output: Option<String>,

    /// Number of simulated ticks (overrides [run].time_steps)
    ///
    /// Example: --steps 18000
    #[arg(long)]
    steps: Option<usize>,

    /// Integration step dt in time units (overrides [params].dt)
    ///
    /// Example: --dt 1.0
    #[arg(long)]
    dt: Option<f64>,

    /// Feed rate F in volume-units/time (overrides [params].feed_rate)
    ///
    /// Must satisfy 0 <= F < max_feed_rate (reference limit 2).
    ///
    /// Example: --feed-rate 0.2778
    #[arg(long)]
    feed_rate: Option<f64>,

    /// Initial biomass concentration X in g/L
    #[arg(long)]
    biomass: Option<f64>,

    /// Initial lactic acid concentration P in g/L
    #[arg(long)]
    product: Option<f64>,

    /// Initial lactose concentration S in g/L
    #[arg(long)]
    substrate: Option<f64>,

    /// Initial culture volume V
    #[arg(long)]
    volume: Option<f64>,

    /// Temperature schedule: constant, sinusoidal or file
    ///
    /// Example: --temp-mode constant
    #[arg(long)]
    temp_mode: Option<String>,

    /// Base temperature in Kelvin (overrides [temperature].base)
    ///
    /// Example: --temp-base 300.0
    #[arg(long)]
    temp_base: Option<f64>,

    /// Sinusoidal amplitude in Kelvin (overrides [temperature].amplitude)
    ///
    /// Example: --temp-amplitude 5.0
    #[arg(long)]
    temp_amplitude: Option<f64>,

    /// Temperature profile CSV (implies --temp-mode file)
    ///
    /// Single temperature_k column, one sample per tick, length >= steps.
    ///
    /// Example: --temp-profile profiles/diurnal.csv
    #[arg(long)]
    temp_profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let scenario = build_scenario(&args)?;
    scenario.validate()?;

    let simulator = FermentationSimulator::new(scenario.params.clone())
        .context("failed to build simulator")?;
    let profile = scenario.temperature.build(scenario.run.time_steps)?;

    log::info!(
        "fermkin v{}: {} ticks, dt = {}, F = {}, temperature {:?}",
        VERSION,
        scenario.run.time_steps,
        scenario.params.dt,
        scenario.params.feed_rate,
        scenario.temperature.mode,
    );

    let report = simulator.run(
        scenario.initial.to_state(),
        &profile,
        scenario.run.time_steps,
    )?;

    if let Some(abort) = &report.aborted {
        log::error!(
            "run stopped at tick {} after {} completed ticks: {}",
            abort.tick,
            report.trajectory.len(),
            abort.error
        );
    }

    write_trajectory_csv(&scenario.output.path, &report.trajectory)
        .with_context(|| format!("failed to write {}", scenario.output.path))?;

    log::info!(
        "simulation {}: {} rows saved to {}",
        if report.is_complete() { "completed" } else { "aborted" },
        report.trajectory.len(),
        scenario.output.path
    );

    if report.is_complete() {
        Ok(())
    } else {
        anyhow::bail!("run aborted; partial trajectory written to {}", scenario.output.path)
    }
}

/// Load the scenario file (or defaults) and fold the CLI overrides in.
fn build_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::from_file(path)?,
        None => ScenarioConfig::default(),
    };

    if let Some(output) = &args.output {
        scenario.output.path = output.clone();
    }
    if let Some(steps) = args.steps {
        scenario.run.time_steps = steps;
    }
    if let Some(dt) = args.dt {
        scenario.params.dt = dt;
    }
    if let Some(feed_rate) = args.feed_rate {
        scenario.params.feed_rate = feed_rate;
    }
    if let Some(biomass) = args.biomass {
        scenario.initial.biomass = biomass;
    }
    if let Some(product) = args.product {
        scenario.initial.product = product;
    }
    if let Some(substrate) = args.substrate {
        scenario.initial.substrate = substrate;
    }
    if let Some(volume) = args.volume {
        scenario.initial.volume = volume;
    }
    if let Some(mode) = &args.temp_mode {
        scenario.temperature.mode = parse_temp_mode(mode)?;
    }
    if let Some(base) = args.temp_base {
        scenario.temperature.base = base;
    }
    if let Some(amplitude) = args.temp_amplitude {
        scenario.temperature.amplitude = amplitude;
    }
    if let Some(path) = &args.temp_profile {
        scenario.temperature.mode = TemperatureMode::File;
        scenario.temperature.path = Some(path.clone());
    }

    Ok(scenario)
}

fn parse_temp_mode(mode: &str) -> Result<TemperatureMode> {
    match mode {
        "constant" => Ok(TemperatureMode::Constant),
        "sinusoidal" => Ok(TemperatureMode::Sinusoidal),
        "file" => Ok(TemperatureMode::File),
        other => anyhow::bail!(
            "unknown temperature mode '{other}' (expected constant, sinusoidal or file)"
        ),
    }
}
