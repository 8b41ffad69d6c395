//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the log subscriber
//! - parses CLI arguments
//! - runs the experiment pipeline
//! - prints reports or JSON

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, CompareArgs, Command, ExperimentArgs, RunArgs};
use crate::domain::{PendulumConfig, SurfaceConfig};
use crate::error::AppError;
use crate::math::LehmerRng;
use crate::session::{ExperimentHistory, RunSnapshot};

pub mod pipeline;

use pipeline::{ExperimentConfig, run_experiment};

/// Entry point for the `pendulum` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Compare(args) => handle_compare(args),
    }
}

/// Log to stderr so stdout stays clean for reports and JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = experiment_config_from_args(&args.experiment, args.noise)?;
    let run = run_experiment(&config)?;
    info!(trials = run.trials.len(), k = run.fit.k, p = run.fit.p, "experiment finished");

    if args.json {
        let json = serde_json::to_string_pretty(&run)
            .map_err(|e| AppError::output(format!("Failed to serialize run: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_run_summary(&run));
    }
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let history = compare_noise_levels(&args)?;
    println!("{}", crate::report::format_history(&history));
    Ok(())
}

/// Run the experiment once per noise level and record every run.
///
/// Ids carry the run's position and the full-precision σ, so levels that
/// agree to a few decimals (or repeat) still get their own entry.
pub fn compare_noise_levels(args: &CompareArgs) -> Result<ExperimentHistory, AppError> {
    if args.noise_levels.is_empty() {
        return Err(AppError::usage("At least one noise level is required."));
    }

    let mut history = ExperimentHistory::with_capacity(args.history);
    for (i, &noise) in args.noise_levels.iter().enumerate() {
        let config = experiment_config_from_args(&args.experiment, noise)?;
        let run = run_experiment(&config)?;
        let snapshot = RunSnapshot::from_run(format!("{}:sigma-{noise}", i + 1), &run)
            .with_label(format!("σ={noise}"));
        history.add(snapshot);
    }
    Ok(history)
}

/// Build the pipeline config from CLI flags (plus defaults).
pub fn experiment_config_from_args(args: &ExperimentArgs, noise: f64) -> Result<ExperimentConfig, AppError> {
    if !(args.k_min.is_finite() && args.k_max.is_finite() && args.k_max > args.k_min) {
        return Err(AppError::usage(format!(
            "Invalid k range: min={}, max={} (must be finite and max>min).",
            args.k_min, args.k_max
        )));
    }
    if !(args.p_min.is_finite() && args.p_max.is_finite() && args.p_max > args.p_min) {
        return Err(AppError::usage(format!(
            "Invalid p range: min={}, max={} (must be finite and max>min).",
            args.p_min, args.p_max
        )));
    }

    let mut config = ExperimentConfig {
        lengths: args.lengths.clone(),
        pendulum: PendulumConfig {
            gravity: args.gravity,
            noise_sigma: noise,
            seed: args.seed,
        },
        surface: SurfaceConfig {
            k_range: (args.k_min, args.k_max),
            p_range: (args.p_min, args.p_max),
            steps: args.steps,
        },
        centre_surface_on_fit: args.centre_on_fit,
        next_length: args.next_length,
    };
    for &length in &args.add {
        config = config.with_length(length);
    }

    // Separate stream from the noise draws, still reproducible per seed.
    let mut rng = LehmerRng::new(args.seed.wrapping_add(1));
    for _ in 0..args.add_random {
        config = config.with_random_length(&mut rng);
    }
    Ok(config)
}
