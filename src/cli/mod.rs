//! Command-line parsing for the `pendulum` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! simulation/fitting code. Every experiment flag can also be supplied through
//! a `PENDULUM_*` environment variable (or a `.env` file).

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_EXPERIMENT_LENGTHS, DEFAULT_GRAVITY, DEFAULT_NOISE_SIGMA, DEFAULT_SEED,
};

/// Noise levels compared by `pendulum compare` when none are given.
pub const DEFAULT_NOISE_PRESETS: [f64; 4] = [0.0, 0.02, 0.05, 0.08];

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pendulum", version, about = "Pendulum power-law discovery loop")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate trials, fit T = k·L^p, and print the report and transcript.
    Run(RunArgs),
    /// Run the same lengths at several noise levels and compare the fits.
    Compare(CompareArgs),
}

/// Options shared by every experiment command.
#[derive(Debug, Args, Clone)]
pub struct ExperimentArgs {
    /// Pendulum lengths in metres (comma-separated).
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_EXPERIMENT_LENGTHS.to_vec(),
        env = "PENDULUM_LENGTHS"
    )]
    pub lengths: Vec<f64>,

    /// Append a length (repeatable); the "add experiment" action.
    #[arg(long = "add", value_name = "METRES")]
    pub add: Vec<f64>,

    /// Append this many randomly proposed lengths in [0.4, 2.8) m.
    #[arg(long, default_value_t = 0)]
    pub add_random: usize,

    /// Seed for the measurement noise.
    #[arg(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true, env = "PENDULUM_SEED")]
    pub seed: i64,

    /// Gravitational acceleration (m/s²).
    #[arg(long, default_value_t = DEFAULT_GRAVITY, env = "PENDULUM_GRAVITY")]
    pub gravity: f64,

    /// Loss-surface resolution per axis.
    #[arg(long, default_value_t = 32, env = "PENDULUM_SURFACE_STEPS")]
    pub steps: usize,

    /// Lower bound of the k axis.
    #[arg(long, default_value_t = 1.8)]
    pub k_min: f64,

    /// Upper bound of the k axis.
    #[arg(long, default_value_t = 2.2)]
    pub k_max: f64,

    /// Lower bound of the p axis.
    #[arg(long, default_value_t = 0.45)]
    pub p_min: f64,

    /// Upper bound of the p axis.
    #[arg(long, default_value_t = 0.55)]
    pub p_max: f64,

    /// Centre the loss surface on the fitted (k, p) instead of the fixed bounds.
    #[arg(long)]
    pub centre_on_fit: bool,

    /// Override the transcript's proposed next length (m).
    #[arg(long)]
    pub next_length: Option<f64>,
}

/// Options for `pendulum run`.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Multiplicative noise level σ.
    #[arg(long, default_value_t = DEFAULT_NOISE_SIGMA, env = "PENDULUM_NOISE")]
    pub noise: f64,

    /// Print the run as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

/// Options for `pendulum compare`.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Noise levels to compare (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_NOISE_PRESETS.to_vec())]
    pub noise_levels: Vec<f64>,

    /// Runs kept in the comparison history.
    #[arg(long, default_value_t = crate::session::DEFAULT_HISTORY_CAPACITY)]
    pub history: usize,
}
