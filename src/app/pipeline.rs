//! Shared experiment pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! lengths -> simulated trials -> fit -> loss surface + transcript
//!
//! The loss surface and the transcript both depend only on the trials and the
//! fit, never on each other. Nothing is cached: the "add experiment" action
//! is a new config with one more length, and the pipeline simply runs again.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::simulate_trials;
use crate::domain::{
    DEFAULT_EXPERIMENT_LENGTHS, Fit, LossSurfaceResult, NarrativeOptions, PendulumConfig,
    ReasoningStep, SurfaceConfig, Trial,
};
use crate::error::AppError;
use crate::fit::{compute_loss_surface, fit_parameters};
use crate::narrative::generate_narrative;

/// Range (m) of lengths proposed by [`ExperimentConfig::with_random_length`].
const RANDOM_LENGTH_MIN: f64 = 0.4;
const RANDOM_LENGTH_MAX: f64 = 2.8;

/// Everything needed for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentConfig {
    pub lengths: Vec<f64>,
    pub pendulum: PendulumConfig,
    pub surface: SurfaceConfig,
    /// Keep the spans and resolution of `surface` but centre the grid on the
    /// fitted `(k, p)`.
    pub centre_surface_on_fit: bool,
    /// Overrides the transcript's default next-length proposal.
    pub next_length: Option<f64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            lengths: DEFAULT_EXPERIMENT_LENGTHS.to_vec(),
            pendulum: PendulumConfig::default(),
            surface: SurfaceConfig::default(),
            centre_surface_on_fit: false,
            next_length: None,
        }
    }
}

impl ExperimentConfig {
    /// Copy of this config with `length` appended.
    pub fn with_length(&self, length: f64) -> Self {
        let mut next = self.clone();
        next.lengths.push(length);
        next
    }

    /// Copy of this config with one random length in `[0.4, 2.8)` appended,
    /// rounded to centimetres.
    pub fn with_random_length<R: Rng>(&self, rng: &mut R) -> Self {
        let raw: f64 = rng.gen_range(RANDOM_LENGTH_MIN..RANDOM_LENGTH_MAX);
        self.with_length((raw * 100.0).round() / 100.0)
    }
}

/// All computed outputs of a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentRun {
    pub lengths: Vec<f64>,
    pub gravity: f64,
    pub noise_sigma: f64,
    pub seed: i64,
    pub trials: Vec<Trial>,
    pub fit: Fit,
    pub surface: LossSurfaceResult,
    pub steps: Vec<ReasoningStep>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentRun, AppError> {
    // 1) Simulate noisy measurements (fails fast on bad lengths/config).
    let trials = simulate_trials(&config.lengths, &config.pendulum)?;

    // 2) Fit the power law.
    let fit = fit_parameters(&trials);
    debug!(k = fit.k, p = fit.p, n = trials.len(), "fitted power law");

    // 3) Loss surface and transcript, independently.
    let surface_config = if config.centre_surface_on_fit {
        let s = &config.surface;
        SurfaceConfig::around(
            &fit,
            (s.k_range.1 - s.k_range.0) / 2.0,
            (s.p_range.1 - s.p_range.0) / 2.0,
            s.steps,
        )
    } else {
        config.surface
    };
    let surface = compute_loss_surface(&trials, &surface_config);
    debug!(
        steps = surface.steps,
        cells = surface.cells.len(),
        "evaluated loss surface"
    );

    let options = NarrativeOptions {
        noise_sigma: config.pendulum.noise_sigma,
        next_length_suggestion: config.next_length,
    };
    let steps = generate_narrative(&trials, &fit, &options);

    Ok(ExperimentRun {
        lengths: config.lengths.clone(),
        gravity: config.pendulum.gravity,
        noise_sigma: config.pendulum.noise_sigma,
        seed: config.pendulum.seed,
        trials,
        fit,
        surface,
        steps,
    })
}
