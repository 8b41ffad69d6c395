//! Shared domain types.
//!
//! These types are plain data so they can be:
//!
//! - passed between pipeline stages without conversion
//! - serialized to JSON for a visualization layer (camelCase field names)
//! - compared in tests

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard gravity (m/s²).
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// Multiplicative noise level applied to simulated periods.
pub const DEFAULT_NOISE_SIGMA: f64 = 0.02;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: i64 = 17;

/// Lengths (m) measured before the first "add experiment" action.
pub const DEFAULT_EXPERIMENT_LENGTHS: [f64; 5] = [0.5, 0.8, 1.2, 1.6, 2.1];

/// One measured pendulum swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    /// Pendulum length (m), strictly positive.
    pub length: f64,
    /// Observed period (s), strictly positive.
    pub observed_period: f64,
}

impl Trial {
    /// Build a trial, rejecting non-positive or non-finite values.
    pub fn new(length: f64, observed_period: f64) -> Result<Self, AppError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Trial length must be finite and > 0 (got {length})."
            )));
        }
        if !(observed_period.is_finite() && observed_period > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Observed period must be finite and > 0 (got {observed_period})."
            )));
        }
        Ok(Self {
            length,
            observed_period,
        })
    }
}

/// Parameters of the power law `T = k · L^p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub k: f64,
    pub p: f64,
}

/// Simulation settings for [`crate::data::simulate_trials`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendulumConfig {
    pub gravity: f64,
    pub noise_sigma: f64,
    pub seed: i64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            noise_sigma: DEFAULT_NOISE_SIGMA,
            seed: DEFAULT_SEED,
        }
    }
}

/// Grid definition for [`crate::fit::compute_loss_surface`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceConfig {
    pub k_range: (f64, f64),
    pub p_range: (f64, f64),
    pub steps: usize,
}

impl Default for SurfaceConfig {
    /// Centred on the noise-free optimum for standard gravity
    /// (`k = 2π/√9.81 ≈ 2.006`, `p = 0.5`).
    fn default() -> Self {
        Self {
            k_range: (1.8, 2.2),
            p_range: (0.45, 0.55),
            steps: 32,
        }
    }
}

impl SurfaceConfig {
    /// Grid of `steps × steps` centred on `fit`, spanning `±k_span` and `±p_span`.
    pub fn around(fit: &Fit, k_span: f64, p_span: f64, steps: usize) -> Self {
        let k_span = k_span.abs();
        let p_span = p_span.abs();
        Self {
            k_range: (fit.k - k_span, fit.k + k_span),
            p_range: (fit.p - p_span, fit.p + p_span),
            steps,
        }
    }
}

/// One evaluated grid point of the loss surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossSurfaceCell {
    pub k: f64,
    pub p: f64,
    pub rmse: f64,
    pub k_index: usize,
    pub p_index: usize,
}

/// Dense `steps × steps` RMSE landscape.
///
/// `cells` is ordered with `k_index` as the outer loop and `p_index` as the
/// inner loop. It is empty when `steps < 2` or no trials were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossSurfaceResult {
    pub steps: usize,
    pub k_range: (f64, f64),
    pub p_range: (f64, f64),
    pub cells: Vec<LossSurfaceCell>,
}

/// Phase of the discovery loop a reasoning step describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepRole {
    Planner,
    Observation,
    Analysis,
    Action,
}

impl StepRole {
    /// Fixed transcript order.
    pub const ORDER: [StepRole; 4] = [
        StepRole::Planner,
        StepRole::Observation,
        StepRole::Analysis,
        StepRole::Action,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepRole::Planner => "planner",
            StepRole::Observation => "observation",
            StepRole::Analysis => "analysis",
            StepRole::Action => "action",
        }
    }
}

/// A single narrative record for the transcript view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub id: String,
    pub role: StepRole,
    pub heading: String,
    pub content: String,
    pub tokens: u32,
}

/// Inputs to [`crate::narrative::generate_narrative`] besides trials and fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeOptions {
    pub noise_sigma: f64,
    /// Caller-chosen next length; `None` uses `max(length) + 0.35`.
    pub next_length_suggestion: Option<f64>,
}

impl Default for NarrativeOptions {
    fn default() -> Self {
        Self {
            noise_sigma: DEFAULT_NOISE_SIGMA,
            next_length_suggestion: None,
        }
    }
}
