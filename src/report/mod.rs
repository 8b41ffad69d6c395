//! Reporting utilities: per-trial residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Fit, Trial};
use crate::models::predict_period;

/// A trial alongside the fitted prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResidual {
    pub trial: Trial,
    pub predicted: f64,
    /// `observed − predicted`.
    pub residual: f64,
}

/// Compute fitted values and residuals for each trial.
pub fn compute_residuals(trials: &[Trial], fit: &Fit) -> Vec<TrialResidual> {
    trials
        .iter()
        .map(|&trial| {
            let predicted = predict_period(fit, trial.length);
            TrialResidual {
                trial,
                predicted,
                residual: trial.observed_period - predicted,
            }
        })
        .collect()
}
