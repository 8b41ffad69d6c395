//! Power-law parameter estimation.
//!
//! `T = k · L^p` becomes a straight line after taking logs:
//!
//! ```text
//! ln T = ln k + p · ln L
//! ```
//!
//! so an ordinary least squares line through `(ln L_i, ln T_i)` gives
//! `p = slope` and `k = exp(intercept)`.
//!
//! Rank-deficient input (no trials, or a single distinct length) does not fail:
//! the line fit falls back to `slope = 0`, which shows up here as `p = 0` and
//! `k` equal to the geometric mean of the observed periods (`k = 1` when there
//! are no trials). Consumers should treat `p = 0` as a low-confidence estimate,
//! not an error.

use crate::domain::{Fit, Trial};
use crate::math::fit_line;

/// Fit `T = k · L^p` to the trials by log-log OLS.
pub fn fit_parameters(trials: &[Trial]) -> Fit {
    let xs: Vec<f64> = trials.iter().map(|t| t.length.ln()).collect();
    let ys: Vec<f64> = trials.iter().map(|t| t.observed_period.ln()).collect();

    let line = fit_line(&xs, &ys);
    Fit {
        k: line.intercept.exp(),
        p: line.slope,
    }
}
