//! Loss-surface evaluation over a rectangular `(k, p)` region.
//!
//! The surface is exhaustive: every grid point is scored by the RMSE of the
//! power law against all observed periods. It is meant for visualizing how
//! sharp the optimum is, not for optimization.
//!
//! Cost is `O(steps² · n)`. Nothing here caps `steps` or the trial count;
//! interactive callers should keep both in the tens.

use nalgebra::DMatrix;

use crate::domain::{Fit, LossSurfaceCell, LossSurfaceResult, SurfaceConfig, Trial};
use crate::fit::grid::lin_space;
use crate::models::predict_period;

/// Evaluate RMSE on a `steps × steps` grid.
///
/// With `steps < 2` or no trials the result carries the requested grid
/// definition and an empty cell list.
pub fn compute_loss_surface(trials: &[Trial], config: &SurfaceConfig) -> LossSurfaceResult {
    let mut result = LossSurfaceResult {
        steps: config.steps,
        k_range: config.k_range,
        p_range: config.p_range,
        cells: Vec::new(),
    };
    if config.steps < 2 || trials.is_empty() {
        return result;
    }

    let ks = lin_space(config.k_range.0, config.k_range.1, config.steps);
    let ps = lin_space(config.p_range.0, config.p_range.1, config.steps);

    result.cells.reserve(config.steps * config.steps);
    for (k_index, &k) in ks.iter().enumerate() {
        for (p_index, &p) in ps.iter().enumerate() {
            result.cells.push(LossSurfaceCell {
                k,
                p,
                rmse: rmse(trials, &Fit { k, p }),
                k_index,
                p_index,
            });
        }
    }
    result
}

/// Root-mean-square error of `fit` against the observed periods.
///
/// Returns `0.0` for an empty trial list.
pub fn rmse(trials: &[Trial], fit: &Fit) -> f64 {
    if trials.is_empty() {
        return 0.0;
    }
    let sse: f64 = trials
        .iter()
        .map(|t| {
            let r = predict_period(fit, t.length) - t.observed_period;
            r * r
        })
        .sum();
    (sse / trials.len() as f64).sqrt()
}

impl LossSurfaceResult {
    /// Lowest-RMSE cell; the first one in grid order wins ties.
    pub fn best_cell(&self) -> Option<&LossSurfaceCell> {
        let mut cells = self.cells.iter();
        let first = cells.next()?;
        Some(cells.fold(first, |best, c| if c.rmse < best.rmse { c } else { best }))
    }

    /// Smallest and largest RMSE on the grid.
    pub fn rmse_bounds(&self) -> Option<(f64, f64)> {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.rmse), hi.max(c.rmse))
        }))
    }

    /// Cell closest to `(k, p)`, measuring distance in grid-index units so the
    /// two axes weigh equally regardless of their ranges.
    pub fn nearest_cell(&self, k: f64, p: f64) -> Option<&LossSurfaceCell> {
        if self.cells.is_empty() || self.steps < 2 {
            return None;
        }
        let k_idx = axis_index(k, self.k_range, self.steps);
        let p_idx = axis_index(p, self.p_range, self.steps);
        self.cells
            .iter()
            .find(|c| c.k_index == k_idx && c.p_index == p_idx)
    }

    /// RMSE values as a dense matrix: row = `k_index`, column = `p_index`.
    ///
    /// Returns a `0 × 0` matrix when the surface is empty. Cells whose indices
    /// fall outside the `steps × steps` grid are skipped.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        if self.cells.is_empty() {
            return DMatrix::zeros(0, 0);
        }
        let mut m = DMatrix::zeros(self.steps, self.steps);
        for c in &self.cells {
            if c.k_index < self.steps && c.p_index < self.steps {
                m[(c.k_index, c.p_index)] = c.rmse;
            }
        }
        m
    }
}

fn axis_index(value: f64, range: (f64, f64), steps: usize) -> usize {
    let span = range.1 - range.0;
    if span == 0.0 || !span.is_finite() || !value.is_finite() {
        return 0;
    }
    let pos = ((value - range.0) / span * (steps - 1) as f64).round();
    pos.clamp(0.0, (steps - 1) as f64) as usize
}
