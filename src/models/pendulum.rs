//! The small-angle pendulum law and the power-law hypothesis fitted to it.
//!
//! Physics: `T = 2π · sqrt(L / g)`.
//! Hypothesis: `T = k · L^p`, which the physics satisfies exactly with
//! `k = 2π / sqrt(g)` and `p = 1/2`.

use std::f64::consts::PI;

use crate::domain::Fit;

/// Noise-free period (s) of a pendulum of `length` (m) under `gravity` (m/s²).
pub fn true_period(length: f64, gravity: f64) -> f64 {
    2.0 * PI * (length / gravity).sqrt()
}

/// Period predicted by the power-law hypothesis.
pub fn predict_period(fit: &Fit, length: f64) -> f64 {
    fit.k * length.powf(fit.p)
}

/// The `(k, p)` a perfect fit converges to for the given gravity.
pub fn ground_truth(gravity: f64) -> Fit {
    Fit {
        k: 2.0 * PI / gravity.sqrt(),
        p: 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_truth_reproduces_true_period() {
        let truth = ground_truth(9.81);
        for &l in &[0.25, 0.5, 1.0, 2.1, 4.0] {
            let diff = predict_period(&truth, l) - true_period(l, 9.81);
            assert!(diff.abs() < 1e-12, "L={l} diff={diff}");
        }
    }

    #[test]
    fn one_metre_pendulum_takes_about_two_seconds() {
        let t = true_period(1.0, 9.81);
        assert!((t - 2.006_066).abs() < 1e-6, "got {t}");
    }
}
