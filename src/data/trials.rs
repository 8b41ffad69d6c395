//! Noisy pendulum trials from a list of candidate lengths.
//!
//! Each length gets its true period from the physical law, perturbed by a
//! multiplicative uniform factor in `[1 − σ, 1 + σ)`:
//!
//! ```text
//! observed = T_true · (1 + (2u − 1) · σ),   u ~ U[0, 1)
//! ```
//!
//! A fresh [`LehmerRng`] is built from `config.seed` on every call and is
//! advanced exactly once per length, so the same inputs always reproduce the
//! same trials.

use tracing::debug;

use crate::domain::{PendulumConfig, Trial};
use crate::error::AppError;
use crate::math::LehmerRng;
use crate::models::true_period;

/// Simulate one trial per length, preserving input order.
pub fn simulate_trials(lengths: &[f64], config: &PendulumConfig) -> Result<Vec<Trial>, AppError> {
    validate_config(config)?;
    if let Some((idx, &bad)) = lengths
        .iter()
        .enumerate()
        .find(|(_, l)| !(l.is_finite() && **l > 0.0))
    {
        return Err(AppError::invalid_input(format!(
            "Length #{} must be finite and > 0 (got {bad}).",
            idx + 1
        )));
    }

    let mut rng = LehmerRng::new(config.seed);
    let mut trials = Vec::with_capacity(lengths.len());
    for &length in lengths {
        let t_true = true_period(length, config.gravity);
        let u = rng.next_f64();
        let observed = t_true * (1.0 + (2.0 * u - 1.0) * config.noise_sigma);
        // σ ≥ 1 can push the factor to zero or below.
        trials.push(Trial::new(length, observed)?);
    }

    debug!(
        n = trials.len(),
        seed = config.seed,
        noise_sigma = config.noise_sigma,
        "simulated pendulum trials"
    );
    Ok(trials)
}

fn validate_config(config: &PendulumConfig) -> Result<(), AppError> {
    if !(config.gravity.is_finite() && config.gravity > 0.0) {
        return Err(AppError::invalid_input(format!(
            "Gravity must be finite and > 0 (got {}).",
            config.gravity
        )));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::invalid_input(format!(
            "Noise sigma must be finite and >= 0 (got {}).",
            config.noise_sigma
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_EXPERIMENT_LENGTHS;

    fn config(noise_sigma: f64, seed: i64) -> PendulumConfig {
        PendulumConfig {
            noise_sigma,
            seed,
            ..PendulumConfig::default()
        }
    }

    #[test]
    fn zero_noise_reproduces_true_period_exactly() {
        let trials = simulate_trials(&DEFAULT_EXPERIMENT_LENGTHS, &config(0.0, 17)).unwrap();
        for t in &trials {
            assert_eq!(t.observed_period, true_period(t.length, 9.81));
        }
    }

    #[test]
    fn preserves_input_order_and_count() {
        let lengths = [2.1, 0.5, 1.2, 0.5];
        let trials = simulate_trials(&lengths, &PendulumConfig::default()).unwrap();
        let got: Vec<f64> = trials.iter().map(|t| t.length).collect();
        assert_eq!(got, lengths);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let a = simulate_trials(&DEFAULT_EXPERIMENT_LENGTHS, &config(0.05, 42)).unwrap();
        let b = simulate_trials(&DEFAULT_EXPERIMENT_LENGTHS, &config(0.05, 42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn noise_stays_within_sigma_band() {
        let sigma = 0.08;
        let trials = simulate_trials(&DEFAULT_EXPERIMENT_LENGTHS, &config(sigma, 3)).unwrap();
        for t in &trials {
            let ratio = t.observed_period / true_period(t.length, 9.81);
            assert!(ratio >= 1.0 - sigma - 1e-12 && ratio <= 1.0 + sigma + 1e-12, "ratio {ratio}");
        }
    }

    #[test]
    fn first_trial_uses_first_draw() {
        // seed 17: first Lehmer draw is (17 * 16807 - 1) / (2^31 - 2).
        let u = (17.0 * 16807.0 - 1.0) / 2_147_483_646.0;
        let trials = simulate_trials(&[1.0], &config(0.02, 17)).unwrap();
        let expected = true_period(1.0, 9.81) * (1.0 + (2.0 * u - 1.0) * 0.02);
        assert!((trials[0].observed_period - expected).abs() < 1e-15);
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let err = simulate_trials(&[0.5, 0.0], &PendulumConfig::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
        assert!(simulate_trials(&[-1.0], &PendulumConfig::default()).is_err());
        assert!(simulate_trials(&[f64::INFINITY], &PendulumConfig::default()).is_err());
    }

    #[test]
    fn rejects_bad_config() {
        let bad_gravity = PendulumConfig {
            gravity: 0.0,
            ..PendulumConfig::default()
        };
        assert!(simulate_trials(&[1.0], &bad_gravity).is_err());
        assert!(simulate_trials(&[1.0], &config(-0.1, 1)).is_err());
    }

    #[test]
    fn empty_lengths_give_empty_trials() {
        let trials = simulate_trials(&[], &PendulumConfig::default()).unwrap();
        assert!(trials.is_empty());
    }
}
