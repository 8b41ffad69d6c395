//! Seeded Lehmer (multiplicative congruential) generator.
//!
//! `x ← 16807 · x mod (2^31 − 1)`, the Park–Miller "minimal standard".
//!
//! Every simulation builds its own generator from an explicit seed, so a
//! given `(seed, call count)` always reproduces the same stream. There is no
//! shared ambient generator. No cryptographic property is claimed.

use rand::RngCore;

const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LehmerRng {
    state: i64,
}

impl LehmerRng {
    /// Seed with `seed mod (2^31 − 1)`, shifted into `[1, 2^31 − 2]` when the
    /// remainder is zero or negative.
    pub fn new(seed: i64) -> Self {
        // Truncated remainder keeps the sign of `seed`.
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        // A remainder of -(M - 1) lands on 0, a fixed point of the recurrence.
        if state == 0 {
            state = MODULUS - 1;
        }
        Self { state }
    }

    /// Next uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }
}

impl RngCore for LehmerRng {
    fn next_u32(&mut self) -> u32 {
        // next_f64 < 1, so the product stays below 2^32.
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = LehmerRng::new(1234);
        let mut b = LehmerRng::new(1234);
        let seq_a: Vec<f64> = (0..100).map(|_| a.next_f64()).collect();
        let seq_b: Vec<f64> = (0..100).map(|_| b.next_f64()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn first_draw_from_seed_one_matches_minimal_standard() {
        // 16807 · 1 mod (2^31 − 1) = 16807.
        let mut rng = LehmerRng::new(1);
        let u = rng.next_f64();
        assert_eq!(u, 16806.0 / 2_147_483_646.0);
    }

    #[test]
    fn non_positive_seeds_are_shifted_into_range() {
        // seed 0 and seed M both reduce to 0 and land on M - 1.
        assert_eq!(LehmerRng::new(0), LehmerRng::new(MODULUS));
        assert_eq!(LehmerRng::new(0).state, MODULUS - 1);
        // -5 % M == -5 (truncated), then + (M - 1).
        assert_eq!(LehmerRng::new(-5).state, MODULUS - 6);
    }

    #[test]
    fn seed_reducing_to_zero_state_is_not_stuck() {
        // -(M - 1) % M == -(M - 1); shifting by M - 1 would leave state 0.
        let mut rng = LehmerRng::new(-(MODULUS - 1));
        assert_eq!(rng.state, MODULUS - 1);
        assert_eq!(rng, LehmerRng::new(0));
        let draws: Vec<f64> = (0..3).map(|_| rng.next_f64()).collect();
        assert!(draws.iter().all(|u| (0.0..1.0).contains(u)), "{draws:?}");
        assert_ne!(draws[0], draws[1]);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        for seed in [-7_i64, 0, 1, 17, 42, -2_147_483_646, i64::MIN, i64::MAX] {
            let mut rng = LehmerRng::new(seed);
            for _ in 0..1_000 {
                let u = rng.next_f64();
                assert!((0.0..1.0).contains(&u), "seed {seed} produced {u}");
            }
        }
    }

    #[test]
    fn drives_rand_apis() {
        let mut rng = LehmerRng::new(99);
        for _ in 0..200 {
            let v: f64 = rng.gen_range(0.4..2.8);
            assert!((0.4..2.8).contains(&v));
        }
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
    }
}
