//! Mathematical utilities: the seeded generator and closed-form line fitting.

pub mod ols;
pub mod rng;

pub use ols::*;
pub use rng::*;
