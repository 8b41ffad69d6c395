//! Synthetic measurement generation.

pub mod trials;

pub use trials::*;
