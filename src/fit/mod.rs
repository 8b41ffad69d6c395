//! Power-law fitting and loss-surface evaluation.
//!
//! Responsibilities:
//!
//! - estimate `(k, p)` from trials by log-log regression
//! - build evenly spaced grid axes
//! - score every `(k, p)` grid point by RMSE

pub mod estimator;
pub mod grid;
pub mod surface;

pub use estimator::*;
pub use grid::*;
pub use surface::*;
