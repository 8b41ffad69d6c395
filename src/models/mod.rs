//! Pendulum model implementations.
//!
//! Models are implemented as small, pure functions so that simulation, fitting,
//! and reporting code can share them.

pub mod pendulum;

pub use pendulum::*;
