//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measurement records (`Trial`) and fit parameters (`Fit`)
//! - stage configuration (`PendulumConfig`, `SurfaceConfig`, `NarrativeOptions`)
//! - stage outputs (`LossSurfaceResult`, `ReasoningStep`)

pub mod types;

pub use types::*;
