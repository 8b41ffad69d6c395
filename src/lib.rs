//! `pendulum-discovery` library crate.
//!
//! A deterministic simulation of a small discovery loop: propose pendulum
//! lengths, observe noisy periods, fit `T = k · L^p`, map the loss surface
//! around the fit, and narrate the next move.
//!
//! The binary (`pendulum`) is a thin wrapper around this library so that:
//!
//! - the core pipeline is testable without spawning processes
//! - other front-ends (web, notebooks) can reuse the same plain data outputs

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod narrative;
pub mod report;
pub mod session;

pub use app::pipeline::{ExperimentConfig, ExperimentRun, run_experiment};
pub use data::simulate_trials;
pub use domain::{
    Fit, LossSurfaceCell, LossSurfaceResult, NarrativeOptions, PendulumConfig, ReasoningStep,
    StepRole, SurfaceConfig, Trial,
};
pub use error::{AppError, ErrorKind};
pub use fit::{compute_loss_surface, fit_parameters};
pub use narrative::generate_narrative;
pub use session::{ExperimentHistory, RunSnapshot};
