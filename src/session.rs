//! Caller-owned history of prior experiment runs.
//!
//! Front-ends that overlay several runs (e.g. the same lengths at different
//! noise levels) keep one `ExperimentHistory` and pass it around explicitly.
//! The history is bounded: the newest run goes to the front and the oldest
//! falls off once `capacity` is exceeded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::ExperimentRun;
use crate::domain::Fit;

/// Runs kept by [`ExperimentHistory::default`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Summary of one run, cheap enough to keep around for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub id: String,
    pub label: Option<String>,
    pub lengths: Vec<f64>,
    pub noise_sigma: f64,
    pub seed: i64,
    pub fit: Fit,
    /// Lowest RMSE on the run's loss surface, if the surface was non-empty.
    pub best_rmse: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl RunSnapshot {
    pub fn from_run(id: impl Into<String>, run: &ExperimentRun) -> Self {
        Self {
            id: id.into(),
            label: None,
            lengths: run.lengths.clone(),
            noise_sigma: run.noise_sigma,
            seed: run.seed,
            fit: run.fit,
            best_rmse: run.surface.best_cell().map(|c| c.rmse),
            recorded_at: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ExperimentHistory {
    entries: Vec<RunSnapshot>,
    active: Option<String>,
    capacity: usize,
}

impl Default for ExperimentHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ExperimentHistory {
    /// Empty history holding at most `capacity` runs (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            active: None,
            capacity,
        }
    }

    /// Insert `snapshot` as the newest entry and make it active.
    ///
    /// An existing entry with the same id is replaced.
    pub fn add(&mut self, snapshot: RunSnapshot) {
        self.entries.retain(|e| e.id != snapshot.id);
        self.active = Some(snapshot.id.clone());
        self.entries.insert(0, snapshot);
        self.entries.truncate(self.capacity);
    }

    /// Make the entry with `id` active. Returns `false` (and leaves the
    /// selection alone) if no such entry exists.
    pub fn select(&mut self, id: &str) -> bool {
        if self.entries.iter().any(|e| e.id == id) {
            self.active = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.active = None;
    }

    /// The selected entry, if it is still in the history.
    pub fn active(&self) -> Option<&RunSnapshot> {
        let id = self.active.as_deref()?;
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&RunSnapshot> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &RunSnapshot> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
