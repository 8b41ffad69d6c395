//! Formatted terminal output for runs, transcripts, and run history.
//!
//! We keep formatting code in one place so:
//! - the simulation/fitting code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::ExperimentRun;
use crate::domain::{LossSurfaceResult, ReasoningStep};
use crate::fit::rmse;
use crate::models::ground_truth;
use crate::narrative::distinct_lengths;
use crate::report::compute_residuals;
use crate::session::ExperimentHistory;

/// Width that transcript paragraphs are wrapped to.
const WRAP_WIDTH: usize = 76;

/// Format the full run summary (trials, fit diagnostics, surface, transcript).
pub fn format_run_summary(run: &ExperimentRun) -> String {
    let mut out = String::new();

    out.push_str("=== pendulum - Power-Law Discovery ===\n");
    out.push_str(&format!(
        "Trials: n={} | distinct lengths={} | g={:.2} m/s² | σ={:.2} | seed={}\n",
        run.trials.len(),
        distinct_lengths(&run.trials),
        run.gravity,
        run.noise_sigma,
        run.seed
    ));
    out.push('\n');

    out.push_str(&format_trials_table(run));
    out.push('\n');

    let truth = ground_truth(run.gravity);
    out.push_str("Fit (T = k·L^p):\n");
    out.push_str(&format!(
        "- k = {:.4} (truth {:.4}, Δ={:+.4})\n",
        run.fit.k,
        truth.k,
        run.fit.k - truth.k
    ));
    out.push_str(&format!(
        "- p = {:.4} (truth {:.4}, Δ={:+.4})\n",
        run.fit.p,
        truth.p,
        run.fit.p - truth.p
    ));
    out.push_str(&format!("- RMSE = {:.4} s\n", rmse(&run.trials, &run.fit)));
    out.push('\n');

    out.push_str(&format_surface_summary(&run.surface));
    out.push('\n');

    out.push_str("Transcript:\n");
    out.push_str(&format_transcript(&run.steps));

    out
}

/// Per-trial table of observed vs fitted periods.
pub fn format_trials_table(run: &ExperimentRun) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:>10} {:>12} {:>12} {:>12}\n",
            "#", "length_m", "observed_s", "fitted_s", "residual_s"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<10} {:-<12} {:-<12} {:-<12}", "", "", "", "", "").trim_end());
    out.push('\n');

    for (i, r) in compute_residuals(&run.trials, &run.fit).iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>10.2} {:>12.4} {:>12.4} {:>+12.4}\n",
            i + 1,
            r.trial.length,
            r.trial.observed_period,
            r.predicted,
            r.residual
        ));
    }
    out
}

/// Grid size, ranges, and best cell of a loss surface.
pub fn format_surface_summary(surface: &LossSurfaceResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Loss surface: {0}x{0} over k=[{1:.3}, {2:.3}], p=[{3:.3}, {4:.3}]\n",
        surface.steps, surface.k_range.0, surface.k_range.1, surface.p_range.0, surface.p_range.1
    ));
    match (surface.best_cell(), surface.rmse_bounds()) {
        (Some(best), Some((lo, hi))) => {
            out.push_str(&format!(
                "- best cell: k={:.4}, p={:.4}, RMSE={:.4} s (grid {},{})\n",
                best.k, best.p, best.rmse, best.k_index, best.p_index
            ));
            out.push_str(&format!("- RMSE range: [{lo:.4}, {hi:.4}] s\n"));
        }
        _ => out.push_str("- empty (needs >= 2 steps and at least one trial)\n"),
    }
    out
}

/// Role-tagged transcript with wrapped paragraphs.
pub fn format_transcript(steps: &[ReasoningStep]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str(&format!("[{}] {}\n", step.role.as_str(), step.heading));
        for line in wrap(&step.content, WRAP_WIDTH) {
            out.push_str("    ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Comparison table of stored runs, newest first; the active run is starred.
pub fn format_history(history: &ExperimentHistory) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Run history ({}/{}):\n",
        history.len(),
        history.capacity()
    ));
    if history.is_empty() {
        out.push_str("  (no runs recorded)\n");
        return out;
    }

    let active = history.active().map(|s| s.id.as_str());
    out.push_str(
        format!(
            "  {:<16} {:>6} {:>4} {:>10} {:>10} {:>12} {}\n",
            "id", "σ", "n", "k", "p", "best_rmse", "label"
        )
        .trim_end(),
    );
    out.push('\n');
    for snap in history.iter() {
        let marker = if Some(snap.id.as_str()) == active { "*" } else { " " };
        let best = snap
            .best_rmse
            .map(|v| format!("{v:.4}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{marker} {:<16} {:>6.2} {:>4} {:>10.4} {:>10.4} {:>12} {}\n",
                truncate(&snap.id, 16),
                snap.noise_sigma,
                snap.lengths.len(),
                snap.fit.k,
                snap.fit.p,
                best,
                snap.label.as_deref().unwrap_or("")
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{ExperimentConfig, run_experiment};
    use crate::domain::SurfaceConfig;
    use crate::session::RunSnapshot;

    #[test]
    fn summary_contains_every_section() {
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        let text = format_run_summary(&run);
        assert!(text.starts_with("=== pendulum - Power-Law Discovery ==="));
        assert!(text.contains("Trials: n=5 | distinct lengths=5"));
        assert!(text.contains("Fit (T = k·L^p):"));
        assert!(text.contains("Loss surface: 32x32"));
        assert!(text.contains("- best cell:"));
        assert!(text.contains("[planner] Planner"));
        assert!(text.contains("[action] Next Action"));
    }

    #[test]
    fn trials_table_has_one_row_per_trial() {
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        let table = format_trials_table(&run);
        assert_eq!(table.lines().count(), 2 + run.trials.len());
    }

    #[test]
    fn empty_surface_is_reported() {
        let config = ExperimentConfig {
            surface: SurfaceConfig {
                steps: 1,
                ..SurfaceConfig::default()
            },
            ..ExperimentConfig::default()
        };
        let run = run_experiment(&config).unwrap();
        assert!(format_surface_summary(&run.surface).contains("- empty"));
    }

    #[test]
    fn transcript_wraps_long_lines() {
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        let text = format_transcript(&run.steps);
        for line in text.lines() {
            assert!(line.chars().count() <= WRAP_WIDTH + 4, "too long: {line}");
        }
    }

    #[test]
    fn history_marks_active_run() {
        let run = run_experiment(&ExperimentConfig::default()).unwrap();
        let mut history = ExperimentHistory::default();
        history.add(RunSnapshot::from_run("first", &run));
        history.add(RunSnapshot::from_run("second", &run).with_label("σ=0.02"));
        history.select("first");

        let text = format_history(&history);
        assert!(text.starts_with("Run history (2/5):"));
        assert!(text.lines().any(|l| l.starts_with("* first")));
        assert!(text.lines().any(|l| l.starts_with("  second")));

        history.clear();
        assert!(format_history(&history).contains("(no runs recorded)"));
    }

    #[test]
    fn wrap_and_truncate() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
