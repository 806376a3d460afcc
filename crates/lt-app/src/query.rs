//! Query helpers for charting and summarizing logged runs.

use lt_results::RunRecord;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Headline numbers for one metric across a sequence of runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricStats {
    pub latest: f64,
    pub best: f64,
    pub avg: f64,
}

/// All metric names across the given runs, in first-seen order.
pub fn metric_names(runs: &[RunRecord]) -> Vec<String> {
    let mut names = Vec::new();
    for run in runs {
        for name in run.metrics.keys() {
            if !names.iter().any(|n| n == name) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Extract (run number, value) pairs for one metric, in run order.
/// Runs that never logged the metric are skipped.
pub fn extract_metric_series(runs: &[RunRecord], metric: &str) -> Vec<(u32, f64)> {
    runs.iter()
        .filter_map(|run| run.metrics.get(metric).map(|v| (run.run_number, *v)))
        .collect()
}

/// Latest / best (max) / average for one metric. Runs missing the metric
/// count as 0, matching how the summary panel has always read.
pub fn metric_stats(runs: &[RunRecord], metric: &str) -> AppResult<MetricStats> {
    if runs.is_empty() {
        return Err(AppError::InvalidInput("No runs to summarize".to_string()));
    }

    let values: Vec<f64> = runs
        .iter()
        .map(|run| run.metrics.get(metric).copied().unwrap_or(0.0))
        .collect();

    let latest = *values.last().unwrap_or(&0.0);
    let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    Ok(MetricStats { latest, best, avg })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn run(run_number: u32, metrics: &[(&str, f64)]) -> RunRecord {
        RunRecord {
            run_id: format!("run-{run_number}"),
            experiment_id: "exp-1".to_string(),
            run_number,
            parameters: BTreeMap::new(),
            metrics: metrics
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            notes: None,
            created_at: "2026-08-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn metric_names_in_first_seen_order() {
        let runs = vec![
            run(1, &[("loss", 0.4)]),
            run(2, &[("accuracy", 0.8), ("loss", 0.3)]),
        ];
        assert_eq!(metric_names(&runs), ["loss", "accuracy"]);
    }

    #[test]
    fn series_skips_runs_missing_the_metric() {
        let runs = vec![
            run(1, &[("loss", 0.4)]),
            run(2, &[("accuracy", 0.8)]),
            run(3, &[("loss", 0.2)]),
        ];
        assert_eq!(extract_metric_series(&runs, "loss"), [(1, 0.4), (3, 0.2)]);
    }

    #[test]
    fn stats_treat_missing_as_zero() {
        let runs = vec![
            run(1, &[("accuracy", 0.6)]),
            run(2, &[]),
            run(3, &[("accuracy", 0.9)]),
        ];
        let stats = metric_stats(&runs, "accuracy").unwrap();
        assert_eq!(stats.latest, 0.9);
        assert_eq!(stats.best, 0.9);
        assert!((stats.avg - 0.5).abs() < 1e-12);
    }

    #[test]
    fn stats_require_at_least_one_run() {
        assert!(metric_stats(&[], "accuracy").is_err());
    }
}
