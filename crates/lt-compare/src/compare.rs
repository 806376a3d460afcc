//! Pairwise run comparison.

use lt_results::RunRecord;
use serde::{Deserialize, Serialize};

use crate::{CompareError, CompareResult};

/// Which run fared better on a given metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "tie")]
    Tie,
}

impl Winner {
    /// The same verdict with the runs swapped.
    pub fn flipped(self) -> Self {
        match self {
            Winner::A => Winner::B,
            Winner::B => Winner::A,
            Winner::Tie => Winner::Tie,
        }
    }
}

/// One row of a comparison: a single metric across both runs.
///
/// A metric absent from one run is reported as 0 for that run rather than
/// being excluded, so a metric logged only in run B always reads as a
/// ±100% swing. Misleading for brand-new metrics, but kept for
/// compatibility with how existing reports read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: String,
    pub run_a_value: f64,
    pub run_b_value: f64,
    /// Relative change of B versus A, with A as baseline (percent).
    pub percentage_diff: f64,
    pub winner: Winner,
}

/// Full comparison report. Embeds both run records by value so the
/// report stands alone once the runs it came from scroll out of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub run_a: RunRecord,
    pub run_b: RunRecord,
    /// One entry per metric in the union of both runs' metric names:
    /// run A's names first (in map order), then names only run B has.
    pub comparisons: Vec<MetricComparison>,
}

/// Guess whether a smaller value is better, from the metric's name alone.
///
/// Known limitation: this is a naming-convention heuristic, not a
/// user-declared property. A metric named `uptime` matches `time` and is
/// misclassified. Replacing this predicate with an explicit per-metric
/// direction declared at experiment-definition time is the intended fix;
/// until then all direction decisions funnel through here.
pub fn lower_is_better(metric: &str) -> bool {
    const HINTS: [&str; 4] = ["loss", "error", "latency", "time"];
    let name = metric.to_lowercase();
    HINTS.iter().any(|hint| name.contains(hint))
}

/// Relative change of `value_b` versus `value_a`, in percent.
///
/// With a zero baseline the ratio is undefined, so the result falls back
/// to a sign-only ±100 (or 0 when both sides are zero).
pub fn percentage_diff(value_a: f64, value_b: f64) -> f64 {
    if value_a == 0.0 && value_b == 0.0 {
        0.0
    } else if value_a == 0.0 {
        if value_b > 0.0 { 100.0 } else { -100.0 }
    } else {
        ((value_b - value_a) / value_a.abs()) * 100.0
    }
}

fn ensure_finite_metric(value: f64, metric: &str, run_id: &str) -> CompareResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CompareError::NonFinite {
            metric: metric.to_string(),
            run_id: run_id.to_string(),
            value,
        })
    }
}

/// Compare two runs metric by metric.
///
/// The report covers the union of both runs' metric names; a name absent
/// from one side contributes 0 for that side. Rejects non-finite metric
/// values rather than letting NaN/Infinity flow into the report; all
/// finite inputs (zeros, negatives, empty mappings) succeed.
pub fn compare_runs(run_a: &RunRecord, run_b: &RunRecord) -> CompareResult<ComparisonResult> {
    let mut metric_names: Vec<&String> = run_a.metrics.keys().collect();
    for name in run_b.metrics.keys() {
        if !run_a.metrics.contains_key(name) {
            metric_names.push(name);
        }
    }

    let mut comparisons = Vec::with_capacity(metric_names.len());

    for metric in metric_names {
        let value_a = run_a.metrics.get(metric).copied().unwrap_or(0.0);
        let value_b = run_b.metrics.get(metric).copied().unwrap_or(0.0);
        let value_a = ensure_finite_metric(value_a, metric, &run_a.run_id)?;
        let value_b = ensure_finite_metric(value_b, metric, &run_b.run_id)?;

        let winner = if value_a == value_b {
            Winner::Tie
        } else if lower_is_better(metric) {
            if value_a < value_b { Winner::A } else { Winner::B }
        } else if value_a > value_b {
            Winner::A
        } else {
            Winner::B
        };

        comparisons.push(MetricComparison {
            metric: metric.clone(),
            run_a_value: value_a,
            run_b_value: value_b,
            percentage_diff: percentage_diff(value_a, value_b),
            winner,
        });
    }

    Ok(ComparisonResult {
        run_a: run_a.clone(),
        run_b: run_b.clone(),
        comparisons,
    })
}
