//! lt-compare: pairwise run comparison.
//!
//! Pure computation over two [`lt_results::RunRecord`]s: per-metric
//! percentage deltas and a winner per metric. Nothing here touches disk
//! or holds state; results are recomputed per request and never persisted.

pub mod compare;
pub mod format;

pub use compare::{
    ComparisonResult, MetricComparison, Winner, compare_runs, lower_is_better, percentage_diff,
};
pub use format::{format_metric_value, format_percentage};

pub type CompareResult<T> = Result<T, CompareError>;

#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    #[error("Non-finite value for metric '{metric}' in run {run_id}: {value}")]
    NonFinite {
        metric: String,
        run_id: String,
        value: f64,
    },
}
