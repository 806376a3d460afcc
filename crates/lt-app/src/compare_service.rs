//! Comparison entry point: resolve run numbers, delegate to lt-compare.

use std::path::Path;

use lt_compare::ComparisonResult;

use crate::error::AppResult;
use crate::run_service;

/// Compare two runs of an experiment by their sequence numbers.
///
/// The report is built fresh on every call and never persisted.
pub fn compare_by_number(
    project_path: &Path,
    experiment_id: &str,
    number_a: u32,
    number_b: u32,
) -> AppResult<ComparisonResult> {
    let run_a = run_service::find_run_by_number(project_path, experiment_id, number_a)?;
    let run_b = run_service::find_run_by_number(project_path, experiment_id, number_b)?;
    Ok(lt_compare::compare_runs(&run_a, &run_b)?)
}
