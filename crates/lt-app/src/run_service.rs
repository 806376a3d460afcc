//! Run logging and retrieval.

use std::collections::BTreeMap;
use std::path::Path;

use lt_core::ensure_finite;
use lt_results::{RunRecord, RunStore};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::project_service;

/// Request to log a new run against an experiment.
#[derive(Debug, Clone)]
pub struct LogRunRequest<'a> {
    pub project_path: &'a Path,
    pub experiment_id: &'a str,
    pub parameters: BTreeMap<String, serde_json::Value>,
    pub metrics: BTreeMap<String, f64>,
    pub notes: Option<String>,
}

/// Log a run: validate, assign the next run number, persist.
///
/// Metric finiteness is checked here, at the point of entry; everything
/// downstream may assume finite values.
pub fn log_run(request: &LogRunRequest) -> AppResult<RunRecord> {
    let project = project_service::load_project(request.project_path)?;
    project_service::get_experiment(&project, request.experiment_id)?;

    for (metric, value) in &request.metrics {
        ensure_finite(*value, metric)?;
    }

    let store = RunStore::for_project(request.project_path)?;
    let run_number = store.next_run_number(request.experiment_id)?;

    let record = RunRecord {
        run_id: uuid::Uuid::new_v4().to_string(),
        experiment_id: request.experiment_id.to_string(),
        run_number,
        parameters: request.parameters.clone(),
        metrics: request.metrics.clone(),
        notes: request.notes.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    store.save_run(&record)?;
    debug!(
        experiment_id = request.experiment_id,
        run_number, "logged run"
    );

    Ok(record)
}

/// All runs of an experiment, ascending by run number.
pub fn list_runs(project_path: &Path, experiment_id: &str) -> AppResult<Vec<RunRecord>> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.list_runs(experiment_id)?)
}

pub fn load_run(project_path: &Path, experiment_id: &str, run_id: &str) -> AppResult<RunRecord> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.load_run(experiment_id, run_id)?)
}

/// Resolve a run by its user-facing sequence number.
pub fn find_run_by_number(
    project_path: &Path,
    experiment_id: &str,
    run_number: u32,
) -> AppResult<RunRecord> {
    let runs = list_runs(project_path, experiment_id)?;
    runs.into_iter()
        .find(|r| r.run_number == run_number)
        .ok_or_else(|| AppError::RunNotFound(format!("run #{run_number} in {experiment_id}")))
}

pub fn delete_run(project_path: &Path, experiment_id: &str, run_id: &str) -> AppResult<()> {
    let store = RunStore::for_project(project_path)?;
    store.delete_run(experiment_id, run_id)?;
    Ok(())
}
