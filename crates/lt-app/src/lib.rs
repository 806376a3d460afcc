//! Shared application service layer for labtrack.
//!
//! This crate provides a unified interface for front ends, centralizing
//! business logic for project management, run logging, run comparison,
//! CSV import, and result querying.

pub mod compare_service;
pub mod csv_import;
pub mod error;
pub mod project_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use compare_service::compare_by_number;
pub use csv_import::{ParsedRun, import_runs, parse_csv_runs};
pub use error::{AppError, AppResult};
pub use project_service::{
    ExperimentSummary, get_experiment, list_experiments, load_project, save_project,
    validate_project,
};
pub use query::{MetricStats, extract_metric_series, metric_names, metric_stats};
pub use run_service::{LogRunRequest, delete_run, find_run_by_number, list_runs, load_run, log_run};
