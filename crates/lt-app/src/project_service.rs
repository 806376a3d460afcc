//! Project loading, saving, validation, and introspection.

use serde::{Deserialize, Serialize};
use std::path::Path;
use lt_project::schema::{ExperimentDef, ExperimentStatus, Project};

use crate::error::{AppError, AppResult};

/// Summary of an experiment for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub id: String,
    pub name: String,
    pub status: ExperimentStatus,
    pub expected_metric_count: usize,
}

/// Load project from a YAML file.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project: Project = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Project(format!("Failed to parse project YAML: {}", e)))?;

    Ok(project)
}

/// Save project to a YAML file.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let content = serde_yaml::to_string(project)
        .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Validate project structure.
pub fn validate_project(project: &Project) -> AppResult<()> {
    lt_project::validate_project(project)
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// List all experiments in the project with summaries.
pub fn list_experiments(project: &Project) -> Vec<ExperimentSummary> {
    project
        .experiments
        .iter()
        .map(|experiment| ExperimentSummary {
            id: experiment.id.clone(),
            name: experiment.name.clone(),
            status: experiment.status,
            expected_metric_count: experiment.expected_metrics.len(),
        })
        .collect()
}

/// Get a specific experiment by ID.
pub fn get_experiment<'a>(project: &'a Project, experiment_id: &str) -> AppResult<&'a ExperimentDef> {
    project
        .experiments
        .iter()
        .find(|e| e.id == experiment_id)
        .ok_or_else(|| AppError::ExperimentNotFound(experiment_id.to_string()))
}
