//! Error types for the lt-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Experiment not found: {0}")]
    ExperimentNotFound(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Comparison error: {0}")]
    Compare(String),

    #[error("CSV import error: {0}")]
    CsvImport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lt-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<lt_project::ProjectError> for AppError {
    fn from(err: lt_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<lt_results::ResultsError> for AppError {
    fn from(err: lt_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<lt_compare::CompareError> for AppError {
    fn from(err: lt_compare::CompareError) -> Self {
        AppError::Compare(err.to_string())
    }
}

impl From<lt_core::LtError> for AppError {
    fn from(err: lt_core::LtError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
