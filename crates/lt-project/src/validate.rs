//! Project validation logic.

use crate::schema::{ExpectedValue, ExperimentDef, Project};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::schema::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "project name".to_string(),
            value: project.name.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    let mut experiment_ids = HashSet::new();
    for experiment in &project.experiments {
        if !experiment_ids.insert(&experiment.id) {
            return Err(ValidationError::DuplicateId {
                id: experiment.id.clone(),
                context: "experiments".to_string(),
            });
        }
        validate_experiment(experiment)?;
    }

    Ok(())
}

fn validate_experiment(experiment: &ExperimentDef) -> Result<(), ValidationError> {
    if experiment.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("experiment '{}' name", experiment.id),
            value: experiment.name.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    for (metric, expected) in &experiment.expected_metrics {
        if let ExpectedValue::Number(v) = expected
            && !v.is_finite()
        {
            return Err(ValidationError::InvalidValue {
                field: format!("experiment '{}' expected metric '{}'", experiment.id, metric),
                value: v.to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
    }

    Ok(())
}
