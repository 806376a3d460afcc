//! Project schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current project file version. `validate_project` rejects anything newer.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub experiments: Vec<ExperimentDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentDef {
    pub id: String,
    pub name: String,
    pub hypothesis: String,
    /// Target values declared when the experiment is defined. Values may
    /// be numeric targets or free-text descriptions.
    #[serde(default)]
    pub expected_metrics: BTreeMap<String, ExpectedValue>,
    #[serde(default)]
    pub status: ExperimentStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExpectedValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl std::fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperimentStatus::Active => write!(f, "active"),
            ExperimentStatus::Completed => write!(f, "completed"),
            ExperimentStatus::Archived => write!(f, "archived"),
        }
    }
}
