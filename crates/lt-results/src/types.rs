//! Run record data types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type RunId = String;

/// One logged execution of an experiment.
///
/// `run_number` is assigned at log time as `current run count + 1` and is
/// never reassigned, so deleting a run leaves a gap rather than renumbering.
///
/// Metrics are keyed by name in a `BTreeMap`, so iteration (and therefore
/// comparison output) is ordered by metric name rather than by whatever
/// order the metrics were entered in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    pub run_id: RunId,
    pub experiment_id: String,
    pub run_number: u32,
    /// Inputs that produced this run. Informational only.
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// Measured outputs, keyed by metric name.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}
