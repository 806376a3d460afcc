//! Run storage API.
//!
//! Runs live next to the project file under `.labtrack/runs/`, one
//! directory per experiment and one pretty-printed JSON file per run.

use crate::types::RunRecord;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn for_project(project_path: &Path) -> ResultsResult<Self> {
        let project_dir = project_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "project path has no parent directory".to_string(),
            })?;
        let runs_dir = project_dir.join(".labtrack").join("runs");
        Self::new(runs_dir)
    }

    fn experiment_dir(&self, experiment_id: &str) -> PathBuf {
        self.root_dir.join(experiment_id)
    }

    fn run_path(&self, experiment_id: &str, run_id: &str) -> PathBuf {
        self.experiment_dir(experiment_id).join(format!("{run_id}.json"))
    }

    pub fn has_run(&self, experiment_id: &str, run_id: &str) -> bool {
        self.run_path(experiment_id, run_id).exists()
    }

    pub fn save_run(&self, record: &RunRecord) -> ResultsResult<()> {
        let experiment_dir = self.experiment_dir(&record.experiment_id);
        fs::create_dir_all(&experiment_dir)?;

        let path = self.run_path(&record.experiment_id, &record.run_id);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(path, json)?;

        Ok(())
    }

    pub fn load_run(&self, experiment_id: &str, run_id: &str) -> ResultsResult<RunRecord> {
        let path = self.run_path(experiment_id, run_id);

        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// All runs of an experiment, ascending by run number.
    pub fn list_runs(&self, experiment_id: &str) -> ResultsResult<Vec<RunRecord>> {
        let mut runs = Vec::new();

        let experiment_dir = self.experiment_dir(experiment_id);
        if !experiment_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&experiment_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                if let Ok(record) = serde_json::from_str::<RunRecord>(&content)
                    && record.experiment_id == experiment_id
                {
                    runs.push(record);
                }
            }
        }

        runs.sort_by_key(|r| r.run_number);
        Ok(runs)
    }

    /// Sequence number for the next run: current run count + 1. When runs
    /// have been deleted, counts from the highest surviving number so
    /// numbers stay unique.
    pub fn next_run_number(&self, experiment_id: &str) -> ResultsResult<u32> {
        let runs = self.list_runs(experiment_id)?;
        Ok(runs.last().map(|r| r.run_number).unwrap_or(0) + 1)
    }

    pub fn delete_run(&self, experiment_id: &str, run_id: &str) -> ResultsResult<()> {
        let path = self.run_path(experiment_id, run_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
