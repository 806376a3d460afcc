use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lt_results::{RunRecord, RunStore};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn record(run_id: &str, run_number: u32) -> RunRecord {
    let mut metrics = BTreeMap::new();
    metrics.insert("accuracy".to_string(), 0.8);
    metrics.insert("loss".to_string(), 0.4);

    let mut parameters = BTreeMap::new();
    parameters.insert("lr".to_string(), serde_json::json!(0.001));

    RunRecord {
        run_id: run_id.to_string(),
        experiment_id: "exp-1".to_string(),
        run_number,
        parameters,
        metrics,
        notes: Some("baseline".to_string()),
        created_at: "2026-08-01T00:00:00Z".to_string(),
    }
}

#[test]
fn save_list_load_roundtrip() {
    let project_dir = unique_temp_dir("lt_results_project");
    fs::create_dir_all(&project_dir).expect("failed to create temp project dir");
    let project_path = project_dir.join("project.yaml");
    fs::write(&project_path, "version: 1\nid: p1\nname: test\n")
        .expect("failed to write project file");

    let store = RunStore::for_project(&project_path).expect("failed to create run store");

    store
        .save_run(&record("run-123", 1))
        .expect("failed to save run");

    let runs = store.list_runs("exp-1").expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, "run-123");

    let loaded = store
        .load_run("exp-1", "run-123")
        .expect("failed to load run");
    assert_eq!(loaded, record("run-123", 1));

    assert!(store.has_run("exp-1", "run-123"));
    assert!(!store.has_run("exp-1", "run-999"));
}

#[test]
fn list_runs_sorted_by_run_number() {
    let dir = unique_temp_dir("lt_results_sorted");
    let store = RunStore::new(dir).expect("failed to create run store");

    store.save_run(&record("run-c", 3)).expect("save failed");
    store.save_run(&record("run-a", 1)).expect("save failed");
    store.save_run(&record("run-b", 2)).expect("save failed");

    let runs = store.list_runs("exp-1").expect("failed to list runs");
    let numbers: Vec<u32> = runs.iter().map(|r| r.run_number).collect();
    assert_eq!(numbers, [1, 2, 3]);
}

#[test]
fn run_numbering_counts_from_highest() {
    let dir = unique_temp_dir("lt_results_numbering");
    let store = RunStore::new(dir).expect("failed to create run store");

    assert_eq!(store.next_run_number("exp-1").unwrap(), 1);

    store.save_run(&record("run-a", 1)).expect("save failed");
    store.save_run(&record("run-b", 2)).expect("save failed");
    assert_eq!(store.next_run_number("exp-1").unwrap(), 3);

    // Deleting a run leaves a gap; numbers are never reassigned.
    store.delete_run("exp-1", "run-a").expect("delete failed");
    assert_eq!(store.next_run_number("exp-1").unwrap(), 3);
}

#[test]
fn load_missing_run_is_an_error() {
    let dir = unique_temp_dir("lt_results_missing");
    let store = RunStore::new(dir).expect("failed to create run store");

    let err = store.load_run("exp-1", "nope").unwrap_err();
    assert!(format!("{err}").contains("Run not found"));
}
