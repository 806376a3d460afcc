use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lt_app::{import_runs, list_runs, parse_csv_runs};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn write_project(dir: &PathBuf) -> PathBuf {
    fs::create_dir_all(dir).expect("failed to create temp dir");
    let path = dir.join("project.yaml");
    fs::write(
        &path,
        "version: 1\n\
         id: p1\n\
         name: Sweeps\n\
         experiments:\n  \
           - id: exp-1\n    \
             name: LR sweep\n    \
             hypothesis: smaller learning rates help\n",
    )
    .expect("failed to write project file");
    path
}

#[test]
fn imported_rows_become_numbered_runs() {
    let dir = unique_temp_dir("lt_app_csv");
    let project_path = write_project(&dir);

    let rows = parse_csv_runs("accuracy,loss,optimizer\n0.7,0.5,adam\n0.8,0.3,adam\n")
        .expect("failed to parse CSV");
    let imported = import_runs(&project_path, "exp-1", &rows).expect("import failed");

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].run_number, 1);
    assert_eq!(imported[1].run_number, 2);

    let runs = list_runs(&project_path, "exp-1").expect("failed to list runs");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1].metrics["accuracy"], 0.8);
    assert_eq!(runs[0].parameters["optimizer"], serde_json::json!("adam"));
}

#[test]
fn rows_with_non_finite_cells_import_cleanly() {
    let dir = unique_temp_dir("lt_app_csv_nonfinite");
    let project_path = write_project(&dir);

    let rows = parse_csv_runs("accuracy,speed\n0.7,NaN\n0.8,inf\n").expect("failed to parse CSV");
    let imported = import_runs(&project_path, "exp-1", &rows).expect("import failed");

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].metrics["accuracy"], 0.7);
    assert!(!imported[0].metrics.contains_key("speed"));
    assert_eq!(imported[0].parameters["speed"], serde_json::json!("NaN"));
    assert_eq!(imported[1].parameters["speed"], serde_json::json!("inf"));
}

#[test]
fn import_continues_numbering_after_existing_runs() {
    let dir = unique_temp_dir("lt_app_csv_continue");
    let project_path = write_project(&dir);

    let first = parse_csv_runs("accuracy\n0.5\n").expect("failed to parse CSV");
    import_runs(&project_path, "exp-1", &first).expect("import failed");

    let second = parse_csv_runs("accuracy\n0.6\n0.7\n").expect("failed to parse CSV");
    let imported = import_runs(&project_path, "exp-1", &second).expect("import failed");

    let numbers: Vec<u32> = imported.iter().map(|r| r.run_number).collect();
    assert_eq!(numbers, [2, 3]);
}
