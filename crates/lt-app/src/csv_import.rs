//! Bulk run import from CSV.
//!
//! Column rules: `parameters`, `metrics`, and `notes` columns (matched
//! case-insensitively) hold JSON / free text; every other column becomes
//! a metric when its cell parses as a number, otherwise a string
//! parameter when non-empty. Parsing is simple line/comma splitting with
//! no quoting support; robust CSV handling is a caller concern.

use std::collections::BTreeMap;
use std::path::Path;

use lt_results::RunRecord;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::run_service::{LogRunRequest, log_run};

/// One CSV row, resolved into run fields but not yet numbered or stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRun {
    pub parameters: BTreeMap<String, serde_json::Value>,
    pub metrics: BTreeMap<String, f64>,
    pub notes: Option<String>,
}

/// Parse CSV text (first line is the header) into run rows.
pub fn parse_csv_runs(content: &str) -> AppResult<Vec<ParsedRun>> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines
        .next()
        .ok_or_else(|| AppError::CsvImport("CSV is empty".to_string()))?;
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    let mut rows = Vec::new();
    for line in lines {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        rows.push(parse_row(&headers, &cells));
    }

    Ok(rows)
}

fn parse_row(headers: &[&str], cells: &[&str]) -> ParsedRun {
    let mut parameters = BTreeMap::new();
    let mut metrics = BTreeMap::new();
    let mut notes = None;

    for (header, cell) in headers.iter().zip(cells) {
        match header.to_lowercase().as_str() {
            "parameters" => {
                if !cell.is_empty() {
                    match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(cell) {
                        Ok(parsed) => parameters.extend(parsed),
                        Err(_) => {
                            parameters.insert("raw".to_string(), serde_json::json!(cell));
                        }
                    }
                }
            }
            "metrics" => {
                if !cell.is_empty() {
                    match serde_json::from_str::<BTreeMap<String, f64>>(cell) {
                        Ok(parsed) => metrics.extend(parsed),
                        Err(_) => {
                            // Non-numeric (including NaN/inf) coerces to 0.
                            let value = cell
                                .parse::<f64>()
                                .ok()
                                .filter(|v| v.is_finite())
                                .unwrap_or(0.0);
                            metrics.insert("value".to_string(), value);
                        }
                    }
                }
            }
            "notes" => {
                if !cell.is_empty() {
                    notes = Some(cell.to_string());
                }
            }
            _ => {
                // Only finite parses count as metrics; cells like "NaN" or
                // "inf" are data, not measurements, and land in parameters.
                match cell.parse::<f64>().ok().filter(|v| v.is_finite()) {
                    Some(value) => {
                        metrics.insert(header.to_string(), value);
                    }
                    None => {
                        if !cell.is_empty() {
                            parameters.insert(header.to_string(), serde_json::json!(cell));
                        }
                    }
                }
            }
        }
    }

    ParsedRun {
        parameters,
        metrics,
        notes,
    }
}

/// Import parsed rows as runs of an experiment, numbered sequentially
/// after the existing runs.
pub fn import_runs(
    project_path: &Path,
    experiment_id: &str,
    rows: &[ParsedRun],
) -> AppResult<Vec<RunRecord>> {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let request = LogRunRequest {
            project_path,
            experiment_id,
            parameters: row.parameters.clone(),
            metrics: row.metrics.clone(),
            notes: row.notes.clone(),
        };
        records.push(log_run(&request)?);
    }

    info!(experiment_id, count = records.len(), "imported runs from CSV");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_columns_become_metrics() {
        let csv = "accuracy,loss,optimizer\n0.8,0.4,adam\n0.9,0.2,sgd\n";
        let rows = parse_csv_runs(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].metrics["accuracy"], 0.8);
        assert_eq!(rows[0].metrics["loss"], 0.4);
        assert_eq!(rows[0].parameters["optimizer"], serde_json::json!("adam"));
        assert_eq!(rows[1].parameters["optimizer"], serde_json::json!("sgd"));
    }

    #[test]
    fn json_columns_are_parsed() {
        let csv = "metrics,parameters,notes\n\
                   {\"accuracy\": 0.8},{\"lr\": 0.001},warm start\n";
        let rows = parse_csv_runs(csv).unwrap();

        assert_eq!(rows[0].metrics["accuracy"], 0.8);
        assert_eq!(rows[0].parameters["lr"], serde_json::json!(0.001));
        assert_eq!(rows[0].notes.as_deref(), Some("warm start"));
    }

    #[test]
    fn malformed_json_falls_back() {
        let csv = "metrics,parameters\nnot-json,also-not-json\n";
        let rows = parse_csv_runs(csv).unwrap();

        assert_eq!(rows[0].metrics["value"], 0.0);
        assert_eq!(rows[0].parameters["raw"], serde_json::json!("also-not-json"));
    }

    #[test]
    fn empty_cells_are_skipped() {
        let csv = "accuracy,notes\n0.5,\n";
        let rows = parse_csv_runs(csv).unwrap();

        assert_eq!(rows[0].metrics["accuracy"], 0.5);
        assert!(rows[0].notes.is_none());
        assert!(rows[0].parameters.is_empty());
    }

    #[test]
    fn non_finite_cells_become_parameters_not_metrics() {
        let csv = "speed,accuracy\nNaN,0.8\n";
        let rows = parse_csv_runs(csv).unwrap();

        assert!(!rows[0].metrics.contains_key("speed"));
        assert_eq!(rows[0].parameters["speed"], serde_json::json!("NaN"));
        assert_eq!(rows[0].metrics["accuracy"], 0.8);

        let csv = "speed\ninf\n-inf\n";
        let rows = parse_csv_runs(csv).unwrap();
        assert_eq!(rows[0].parameters["speed"], serde_json::json!("inf"));
        assert_eq!(rows[1].parameters["speed"], serde_json::json!("-inf"));
        assert!(rows.iter().all(|r| r.metrics.is_empty()));
    }

    #[test]
    fn metrics_column_fallback_coerces_non_finite_to_zero() {
        let csv = "metrics\nNaN\n";
        let rows = parse_csv_runs(csv).unwrap();
        assert_eq!(rows[0].metrics["value"], 0.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse_csv_runs("").is_err());
    }

    #[test]
    fn header_names_match_case_insensitively() {
        let csv = "Notes,Accuracy\nlooks good,0.7\n";
        let rows = parse_csv_runs(csv).unwrap();

        assert_eq!(rows[0].notes.as_deref(), Some("looks good"));
        assert_eq!(rows[0].metrics["Accuracy"], 0.7);
    }
}
