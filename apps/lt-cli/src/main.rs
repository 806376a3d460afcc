use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use lt_app::{AppError, AppResult, LogRunRequest, compare_service, csv_import, project_service, query, run_service};
use lt_compare::{Winner, format_metric_value, format_percentage};

#[derive(Parser)]
#[command(name = "lt-cli")]
#[command(about = "labtrack CLI - Research experiment run tracking tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// List experiments in a project
    Experiments {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// List logged runs of an experiment
    Runs {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Experiment ID to list runs for
        experiment_id: String,
    },
    /// Log a new run against an experiment
    LogRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Experiment ID the run belongs to
        experiment_id: String,
        /// Metric as name=value (repeatable)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,
        /// Parameter as name=value (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show details of a logged run
    ShowRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Experiment ID
        experiment_id: String,
        /// Run number to display
        run_number: u32,
    },
    /// Compare two runs metric by metric
    Compare {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Experiment ID
        experiment_id: String,
        /// Run number for side A
        run_a: u32,
        /// Run number for side B
        run_b: u32,
    },
    /// Import runs from a CSV file
    ImportCsv {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Experiment ID to import into
        experiment_id: String,
        /// Path to the CSV file
        csv_path: PathBuf,
    },
    /// Export one metric across all runs as CSV
    ExportSeries {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Experiment ID
        experiment_id: String,
        /// Metric name (e.g. accuracy, loss)
        metric: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Experiments { project_path } => cmd_experiments(&project_path),
        Commands::Runs {
            project_path,
            experiment_id,
        } => cmd_runs(&project_path, &experiment_id),
        Commands::LogRun {
            project_path,
            experiment_id,
            metrics,
            params,
            notes,
        } => cmd_log_run(&project_path, &experiment_id, &metrics, &params, notes),
        Commands::ShowRun {
            project_path,
            experiment_id,
            run_number,
        } => cmd_show_run(&project_path, &experiment_id, run_number),
        Commands::Compare {
            project_path,
            experiment_id,
            run_a,
            run_b,
        } => cmd_compare(&project_path, &experiment_id, run_a, run_b),
        Commands::ImportCsv {
            project_path,
            experiment_id,
            csv_path,
        } => cmd_import_csv(&project_path, &experiment_id, &csv_path),
        Commands::ExportSeries {
            project_path,
            experiment_id,
            metric,
            output,
        } => cmd_export_series(&project_path, &experiment_id, &metric, output.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_experiments(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let experiments = project_service::list_experiments(&project);

    if experiments.is_empty() {
        println!("No experiments found in project");
    } else {
        println!("Experiments in project:");
        for exp in experiments {
            println!(
                "  {} - {} [{}] ({} expected metrics)",
                exp.id, exp.name, exp.status, exp.expected_metric_count
            );
        }
    }
    Ok(())
}

fn cmd_runs(project_path: &Path, experiment_id: &str) -> AppResult<()> {
    let runs = run_service::list_runs(project_path, experiment_id)?;

    if runs.is_empty() {
        println!("No runs logged for experiment: {}", experiment_id);
    } else {
        println!("Runs for experiment '{}':", experiment_id);
        for run in runs {
            println!(
                "  #{} {} ({})",
                run.run_number, run.run_id, run.created_at
            );
        }
    }
    Ok(())
}

fn cmd_log_run(
    project_path: &Path,
    experiment_id: &str,
    metric_args: &[String],
    param_args: &[String],
    notes: Option<String>,
) -> AppResult<()> {
    let mut metrics = BTreeMap::new();
    for arg in metric_args {
        let (name, value) = split_key_value(arg)?;
        let value: f64 = value.parse().map_err(|_| {
            AppError::InvalidInput(format!("metric '{name}' value is not a number: {value}"))
        })?;
        metrics.insert(name.to_string(), value);
    }

    let mut parameters = BTreeMap::new();
    for arg in param_args {
        let (name, value) = split_key_value(arg)?;
        // Numbers and booleans pass through typed; anything else is a string.
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        parameters.insert(name.to_string(), value);
    }

    let record = run_service::log_run(&LogRunRequest {
        project_path,
        experiment_id,
        parameters,
        metrics,
        notes,
    })?;

    println!("✓ Logged run #{}: {}", record.run_number, record.run_id);
    Ok(())
}

fn split_key_value(arg: &str) -> AppResult<(&str, &str)> {
    arg.split_once('=')
        .ok_or_else(|| AppError::InvalidInput(format!("expected name=value, got: {arg}")))
}

fn cmd_show_run(project_path: &Path, experiment_id: &str, run_number: u32) -> AppResult<()> {
    let run = run_service::find_run_by_number(project_path, experiment_id, run_number)?;

    println!("Run #{} ({})", run.run_number, run.run_id);
    println!("  Logged: {}", run.created_at);
    if let Some(notes) = &run.notes {
        println!("  Notes: {}", notes);
    }

    if !run.parameters.is_empty() {
        println!("\nParameters:");
        for (name, value) in &run.parameters {
            println!("  {} = {}", name, value);
        }
    }

    if !run.metrics.is_empty() {
        println!("\nMetrics:");
        for (name, value) in &run.metrics {
            println!("  {} = {}", name, format_metric_value(*value));
        }
    }

    Ok(())
}

fn cmd_compare(
    project_path: &Path,
    experiment_id: &str,
    run_a: u32,
    run_b: u32,
) -> AppResult<()> {
    let result = compare_service::compare_by_number(project_path, experiment_id, run_a, run_b)?;

    println!(
        "Comparing run #{} (A) vs run #{} (B):\n",
        result.run_a.run_number, result.run_b.run_number
    );
    println!(
        "{:<24} {:>12} {:>12} {:>10}  {}",
        "Metric", "Run A", "Run B", "Diff", "Winner"
    );

    for row in &result.comparisons {
        let badge = match row.winner {
            Winner::A => "Run A ✓",
            Winner::B => "Run B ✓",
            Winner::Tie => "tie",
        };
        println!(
            "{:<24} {:>12} {:>12} {:>10}  {}",
            row.metric,
            format_metric_value(row.run_a_value),
            format_metric_value(row.run_b_value),
            format_percentage(row.percentage_diff),
            badge
        );
    }

    Ok(())
}

fn cmd_import_csv(project_path: &Path, experiment_id: &str, csv_path: &Path) -> AppResult<()> {
    println!("Importing runs from: {}", csv_path.display());

    let content = std::fs::read_to_string(csv_path)?;
    let rows = csv_import::parse_csv_runs(&content)?;
    let imported = csv_import::import_runs(project_path, experiment_id, &rows)?;

    println!(
        "✓ Imported {} runs into experiment '{}'",
        imported.len(),
        experiment_id
    );
    for run in &imported {
        println!("  #{} {}", run.run_number, run.run_id);
    }
    Ok(())
}

fn cmd_export_series(
    project_path: &Path,
    experiment_id: &str,
    metric: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let runs = run_service::list_runs(project_path, experiment_id)?;
    let series = query::extract_metric_series(&runs, metric);

    // Build CSV
    let mut csv = format!("run_number,{}\n", metric);
    for (run_number, value) in &series {
        csv.push_str(&format!("{},{}\n", run_number, value));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
