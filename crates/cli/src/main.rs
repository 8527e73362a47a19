//! # tidysheet-cli
//!
//! Thin adapter over the tidysheet pipeline: reads tabular files,
//! applies the selected cleaning operations, and writes the converted
//! buffers (and optional chart HTML) to an output directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tidysheet_pipeline::{run_batch, CleanPlan, FileOutcome, UploadedFile};
use tidysheet_table::FileFormat;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// tidysheet - clean tabular files and convert between CSV and Excel
#[derive(Parser)]
#[command(name = "tidysheet")]
#[command(author, version, about = "Clean and convert CSV/Excel files", long_about = None)]
struct Cli {
    /// Input files (.csv or .xlsx)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Remove exact-duplicate rows
    #[arg(long)]
    dedupe: bool,

    /// Fill missing numeric values with the column mean
    #[arg(long = "fill-missing")]
    fill_missing: bool,

    /// Keep only these columns (comma-separated)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Also write a bar chart of the first two numeric columns as HTML
    #[arg(long)]
    chart: bool,

    /// Target format
    #[arg(short = 't', long = "to", default_value = "csv")]
    to: TargetFormat,

    /// Output directory (default: current directory)
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Target export format.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum TargetFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Office Open XML spreadsheet
    Xlsx,
}

impl From<TargetFormat> for FileFormat {
    fn from(t: TargetFormat) -> Self {
        match t {
            TargetFormat::Csv => FileFormat::Csv,
            TargetFormat::Xlsx => FileFormat::Xlsx,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let plan = build_plan(&cli);

    let files = cli
        .files
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Ok(UploadedFile::new(display_name(path), bytes))
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create output dir: {}", cli.out_dir.display()))?;

    let outcomes = run_batch(&files, &plan);
    let succeeded = write_outcomes(&outcomes, &cli.out_dir)?;

    if succeeded == 0 {
        anyhow::bail!("no file was processed successfully");
    }
    Ok(())
}

/// Translate CLI flags into a pipeline plan.
fn build_plan(cli: &Cli) -> CleanPlan {
    CleanPlan {
        remove_duplicates: cli.dedupe,
        fill_missing: cli.fill_missing,
        keep_columns: cli.columns.clone(),
        chart: cli.chart,
        target: cli.to.into(),
    }
}

/// The file name component of a path, as the pipeline's upload name.
fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Write export buffers and chart pages; report failures per file.
/// Returns how many files succeeded.
fn write_outcomes(outcomes: &[FileOutcome], out_dir: &Path) -> Result<usize> {
    let mut succeeded = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => {
                let out_path = out_dir.join(&result.export.file_name);
                std::fs::write(&out_path, &result.export.bytes)
                    .with_context(|| format!("Failed to write: {}", out_path.display()))?;

                let mut notes = Vec::new();
                if result.duplicates_removed > 0 {
                    notes.push(format!("{} duplicates removed", result.duplicates_removed));
                }
                if result.cells_filled > 0 {
                    notes.push(format!("{} missing values filled", result.cells_filled));
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", notes.join(", "))
                };
                println!("{} -> {}{}", outcome.file_name, out_path.display(), suffix);

                if let Some(chart) = &result.chart {
                    let chart_path = out_dir.join(chart_file_name(&result.export.file_name));
                    std::fs::write(&chart_path, chart.to_html())
                        .with_context(|| format!("Failed to write: {}", chart_path.display()))?;
                    println!("{} -> {}", outcome.file_name, chart_path.display());
                }

                succeeded += 1;
            }
            Err(err) => {
                warn!(file = %outcome.file_name, error = %err, "file skipped");
                eprintln!("{}: {err}", outcome.file_name);
            }
        }
    }

    Ok(succeeded)
}

/// Chart page name derived from the export name.
fn chart_file_name(export_name: &str) -> String {
    let stem = Path::new(export_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(export_name);
    format!("{stem}-chart.html")
}
