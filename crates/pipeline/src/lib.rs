//! # tidysheet-pipeline
//!
//! Per-file processing pipeline: Loader -> Cleaner -> Visualizer ->
//! Exporter.
//!
//! Each uploaded file gets its own [`FileSession`] that owns the parsed
//! [`Table`] for the lifetime of the session. Cleaning steps are
//! explicit, optional, idempotent calls on the session; applying them in
//! a different order can change the result, which is accepted behavior.
//! [`run_batch`] drives a sequence of files with no shared state between
//! them: a file that fails to load is reported and skipped, never
//! aborting the rest of the batch.
//!
//! ```
//! use tidysheet_pipeline::{FileSession, UploadedFile};
//! use tidysheet_table::FileFormat;
//!
//! let file = UploadedFile::new("scores.csv", b"a,b\n1,\n1,3\n".to_vec());
//! let mut session = FileSession::load(&file).unwrap();
//!
//! session.fill_missing();
//! let export = session.export(FileFormat::Xlsx).unwrap();
//! assert_eq!(export.file_name, "scores.xlsx");
//! ```

use std::path::Path;
use tidysheet_table::{FileFormat, Result, Table};
use tidysheet_viz::ChartSpec;
use tracing::{debug, warn};

/// An uploaded file: a name used for format detection and output
/// naming, plus the raw byte payload. Immutable once received.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        UploadedFile {
            name: name.into(),
            bytes,
        }
    }
}

/// A fully materialized export: serialized bytes plus the filename and
/// MIME type for the download handoff.
#[derive(Debug, Clone)]
pub struct ExportBuffer {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The cleaning and conversion choices for one batch run, mirroring the
/// per-file controls of an interactive front end.
#[derive(Debug, Clone)]
pub struct CleanPlan {
    /// Remove exact-duplicate rows.
    pub remove_duplicates: bool,
    /// Mean-impute missing values in numeric columns.
    pub fill_missing: bool,
    /// Keep only these columns (original order); `None` keeps all.
    pub keep_columns: Option<Vec<String>>,
    /// Build a chart spec from the cleaned table.
    pub chart: bool,
    /// Target export format.
    pub target: FileFormat,
}

impl Default for CleanPlan {
    fn default() -> Self {
        CleanPlan {
            remove_duplicates: false,
            fill_missing: false,
            keep_columns: None,
            chart: false,
            target: FileFormat::Csv,
        }
    }
}

/// Per-file processing context. Owns the table parsed from one uploaded
/// file; every pipeline step is an explicit call on the session.
#[derive(Debug)]
pub struct FileSession {
    file_name: String,
    table: Table,
}

impl FileSession {
    /// Load an uploaded file into a session, dispatching on the file
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for unrecognized extensions and the
    /// underlying codec error for malformed content.
    pub fn load(file: &UploadedFile) -> Result<Self> {
        let format = FileFormat::from_file_name(&file.name)?;
        let table = match format {
            FileFormat::Csv => Table::from_csv_bytes(&file.bytes)?,
            FileFormat::Xlsx => Table::from_xlsx_bytes(&file.bytes)?,
        };

        debug!(
            file = %file.name,
            rows = table.row_count(),
            cols = table.col_count(),
            "loaded table"
        );

        Ok(FileSession {
            file_name: file.name.clone(),
            table,
        })
    }

    /// The name of the uploaded file this session belongs to.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The current table state.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// First `n` rows of the current table, for display.
    #[must_use]
    pub fn preview(&self, n: usize) -> Table {
        self.table.preview(n)
    }

    /// Remove exact-duplicate rows; returns how many were removed.
    pub fn remove_duplicates(&mut self) -> usize {
        let removed = self.table.remove_duplicates();
        debug!(file = %self.file_name, removed, "removed duplicate rows");
        removed
    }

    /// Mean-impute missing numeric values; returns how many cells were
    /// filled.
    pub fn fill_missing(&mut self) -> usize {
        let filled = self.table.fill_missing();
        debug!(file = %self.file_name, filled, "filled missing values");
        filled
    }

    /// Keep only the named columns, in original column order.
    pub fn keep_columns(&mut self, columns: &[&str]) -> Result<()> {
        self.table.select_columns(columns)
    }

    /// Chart spec over the current table state, or `None` when there is
    /// nothing numeric to plot.
    #[must_use]
    pub fn chart(&self) -> Option<ChartSpec> {
        ChartSpec::from_table(&self.table, &self.file_name)
    }

    /// Serialize the current table state to the requested format. May be
    /// called repeatedly with different formats; each call produces an
    /// independent, fully materialized buffer.
    pub fn export(&self, format: FileFormat) -> Result<ExportBuffer> {
        let bytes = match format {
            FileFormat::Csv => self.table.to_csv_bytes()?,
            FileFormat::Xlsx => self.table.to_xlsx_bytes()?,
        };

        Ok(ExportBuffer {
            file_name: derive_export_name(&self.file_name, format),
            mime_type: format.mime_type(),
            bytes,
        })
    }
}

/// Replace the extension of the uploaded name with the target format's
/// canonical one.
#[must_use]
pub fn derive_export_name(file_name: &str, format: FileFormat) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{stem}.{}", format.extension())
}

/// Outcome of processing one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub file_name: String,
    pub result: Result<FileResult>,
}

/// What a successfully processed file produced.
#[derive(Debug)]
pub struct FileResult {
    pub export: ExportBuffer,
    pub chart: Option<ChartSpec>,
    pub duplicates_removed: usize,
    pub cells_filled: usize,
}

/// Process a batch of uploaded files sequentially with the same plan.
///
/// Files are independent: one outcome per input file, in input order,
/// and a failing file (unsupported extension, malformed content) never
/// prevents the remaining files from being processed.
#[must_use]
pub fn run_batch(files: &[UploadedFile], plan: &CleanPlan) -> Vec<FileOutcome> {
    files
        .iter()
        .map(|file| FileOutcome {
            file_name: file.name.clone(),
            result: process_file(file, plan),
        })
        .collect()
}

fn process_file(file: &UploadedFile, plan: &CleanPlan) -> Result<FileResult> {
    let mut session = FileSession::load(file).map_err(|err| {
        warn!(file = %file.name, error = %err, "skipping file");
        err
    })?;

    let duplicates_removed = if plan.remove_duplicates {
        session.remove_duplicates()
    } else {
        0
    };

    let cells_filled = if plan.fill_missing {
        session.fill_missing()
    } else {
        0
    };

    if let Some(columns) = &plan.keep_columns {
        let names: Vec<&str> = columns.iter().map(String::as_str).collect();
        session.keep_columns(&names)?;
    }

    let chart = if plan.chart { session.chart() } else { None };
    let export = session.export(plan.target)?;

    Ok(FileResult {
        export,
        chart,
        duplicates_removed,
        cells_filled,
    })
}

// Re-export the error type so adapters only need this crate.
pub use tidysheet_table::TableError as PipelineError;
