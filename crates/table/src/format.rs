use crate::error::{Result, TableError};
use std::path::Path;

/// Tabular file format recognized by the loader and exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Detect the format from a file name by its extension
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` when the extension is neither
    /// `.csv` nor `.xlsx`.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            _ => Err(TableError::UnsupportedFormat { extension }),
        }
    }

    /// Canonical file extension, without the leading dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }

    /// MIME type for download handoff.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => "text/csv",
            FileFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}
