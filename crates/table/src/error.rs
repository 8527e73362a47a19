use thiserror::Error;

/// Errors that can occur while loading, cleaning, or exporting tables
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Row length mismatch: expected {expected} cells, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
