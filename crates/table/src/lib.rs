//! Table model for tidysheet
//!
//! Provides the in-memory [`Table`] type used by every pipeline stage:
//! loading from CSV or XLSX byte payloads, cleaning operations
//! (duplicate removal, mean imputation, column projection), and
//! serialization back to either format as a fully materialized buffer.
//!
//! # Examples
//!
//! ## Loading and cleaning a CSV payload
//!
//! ```
//! use tidysheet_table::Table;
//!
//! let mut table = Table::from_csv_bytes(b"a,b\n1,\n1,3\n").unwrap();
//!
//! assert_eq!(table.column_names(), &["a", "b"]);
//! assert_eq!(table.row_count(), 2);
//!
//! // Mean imputation fills the missing b value with 3.0.
//! let filled = table.fill_missing();
//! assert_eq!(filled, 1);
//! ```
//!
//! ## Exporting
//!
//! ```
//! use tidysheet_table::Table;
//!
//! let table = Table::from_csv_bytes(b"x,y\n1,2\n").unwrap();
//! let csv = table.to_csv_bytes().unwrap();
//! assert_eq!(csv, b"x,y\n1,2\n");
//! ```

mod cell;
mod clean;
mod csv;
mod error;
mod format;
mod table;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export error types.
pub use error::{Result, TableError};
/// Re-export file format detection.
pub use format::FileFormat;
/// Re-export the table type.
pub use table::Table;
