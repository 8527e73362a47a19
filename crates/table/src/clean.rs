//! Cleaning operations: duplicate removal, mean imputation, projection.
//!
//! Each operation is independent and idempotent; applying them in a
//! different order can produce a different table (imputation can make
//! previously distinct rows identical), which is accepted behavior.

use crate::cell::CellValue;
use crate::error::Result;
use crate::table::Table;
use std::collections::HashSet;

impl Table {
    /// Remove rows that are exact duplicates of an earlier row, keeping
    /// the first occurrence and preserving the order of the rest.
    /// Returns the number of rows removed.
    pub fn remove_duplicates(&mut self) -> usize {
        let mut seen = HashSet::new();
        let before = self.row_count();

        self.rows_mut().retain(|row| {
            let mut key = String::new();
            for cell in row {
                key.push_str(&cell_key(cell));
                key.push('\x1f');
            }
            seen.insert(key)
        });

        before - self.row_count()
    }

    /// Fill missing values in numeric columns with the column mean.
    ///
    /// The mean is computed once per column over its non-null values
    /// before any filling happens. A numeric column with no non-null
    /// values is left unchanged. Returns the number of cells filled.
    pub fn fill_missing(&mut self) -> usize {
        let means: Vec<Option<f64>> = (0..self.col_count())
            .map(|col| {
                if self.is_numeric_column(col) {
                    column_mean(self.column_values(col))
                } else {
                    None
                }
            })
            .collect();

        let mut filled = 0;
        for row in self.rows_mut() {
            for (col, cell) in row.iter_mut().enumerate() {
                if cell.is_null() {
                    if let Some(mean) = means[col] {
                        *cell = CellValue::Float(mean);
                        filled += 1;
                    }
                }
            }
        }
        filled
    }

    /// Keep only the named columns, preserving the original column order
    /// among the selected names. Never changes the row count; selecting
    /// every column is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if any name is unknown; the table is not
    /// modified in that case.
    pub fn select_columns(&mut self, columns: &[&str]) -> Result<()> {
        let selected: HashSet<usize> = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<_>>()?;

        let keep: Vec<usize> = (0..self.col_count())
            .filter(|idx| selected.contains(idx))
            .collect();

        for row in self.rows_mut() {
            *row = keep
                .iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or(CellValue::Null))
                .collect();
        }

        let names = keep
            .iter()
            .map(|&idx| self.column_names()[idx].clone())
            .collect();
        self.set_columns(names);

        Ok(())
    }
}

/// Mean of the non-null values, or None when there are none.
fn column_mean<'a>(values: impl Iterator<Item = &'a CellValue>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        if let Some(f) = value.as_float() {
            sum += f;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Stable comparison key for a cell. Variants are prefixed so that e.g.
/// Int(1) and Str("1") never collide.
fn cell_key(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => "n".to_string(),
        CellValue::Bool(b) => format!("b{b}"),
        CellValue::Int(i) => format!("i{i}"),
        CellValue::Float(f) => format!("f{}", f.to_bits()),
        CellValue::Str(s) => format!("s{s}"),
    }
}
