use crate::cell::CellValue;
use crate::error::{Result, TableError};
use indexmap::IndexMap;

/// An in-memory table: ordered named columns over row-major records.
///
/// Every row has exactly as many cells as there are column names. The
/// header is kept separate from the data, so row indices are 0-based
/// data rows (the header is not row 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from column names and rows.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if any row differs in width from the
    /// header.
    pub fn from_rows<S, T>(columns: Vec<S>, rows: Vec<Vec<T>>) -> Result<Self>
    where
        S: Into<String>,
        T: Into<CellValue>,
    {
        let mut table = Table::new(columns.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(row.into_iter().map(Into::into).collect())?;
        }
        Ok(table)
    }

    /// Append a row, enforcing the header width.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::LengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Get the column names in order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Get the number of data rows (header excluded).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.rows
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    /// Get a cell by row and column index.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Resolve a column name to its index.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Iterate over the cells of one column, top to bottom.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> {
        self.rows
            .iter()
            .map(move |row| row.get(col).unwrap_or(&CellValue::Null))
    }

    /// A column is numeric when every non-null cell is an int or float.
    /// An all-null column counts as numeric (vacuously).
    #[must_use]
    pub fn is_numeric_column(&self, col: usize) -> bool {
        self.column_values(col)
            .all(|cell| cell.is_null() || cell.is_numeric())
    }

    /// Indices of numeric-inferred columns, in original column order.
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.col_count())
            .filter(|&col| self.is_numeric_column(col))
            .collect()
    }

    /// First `n` rows as a new table, for display.
    #[must_use]
    pub fn preview(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Rows as ordered name -> value maps.
    #[must_use]
    pub fn to_records(&self) -> Vec<IndexMap<String, CellValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["name", "age", "score"],
            vec![
                vec![CellValue::from("alice"), CellValue::Int(30), CellValue::Float(1.5)],
                vec![CellValue::from("bob"), CellValue::Int(25), CellValue::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_counts() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.col_count(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_push_row_width_check() {
        let mut table = sample();
        let err = table
            .push_row(vec![CellValue::Int(1), CellValue::Int(2)])
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_column_index() {
        let table = sample();
        assert_eq!(table.column_index("age").unwrap(), 1);
        assert!(table.column_index("missing").is_err());
    }

    #[test]
    fn test_numeric_inference() {
        let table = sample();
        // "name" holds strings, "age" ints, "score" a float plus a null
        assert!(!table.is_numeric_column(0));
        assert!(table.is_numeric_column(1));
        assert!(table.is_numeric_column(2));
        assert_eq!(table.numeric_columns(), vec![1, 2]);
    }

    #[test]
    fn test_all_null_column_is_numeric() {
        let table = Table::from_rows(
            vec!["blank"],
            vec![vec![CellValue::Null], vec![CellValue::Null]],
        )
        .unwrap();
        assert!(table.is_numeric_column(0));
    }

    #[test]
    fn test_preview() {
        let table = sample();
        let head = table.preview(1);
        assert_eq!(head.row_count(), 1);
        assert_eq!(head.column_names(), table.column_names());

        // Preview larger than the table is the whole table
        assert_eq!(table.preview(10), table);
    }

    #[test]
    fn test_to_records() {
        let table = sample();
        let records = table.to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], CellValue::from("alice"));
        assert_eq!(records[1]["score"], CellValue::Null);
    }
}
