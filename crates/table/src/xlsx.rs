use crate::cell::CellValue;
use crate::error::{Result, TableError};
use crate::table::Table;
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

fn xlsx_err(e: impl std::fmt::Display) -> TableError {
    TableError::Xlsx(e.to_string())
}

/// Convert a calamine cell to a CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Str(s.clone()),
        // Excel stores dates as day serials since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Str(s.clone()),
        Data::DurationIso(s) => CellValue::Str(s.clone()),
        Data::Error(e) => CellValue::Str(format!("#ERROR: {e:?}")),
    }
}

impl Table {
    /// Load a table from an XLSX byte payload: first worksheet only,
    /// first row as the header.
    ///
    /// # Errors
    ///
    /// Returns `Xlsx` if the payload is not a readable workbook.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(xlsx_err)?;

        let sheet_names = workbook.sheet_names().to_vec();
        let Some(first) = sheet_names.first() else {
            return Ok(Table::new(Vec::new()));
        };

        let range = workbook.worksheet_range(first).map_err(xlsx_err)?;
        let mut rows = range.rows();

        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .map(|cell| data_to_cell_value(cell).as_str())
                .collect(),
            None => Vec::new(),
        };

        let width = columns.len();
        let mut table = Table::new(columns);
        for row in rows {
            // calamine pads the range to a rectangle, but guard anyway
            let mut cells: Vec<CellValue> = row.iter().map(data_to_cell_value).collect();
            cells.resize(width, CellValue::Null);
            cells.truncate(width);
            table.push_row(cells)?;
        }

        Ok(table)
    }

    /// Serialize the table to an XLSX workbook: single worksheet,
    /// header row of column names, then one row per record, no index
    /// column. The buffer is fully materialized.
    ///
    /// # Errors
    ///
    /// Returns `Xlsx` if the workbook cannot be built.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col_idx, name) in self.column_names().iter().enumerate() {
            let col = u16::try_from(col_idx).map_err(xlsx_err)?;
            worksheet.write_string(0, col, name).map_err(xlsx_err)?;
        }

        for (row_idx, row) in self.rows().iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1).map_err(xlsx_err)?;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx).map_err(xlsx_err)?;

                match cell {
                    CellValue::Null => {} // Leave empty
                    CellValue::Bool(b) => {
                        worksheet
                            .write_boolean(row_num, col_num, *b)
                            .map_err(xlsx_err)?;
                    }
                    // Excel stores all numbers as f64; integers beyond
                    // 2^53 may lose precision
                    CellValue::Int(i) => {
                        worksheet
                            .write_number(row_num, col_num, *i as f64)
                            .map_err(xlsx_err)?;
                    }
                    CellValue::Float(f) => {
                        worksheet
                            .write_number(row_num, col_num, *f)
                            .map_err(xlsx_err)?;
                    }
                    CellValue::Str(s) => {
                        worksheet
                            .write_string(row_num, col_num, s)
                            .map_err(xlsx_err)?;
                    }
                }
            }
        }

        workbook.save_to_buffer().map_err(xlsx_err)
    }
}
