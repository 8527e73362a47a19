use crate::cell::CellValue;
use crate::error::Result;
use crate::table::Table;
use std::io::{Read, Write};

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Whether to use type inference when reading
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            infer_types: true,
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

impl Table {
    /// Load a table from a CSV byte payload. The first record is the
    /// header.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_csv_reader(bytes, CsvOptions::default())
    }

    /// Load a table from a reader with custom options
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false) // We handle the header ourselves
            .from_reader(reader);

        let mut records = csv_reader.records();

        let columns: Vec<String> = match records.next() {
            Some(header) => header?.iter().map(str::to_string).collect(),
            None => Vec::new(),
        };

        let mut table = Table::new(columns);
        for result in records {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else {
                        CellValue::Str(field.to_string())
                    }
                })
                .collect();
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Serialize the table to CSV bytes: header row, then one record
    /// per row, no index column. The buffer is fully materialized.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer, CsvOptions::default())?;
        Ok(buffer)
    }

    /// Write the table to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W, options: CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .from_writer(writer);

        csv_writer.write_record(self.column_names())?;
        for row in self.rows() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
