//! CSV-backed table source.
//!
//! Maps each declared table to `<dir>/<table>.csv`. The first record is
//! the header row; every data row becomes an ordered column-to-value map
//! with all values kept as raw strings.

use std::path::PathBuf;

use tablecheck_validator::{Row, SourceError, TableSource};

pub struct CsvTableSource {
    dir: PathBuf,
}

impl CsvTableSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_error(table: &str, err: csv::Error) -> SourceError {
        SourceError::Read {
            table: table.to_string(),
            message: err.to_string(),
        }
    }
}

impl TableSource for CsvTableSource {
    fn rows(&self, table: &str) -> Result<Vec<Row>, SourceError> {
        let path = self.dir.join(format!("{table}.csv"));
        if !path.exists() {
            return Err(SourceError::MissingTable(table.to_string()));
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|err| Self::read_error(table, err))?;
        let headers = reader
            .headers()
            .map_err(|err| Self::read_error(table, err))?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| Self::read_error(table, err))?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}
