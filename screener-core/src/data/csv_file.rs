//! Local CSV file source.

use super::source::{SourceError, TableSource};
use crate::table::Table;
use std::fs::File;
use std::path::PathBuf;

/// Reads a portfolio table from a CSV file on disk.
pub struct CsvFileSource {
    path: PathBuf,
    name: String,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        Self { path, name }
    }
}

impl TableSource for CsvFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Table, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(Table::from_csv_reader(file)?)
    }
}
