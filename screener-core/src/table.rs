//! Cell and Table — the tabular structure the engine operates on.
//!
//! Input arrives as a header row plus data rows of heterogeneous cells
//! (a spreadsheet export, typically). Cells are tagged at ingest so the
//! evaluator never touches raw untyped values. Unrecognized columns pass
//! through the engine untouched.

use serde::{Deserialize, Serialize};
use std::io::Read;

/// One tabular value of unknown upstream representation.
///
/// CSV ingest only ever produces `Text` and `Null` (empty field); the
/// normalizer upgrades recognized columns to `Number`/`Bool` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text form used for CSV output. NaN renders as an empty field,
    /// matching how spreadsheet exports represent missing numerics.
    pub fn to_csv_field(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) if n.is_nan() => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Cell {
    /// Empty or whitespace-only fields are missing values, not empty text.
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Null
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// Header row plus data rows. Headers are whitespace-trimmed on
/// construction; every row is padded (with `Null`) or truncated to the
/// header width so cell access never goes out of bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    /// Re-trim headers. Tables built through `Table::new` are already
    /// trimmed; this covers tables deserialized from JSON artifacts.
    pub fn trim_headers(&mut self) {
        for h in &mut self.headers {
            let trimmed = h.trim();
            if trimmed.len() != h.len() {
                *h = trimmed.to_string();
            }
        }
    }

    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Null);
        self.rows.push(row);
    }

    /// Set a column to the given values, appending it if absent and
    /// replacing it in place if a column of that name already exists.
    /// `values` shorter than the table are padded with `Null`.
    pub fn set_column(&mut self, name: &str, mut values: Vec<Cell>) {
        values.resize(self.rows.len(), Cell::Null);
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Apply `f` to every cell of a column in place.
    pub fn map_column(&mut self, idx: usize, f: impl Fn(&Cell) -> Cell) {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }

    /// Extract a full column as owned cells. Returns `None` if absent.
    pub fn column(&self, name: &str) -> Option<Vec<Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Stable in-place row sort by a caller-supplied comparator over rows.
    pub fn sort_rows_by(&mut self, cmp: impl Fn(&[Cell], &[Cell]) -> std::cmp::Ordering) {
        self.rows.sort_by(|a, b| cmp(a, b));
    }

    /// Parse a CSV stream into a table. All non-empty fields become
    /// `Text`; typing is the normalizer's job, not the parser's.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut table = Table::new(headers);
        for record in rdr.records() {
            let record = record?;
            table.push_row(record.iter().map(Cell::from).collect());
        }
        Ok(table)
    }

    pub fn from_csv_str(data: &str) -> Result<Self, csv::Error> {
        Self::from_csv_reader(data.as_bytes())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
