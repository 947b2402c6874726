//! In-memory table loaded from CSV.

use std::fmt;

/// A table of optional string cells with named columns.
///
/// Empty CSV fields are missing values (`None`). Rows keep the shape they
/// had in the file; no type inference is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Creates a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Column names, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value at `(row, column)`, if present and non-missing.
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// Number of missing values per column, in header order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let missing = self
                    .rows
                    .iter()
                    .filter(|row| row.get(index).map_or(true, Option::is_none))
                    .count();
                (header.clone(), missing)
            })
            .collect()
    }

    /// Total number of missing values across the table.
    pub fn total_missing(&self) -> usize {
        self.missing_counts().iter().map(|(_, n)| n).sum()
    }

    /// Returns a copy without the rows whose every cell is missing.
    ///
    /// Rows with at least one present value are kept unchanged; the result
    /// never has more rows than the input.
    pub fn drop_empty_rows(&self) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.iter().any(Option::is_some))
            .cloned()
            .collect();
        Table {
            headers: self.headers.clone(),
            rows,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows x {} columns", self.row_count(), self.column_count())
    }
}
