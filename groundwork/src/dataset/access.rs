//! Data access: loading the raw CSV table.

use std::path::Path;

use tracing::{info, warn};

use super::table::Table;
use super::DatasetError;

/// Default location of the raw data file, relative to the working
/// directory.
pub const DEFAULT_DATA_PATH: &str = "data.csv";

/// Loads a CSV file into a [`Table`].
///
/// Empty fields become missing values. Short rows are kept as-is; the
/// missing-value accounting treats absent trailing cells as missing.
///
/// # Errors
///
/// Returns `DatasetError::NotFound` if the file does not exist,
/// `DatasetError::EmptyTable` if it contains headers but no rows, and
/// `DatasetError::Csv` if parsing fails.
pub fn load(path: &Path) -> Result<Table, DatasetError> {
    info!("loading data from {}", path.display());

    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    None
                } else {
                    Some(field.to_string())
                }
            })
            .collect();
        rows.push(cells);
    }

    let table = Table::new(headers, rows);
    if table.is_empty() {
        warn!("loaded data is empty");
        return Err(DatasetError::EmptyTable);
    }

    info!(
        "successfully loaded data: {} rows, {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}
