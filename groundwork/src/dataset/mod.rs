//! Dataset access and assessment
//!
//! The first two stages of the workflow. `access` loads the raw CSV table;
//! `assess` checks its quality and drops rows with no data at all. The
//! `query`, `view`, and `labelled` operations are deliberate capability
//! gaps, reported as such rather than implemented.

pub mod access;
pub mod assess;
mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use table::Table;

/// Errors that can occur while loading or assessing a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The data file does not exist.
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file parsed but contains no rows.
    #[error("loaded data is empty")]
    EmptyTable,

    /// CSV parsing failed.
    #[error("failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// The operation is a placeholder that has not been implemented.
    #[error("operation '{operation}' is not implemented")]
    Unimplemented { operation: &'static str },
}

impl DatasetError {
    /// Returns true for the "resource not found / empty" error kind, as
    /// opposed to an unexpected failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, DatasetError::NotFound(_) | DatasetError::EmptyTable)
    }
}
