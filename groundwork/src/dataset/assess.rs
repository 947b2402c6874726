//! Data assessment: quality checks on the loaded table.

use std::path::Path;

use tracing::info;

use super::table::Table;
use super::{access, DatasetError};

/// Loads the data and performs the basic quality pass.
///
/// Runs the access loader, reports missing values per column, and drops
/// rows whose every cell is missing. An empty-result signal from the
/// loader passes through unchanged.
pub fn assess(path: &Path) -> Result<Table, DatasetError> {
    info!("starting data assessment");

    let table = access::load(path)?;

    info!(
        "assessing data quality for {} rows, {} columns",
        table.row_count(),
        table.column_count()
    );

    let total_missing = table.total_missing();
    if total_missing > 0 {
        for (column, missing) in table.missing_counts() {
            if missing > 0 {
                info!("column '{}' has {} missing values", column, missing);
            }
        }
        info!("missing values found: {} total", total_missing);
    }

    let cleaned = table.drop_empty_rows();
    let removed = table.row_count() - cleaned.row_count();
    if removed > 0 {
        info!("removed {} completely empty rows", removed);
    }

    info!("data assessment completed, final shape: {}", cleaned);
    Ok(cleaned)
}

/// Request user input for some aspect of the data.
///
/// Not yet available; a placeholder in the workflow for domain-specific
/// code.
pub fn query(_table: &Table) -> Result<String, DatasetError> {
    Err(DatasetError::Unimplemented { operation: "query" })
}

/// Provide a view of the data for verifying an aspect of its quality.
///
/// Not yet available; a placeholder in the workflow for domain-specific
/// code.
pub fn view(_table: &Table) -> Result<(), DatasetError> {
    Err(DatasetError::Unimplemented { operation: "view" })
}

/// Provide a labelled set of data ready for supervised learning.
///
/// Not yet available; a placeholder in the workflow for domain-specific
/// code.
pub fn labelled(_table: &Table) -> Result<Table, DatasetError> {
    Err(DatasetError::Unimplemented {
        operation: "labelled",
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_assess_drops_fully_empty_rows() {
        let (_dir, path) = write_csv("name,value\na,1\n,\nb,\n,\n");

        let table = assess(&path).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("a"));
        assert_eq!(table.get(1, 0), Some("b"));
    }

    #[test]
    fn test_assess_passes_through_missing_file_signal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        // Whatever empty-result signal access produces, assess must forward
        let access_err = access::load(&path).unwrap_err();
        let assess_err = assess(&path).unwrap_err();
        assert!(access_err.is_empty_result());
        assert!(assess_err.is_empty_result());
    }

    #[test]
    fn test_assess_keeps_clean_tables_unchanged() {
        let (_dir, path) = write_csv("name,value\na,1\nb,2\n");

        let table = assess(&path).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_placeholders_signal_unimplemented() {
        let table = Table::new(vec!["a".to_string()], vec![vec![Some("1".to_string())]]);

        assert!(matches!(
            query(&table),
            Err(DatasetError::Unimplemented { operation: "query" })
        ));
        assert!(matches!(
            view(&table),
            Err(DatasetError::Unimplemented { operation: "view" })
        ));
        assert!(matches!(
            labelled(&table),
            Err(DatasetError::Unimplemented {
                operation: "labelled"
            })
        ));
    }
}
