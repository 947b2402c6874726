//! Data command - load or assess the configured CSV dataset.

use std::path::PathBuf;

use clap::Args;

use groundwork::config::ConfigFile;
use groundwork::dataset::{access, assess, Table};

use crate::error::CliError;

/// Arguments for the data command.
#[derive(Debug, Args)]
pub struct DataArgs {
    /// Run the assessment stage (drop empty rows, report missing values)
    /// instead of the raw load
    #[arg(long)]
    pub assess: bool,

    /// CSV file to read; defaults to the configured data path
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Run the data command.
pub fn run(args: DataArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let path = args.path.unwrap_or(config.data.path);

    let result = if args.assess {
        assess::assess(&path)
    } else {
        access::load(&path)
    };

    match result {
        Ok(table) => {
            print_summary(&table);
            Ok(())
        }
        Err(e) if e.is_empty_result() => {
            // Missing or empty data is a reported condition, not a failure
            println!("Error: {}. Please check the file path.", e);
            Ok(())
        }
        Err(e) => Err(CliError::Dataset(e)),
    }
}

fn print_summary(table: &Table) {
    println!("Loaded {}", table);
    let total_missing = table.total_missing();
    if total_missing == 0 {
        println!("No missing values.");
        return;
    }

    println!("Missing values: {} total", total_missing);
    for (column, missing) in table.missing_counts() {
        if missing > 0 {
            println!("  {}: {}", column, missing);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_run_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"name,value\na,1\n,\n").unwrap();

        let result = run(DataArgs {
            assess: true,
            path: Some(path),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_with_missing_file_is_not_a_cli_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(DataArgs {
            assess: false,
            path: Some(dir.path().join("absent.csv")),
        });
        assert!(result.is_ok());
    }
}
