//! Init command - initialize configuration file.

use groundwork::config::ConfigFile;

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = ConfigFile::path();

    if path.exists() {
        println!("Configuration file already exists: {}", path.display());
        return Ok(());
    }

    ConfigFile::default().save()?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize Groundwork settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
