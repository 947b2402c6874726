//! Groundwork CLI - Command-line interface
//!
//! This binary provides a command-line interface to the Groundwork
//! library: loading and assessing the configured dataset, and rendering
//! city maps.

mod commands;
mod error;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "groundwork",
    version,
    about = "Three-stage data workflow with on-demand city-map rendering"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the street network, buildings, and points of interest
    /// around a coordinate
    Map(commands::map::MapArgs),

    /// Load or assess the configured CSV dataset
    Data(commands::data::DataArgs),

    /// Initialize the configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();
    groundwork::telemetry::init(cli.verbose);

    let result = match cli.command {
        Commands::Map(args) => commands::map::run(args),
        Commands::Data(args) => commands::data::run(args),
        Commands::Init => commands::init::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
