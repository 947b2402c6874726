//! CLI error type.

use std::fmt;

use groundwork::config::ConfigError;
use groundwork::dataset::DatasetError;
use groundwork::provider::ProviderError;
use groundwork::render::RenderError;

/// Errors that can occur while running a CLI command.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file problem.
    Config(ConfigError),

    /// Dataset loading or assessment failed unexpectedly.
    Dataset(DatasetError),

    /// HTTP client construction failed.
    Http(ProviderError),

    /// Writing the rendered figure failed.
    Render(RenderError),

    /// A command-line argument could not be interpreted.
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "configuration error: {}", e),
            CliError::Dataset(e) => write!(f, "dataset error: {}", e),
            CliError::Http(e) => write!(f, "HTTP client error: {}", e),
            CliError::Render(e) => write!(f, "render error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Dataset(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::InvalidArgument(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        CliError::Dataset(e)
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        CliError::Render(e)
    }
}
