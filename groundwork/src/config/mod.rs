//! Configuration file handling.
//!
//! Settings live in an INI file (`config.ini` under the platform config
//! directory). Every setting has a default, so a missing file or a missing
//! key is never an error; CLI arguments override config values when
//! specified.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::dataset::access::DEFAULT_DATA_PATH;
use crate::provider::{DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_URL};

/// Errors that can occur while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid INI.
    #[error("failed to parse config file: {0}")]
    Parse(String),

    /// A key holds a value of the wrong type.
    #[error("invalid value '{value}' for {section}.{key}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// `[data]` section: where the raw CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSettings {
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

/// `[overpass]` section: Overpass API endpoint and timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassSettings {
    pub url: String,
    /// HTTP timeout in seconds for Overpass requests.
    pub timeout_secs: u64,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_OVERPASS_URL.to_string(),
            timeout_secs: 90,
        }
    }
}

/// `[nominatim]` section: geocoder endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimSettings {
    pub url: String,
}

impl Default for NominatimSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_NOMINATIM_URL.to_string(),
        }
    }
}

/// `[render]` section: canvas size and output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            output_dir: PathBuf::from("."),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub data: DataSettings,
    pub overpass: OverpassSettings,
    pub nominatim: NominatimSettings,
    pub render: RenderSettings,
}

impl ConfigFile {
    /// Location of the config file under the platform config directory.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("groundwork")
            .join("config.ini")
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Loads the configuration from a specific file.
    ///
    /// Missing keys fall back to their defaults; unknown keys are ignored.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(io) => ConfigError::Io(io),
            ini::Error::Parse(parse) => ConfigError::Parse(parse.to_string()),
        })?;

        let mut config = Self::default();

        if let Some(value) = ini.get_from(Some("data"), "path") {
            config.data.path = PathBuf::from(value);
        }
        if let Some(value) = ini.get_from(Some("overpass"), "url") {
            config.overpass.url = value.to_string();
        }
        if let Some(value) = ini.get_from(Some("overpass"), "timeout") {
            config.overpass.timeout_secs = parse_value("overpass", "timeout", value)?;
        }
        if let Some(value) = ini.get_from(Some("nominatim"), "url") {
            config.nominatim.url = value.to_string();
        }
        if let Some(value) = ini.get_from(Some("render"), "width") {
            config.render.width = parse_value("render", "width", value)?;
        }
        if let Some(value) = ini.get_from(Some("render"), "height") {
            config.render.height = parse_value("render", "height", value)?;
        }
        if let Some(value) = ini.get_from(Some("render"), "output_dir") {
            config.render.output_dir = PathBuf::from(value);
        }

        Ok(config)
    }

    /// Writes the configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    /// Writes the configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("data"))
            .set("path", self.data.path.to_string_lossy().to_string());
        ini.with_section(Some("overpass"))
            .set("url", self.overpass.url.clone())
            .set("timeout", self.overpass.timeout_secs.to_string());
        ini.with_section(Some("nominatim"))
            .set("url", self.nominatim.url.clone());
        ini.with_section(Some("render"))
            .set("width", self.render.width.to_string())
            .set("height", self.render.height.to_string())
            .set("output_dir", self.render.output_dir.to_string_lossy().to_string());

        ini.write_to_file(path)?;
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(
    section: &'static str,
    key: &'static str,
    value: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        section,
        key,
        value: value.to_string(),
    })
}
