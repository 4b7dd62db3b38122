use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::report::MAX_BAR_WIDTH;
use crate::usage::Backend;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Width of the bar graphs
    pub length: usize,
    /// Print sizes with KiB/MiB/... suffixes
    pub human_readable: bool,
    /// Fractional digits in human-readable sizes
    pub decimals: usize,
    /// Character for the filled part of a bar
    pub fill: char,
    /// Character for the empty part of a bar
    pub blank: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Where sizes come from: du or native
    pub backend: Backend,
    /// du executable used by the du backend
    pub program: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            length: 20,
            human_readable: false,
            decimals: 2,
            fill: '=',
            blank: ' ',
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Du,
            program: "du".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is used if a file is there, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/duim/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("duim").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Read configuration file");

        let config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.length > MAX_BAR_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "report.length must be at most {}, got {}",
                MAX_BAR_WIDTH, self.report.length
            ))
            .into());
        }
        if self.report.decimals > 9 {
            return Err(ConfigError::Invalid(format!(
                "report.decimals must be at most 9, got {}",
                self.report.decimals
            ))
            .into());
        }
        if self.report.fill == self.report.blank {
            return Err(ConfigError::Invalid(
                "report.fill and report.blank must differ".to_string(),
            )
            .into());
        }
        if self.collector.program.trim().is_empty() {
            return Err(ConfigError::Invalid("collector.program is empty".to_string()).into());
        }
        Ok(())
    }
}
