//! Runtime settings
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! environment variables such as `ROLLCALL__LOG__LEVEL=debug`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix for overrides
pub const ENV_PREFIX: &str = "ROLLCALL";

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
    pub shell: ShellSettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Level directive (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for rolling log files
    pub dir: PathBuf,
    /// File name prefix for rolling log files
    pub file_prefix: String,
    /// Write the log file as JSON lines
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            file_prefix: "rollcall.log".to_string(),
            json: false,
        }
    }
}

/// How the shell renders results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Interactive shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub prompt: String,
    pub output: OutputFormat,
    /// Print the numbered menu before each prompt
    pub show_menu: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: "Enter Choice: ".to_string(),
            output: OutputFormat::Text,
            show_menu: true,
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given
    ///
    /// A missing file is an error only when the path was passed explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Settings::default())
            .map_err(|e| Error::Config(format!("Failed to encode defaults: {}", e)))?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(|e| Error::Config(e.to_string()))?
            .validated()
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<()> {
        self.log_level().map(|_| ())
    }

    /// Parsed log level
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log.level.parse::<tracing::Level>().map_err(|_| {
            Error::Config(format!(
                "Invalid log level '{}', expected trace, debug, info, warn or error",
                self.log.level
            ))
        })
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Parse settings from a TOML string, on top of the defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str::<Settings>(text)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?
            .validated()
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
