// Configuration management
//
// Run, output and logging settings persisted as TOML. Every field has a
// default, so a partial file (or none at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file path
pub const DEFAULT_CONFIG_FILE: &str = "nes_core.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Emulator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// What to run
    pub run: RunConfig,

    /// Where results go
    pub output: OutputConfig,

    /// Diagnostics
    pub logging: LoggingConfig,
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to emulate before stopping
    pub frames: u32,

    /// Program counter to use instead of the reset vector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_pc: Option<u16>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            frames: 60,
            start_pc: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Screenshot directory
    pub screenshot_dir: PathBuf,

    /// Write a disassembly listing here when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disassembly: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            screenshot_dir: PathBuf::from("screenshots"),
            disassembly: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter (e.g. "info", "nes_core=debug")
    pub level: String,

    /// Log one CPU state line per retired instruction at trace level
    pub trace_cpu: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            trace_cpu: false,
        }
    }
}

impl EmulatorConfig {
    /// Load configuration from `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration from `path`, falling back to defaults
    ///
    /// A missing file is silent; an unreadable or malformed one is logged.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring configuration {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::EmulatorConfig;
    ///
    /// let config = EmulatorConfig::default();
    /// config.save("nes_core.toml").expect("Failed to save configuration");
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Write a default configuration file to `path`
    pub fn save_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }
}
