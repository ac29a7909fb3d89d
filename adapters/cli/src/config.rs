//! Layered configuration: built-in defaults, then an optional TOML file,
//! then command-line flags.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigurationError;

/// Complete runtime configuration for both games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ArcadeConfig {
    pub(crate) window: WindowConfig,
    pub(crate) divergence: DivergenceConfig,
    pub(crate) slither: SlitherConfig,
}

/// Surface the board is fitted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DivergenceConfig {
    /// Level file read at startup.
    pub(crate) levels: PathBuf,
    /// Pause after a solved level before the next one loads, in milliseconds.
    /// Only honoured for interactive play.
    pub(crate) advance_delay_ms: u64,
}

impl DivergenceConfig {
    pub(crate) fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self {
            levels: PathBuf::from("levels"),
            advance_delay_ms: 800,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SlitherConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Food placement seed; drawn from entropy when absent.
    pub(crate) seed: Option<u64>,
}

impl Default for SlitherConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: None,
        }
    }
}

impl ArcadeConfig {
    /// Reads the configuration file if one was given, otherwise returns defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path).map_err(|source| ConfigurationError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigurationError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Reads the level file, distinguishing a missing file from other I/O failures.
pub(crate) fn read_level_file(path: &Path) -> Result<String, ConfigurationError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigurationError::MissingLevelFile {
            path: path.to_path_buf(),
        },
        _ => ConfigurationError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}
