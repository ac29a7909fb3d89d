use std::{io, path::PathBuf};

use thiserror::Error;

/// Startup failures reported before any engine is created.
#[derive(Debug, Error)]
pub(crate) enum ConfigurationError {
    /// The configured level file does not exist.
    #[error("could not find level file `{}`", path.display())]
    MissingLevelFile {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// A file exists but could not be read.
    #[error("could not read `{}`", path.display())]
    Unreadable {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML for this program.
    #[error("invalid configuration in `{}`", path.display())]
    InvalidConfig {
        /// Offending configuration file.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },
}
