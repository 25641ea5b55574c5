//! Configuration for the export tooling.
//!
//! The export tool takes no configuration flags: the connection string comes
//! from the `MONGO_URI` environment variable and everything else is fixed
//! relative to the working directory. The environment is read exactly once at
//! process start into an [`ExportConfig`] value that is then passed by
//! reference into the lister and the pipeline; nothing looks up process-wide
//! state after startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Name of the environment variable carrying the connection string.
pub const MONGO_URI_ENV: &str = "MONGO_URI";

/// Database name used when the connection URI carries no path segment.
pub const DEFAULT_DATABASE: &str = "undersounds";

/// Configuration for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// MongoDB connection URI.
    pub uri: String,

    /// Directory receiving the per-collection artifacts.
    pub data_dump_dir: PathBuf,

    /// Path of the shared export-metadata file.
    pub metadata_path: PathBuf,

    /// How long the selector waits for operator input.
    pub input_timeout: Duration,
}

impl ExportConfig {
    /// Build the configuration from the process environment.
    ///
    /// # Returns
    /// * `Result<Self>` - Configuration, or a fatal error when `MONGO_URI`
    ///   is absent or empty.
    pub fn from_env() -> Result<Self> {
        let uri = std::env::var(MONGO_URI_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv(MONGO_URI_ENV.to_string()))?;

        Ok(Self::with_uri(uri))
    }

    /// Build a configuration around an explicit connection URI.
    ///
    /// Paths and timeout take their fixed defaults; tests and embedders can
    /// adjust the public fields afterwards.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            data_dump_dir: default_data_dump_dir(),
            metadata_path: default_metadata_path(),
            input_timeout: default_input_timeout(),
        }
    }
}

fn default_data_dump_dir() -> PathBuf {
    PathBuf::from("data-dump")
}

fn default_metadata_path() -> PathBuf {
    PathBuf::from("config").join("dbmeta.json")
}

fn default_input_timeout() -> Duration {
    Duration::from_secs(60)
}
