//! External export utility invocation
//!
//! The heavy lifting of dumping a collection is delegated to `mongoexport`,
//! invoked as a subprocess with an explicit argument vector. The connection
//! string and collection name are passed as separate arguments and never go
//! through a shell, so they cannot be reinterpreted as shell syntax.
//!
//! The invocation sits behind the [`ExportUtility`] trait so the pipeline
//! can be exercised in tests without the real binary installed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{ExportError, Result};

/// One-call seam over the external export utility.
#[async_trait]
pub trait ExportUtility: Send + Sync {
    /// Dump `collection` to `out_path` as line-delimited JSON records.
    async fn dump_collection(&self, uri: &str, collection: &str, out_path: &Path) -> Result<()>;
}

/// The real `mongoexport` binary.
pub struct Mongoexport {
    /// Binary name or path; overridable for tests.
    binary: PathBuf,
}

impl Mongoexport {
    /// Use the `mongoexport` found on `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("mongoexport"),
        }
    }

    /// Use an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for Mongoexport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExportUtility for Mongoexport {
    async fn dump_collection(&self, uri: &str, collection: &str, out_path: &Path) -> Result<()> {
        info!(
            "Running: {} --collection {collection} --out {}",
            self.binary.display(),
            out_path.display()
        );

        let output = Command::new(&self.binary)
            .arg("--uri")
            .arg(uri)
            .arg("--collection")
            .arg(collection)
            .arg("--out")
            .arg(out_path)
            .output()
            .await
            .map_err(|e| ExportError::UtilityUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::UtilityFailed {
                collection: collection.to_string(),
                detail: format!("{}: {}", output.status, stderr.trim()),
            }
            .into());
        }

        debug!("mongoexport finished for collection '{collection}'");
        Ok(())
    }
}
