//! Export pipeline
//!
//! Works through the Selection Result one collection at a time: dump via the
//! external utility to a deterministic temp path, reshape the line-delimited
//! output into a single JSON-array artifact, remove the temp file. Any
//! utility or file failure aborts the whole run; the remaining collections
//! are not attempted and the metadata file is left untouched. Only after
//! every collection succeeded is the metadata store updated with the
//! requested selection.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};

use super::metadata::MetadataStore;
use super::progress::ProgressTracker;
use super::runner::ExportUtility;

/// Result of an export run.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Artifact paths written, in export order.
    pub artifacts: Vec<PathBuf>,

    /// Whether the run was cancelled before completing.
    pub cancelled: bool,
}

/// Orchestrates the per-collection export loop and the metadata update.
pub struct ExportPipeline<'a> {
    /// Run configuration (connection string, paths).
    config: &'a ExportConfig,

    /// External utility seam.
    utility: Box<dyn ExportUtility>,

    /// Cancellation token for aborting between collections.
    cancel_token: Option<CancellationToken>,

    /// Whether to render a progress bar.
    show_progress: bool,
}

impl<'a> ExportPipeline<'a> {
    /// Create a new pipeline over the given configuration and utility.
    pub fn new(config: &'a ExportConfig, utility: Box<dyn ExportUtility>) -> Self {
        Self {
            config,
            utility,
            cancel_token: None,
            show_progress: false,
        }
    }

    /// Set a cancellation token checked between collections.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Enable or disable the progress bar.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Export every collection in `selection`, then record the run.
    ///
    /// An empty selection is a deliberate no-op. A failure on any collection
    /// aborts the run with that error; earlier artifacts stay on disk but
    /// the metadata file is not updated. A metadata write failure after a
    /// fully successful export is logged and deliberately not propagated.
    pub async fn run(&self, selection: &[String]) -> Result<ExportOutcome> {
        if selection.is_empty() {
            info!("No collection was selected for export.");
            return Ok(ExportOutcome {
                artifacts: Vec::new(),
                cancelled: false,
            });
        }

        tokio::fs::create_dir_all(&self.config.data_dump_dir).await?;

        let tracker = ProgressTracker::new(selection.len() as u64, self.show_progress);
        let mut artifacts = Vec::with_capacity(selection.len());

        for name in selection {
            if let Some(ref token) = self.cancel_token {
                if token.is_cancelled() {
                    tracker.finish();
                    info!("Export cancelled before collection '{name}'");
                    return Ok(ExportOutcome {
                        artifacts,
                        cancelled: true,
                    });
                }
            }

            tracker.start_collection(name);
            let artifact = self.export_collection(name).await?;
            info!("Collection {name} exported to: {}", artifact.display());
            artifacts.push(artifact);
            tracker.collection_done();
        }

        tracker.finish();
        self.record_metadata(selection).await;

        info!("Export complete for the selected collections.");
        Ok(ExportOutcome {
            artifacts,
            cancelled: false,
        })
    }

    /// Dump one collection and assemble its artifact.
    async fn export_collection(&self, name: &str) -> Result<PathBuf> {
        let temp_path = self.config.data_dump_dir.join(format!("temp_{name}.json"));
        let artifact_path = self.config.data_dump_dir.join(format!("{name}.json"));

        self.utility
            .dump_collection(&self.config.uri, name, &temp_path)
            .await?;

        assemble_artifact(&temp_path, &artifact_path, name).await?;

        tokio::fs::remove_file(&temp_path)
            .await
            .map_err(|e| ExportError::ArtifactFailed {
                collection: name.to_string(),
                detail: format!("could not remove {}: {e}", temp_path.display()),
            })?;

        Ok(artifact_path)
    }

    /// Update the metadata file with the requested selection.
    ///
    /// Records the selection as requested, not a post-hoc list of successes:
    /// by this point every requested collection has an artifact, since any
    /// failure aborted the run before reaching here.
    async fn record_metadata(&self, selection: &[String]) {
        let store = MetadataStore::new(&self.config.metadata_path);
        match store.record_exported(selection).await {
            Ok(()) => info!(
                "Metadata file updated at: {}",
                self.config.metadata_path.display()
            ),
            Err(e) => error!(
                "Error updating {}: {e}",
                self.config.metadata_path.display()
            ),
        }
    }
}

/// Turn a utility dump into the final JSON-array artifact.
async fn assemble_artifact(temp_path: &Path, artifact_path: &Path, name: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(temp_path)
        .await
        .map_err(|e| ExportError::ArtifactFailed {
            collection: name.to_string(),
            detail: format!("could not read {}: {e}", temp_path.display()),
        })?;

    let artifact = join_records(&content);

    tokio::fs::write(artifact_path, artifact)
        .await
        .map_err(|e| ExportError::ArtifactFailed {
            collection: name.to_string(),
            detail: format!("could not write {}: {e}", artifact_path.display()),
        })?;

    Ok(())
}

/// Join the utility's line-delimited records into one JSON array text.
///
/// Each non-blank line is one independently serialized record; they are
/// joined verbatim, one record per line, inside square brackets.
fn join_records(content: &str) -> String {
    let records: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    format!("[\n{}\n]", records.join(",\n"))
}
