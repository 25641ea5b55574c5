//! Progress feedback for export runs
//!
//! Shows a per-collection progress bar while the external utility works
//! through the selection. Granularity is one step per collection; the tool
//! does not see inside the utility's own document stream.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the selected collections.
pub struct ProgressTracker {
    /// Progress bar (optional, can be disabled)
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a new progress tracker
    ///
    /// # Arguments
    /// * `total` - Number of collections in the selection
    /// * `enable_bar` - Whether to display a progress bar
    pub fn new(total: u64, enable_bar: bool) -> Self {
        let bar = if enable_bar {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        Self { bar }
    }

    /// Announce the collection currently being exported.
    pub fn start_collection(&self, name: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("exporting {name}"));
        }
    }

    /// Mark one collection as finished.
    pub fn collection_done(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
