//! Interactive collection export
//!
//! This module implements the one-shot export tool for the content database:
//!
//! 1. **Lister**: enumerates the collections that actually hold data
//! 2. **Selector**: lets the operator pick collections by index, with a
//!    bounded wait and a fail-open policy for malformed input
//! 3. **Pipeline**: runs the external export utility per collection, turns
//!    its line-delimited output into one JSON-array artifact each, and
//!    finally records the run in the shared metadata file
//!
//! Everything runs sequentially in one process invocation; the only
//! concurrency is the timeout race on operator input and an optional
//! Ctrl+C cancellation check between collections.

pub mod lister;
pub mod metadata;
pub mod pipeline;
pub mod progress;
pub mod runner;
pub mod selector;

pub use lister::{CollectionDescriptor, list_nonempty_collections};
pub use metadata::MetadataStore;
pub use pipeline::{ExportOutcome, ExportPipeline};
pub use progress::ProgressTracker;
pub use runner::{ExportUtility, Mongoexport};
pub use selector::select_collections;
