//! Undersounds platform tooling
//!
//! Backend library for the Undersounds music platform services. It carries
//! the pieces the services share:
//!
//! - `cli`: command-line surface of the export tool
//! - `config`: environment-driven configuration for export runs
//! - `connection`: MongoDB connection management
//! - `error`: error types and the crate-wide `Result`
//! - `export`: the interactive collection-export pipeline
//! - `dto`: stable output shapes for Album/Artist/News records
//! - `accounts`: the user-service account model and persistence
//! - `client`: HTTP client for the content-service catalog API
//!
//! # Example
//!
//! ```no_run
//! use undersounds::config::ExportConfig;
//! use undersounds::export::{self, ExportPipeline, Mongoexport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig::from_env()?;
//!     let candidates = export::list_nonempty_collections(&config).await;
//!     let selection = export::select_collections(&candidates, config.input_timeout).await?;
//!
//!     let pipeline = ExportPipeline::new(&config, Box::new(Mongoexport::new()));
//!     pipeline.run(&selection).await?;
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod cli;
pub mod client;
pub mod config;
pub mod connection;
pub mod dto;
pub mod error;
pub mod export;

// Re-export commonly used types
pub use config::ExportConfig;
pub use connection::ConnectionManager;
pub use error::{Result, UndersoundsError};
pub use export::{ExportPipeline, MetadataStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
