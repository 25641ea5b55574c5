//! Undersounds collection export tool
//!
//! One-shot interactive exporter for the content database: discovers the
//! collections that hold data, asks the operator which to export, dumps each
//! one through `mongoexport`, reshapes the dumps into JSON array files and
//! records the run in the shared metadata file.
//!
//! # Usage
//!
//! ```bash
//! MONGO_URI=mongodb://localhost:27017/undersounds export-db
//! ```
//!
//! Exit codes: 0 on success or a deliberate no-op, 1 on any configuration,
//! connection, selection or export failure.

use clap::Parser;
use tokio_util::sync::CancellationToken;

use undersounds::cli::CliArgs;
use undersounds::config::ExportConfig;
use undersounds::error::Result;
use undersounds::export::{self, ExportPipeline, Mongoexport};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Main application logic
///
/// Orchestrates one export run:
/// 1. Parse flags and initialize logging
/// 2. Build the configuration from the environment
/// 3. Discover exportable collections
/// 4. Resolve the operator's selection
/// 5. Run the pipeline and record the result
async fn run() -> Result<()> {
    let args = CliArgs::parse();
    initialize_logging(&args);
    args.print_banner();

    let config = ExportConfig::from_env()?;

    let candidates = export::list_nonempty_collections(&config).await;
    let selection = export::select_collections(&candidates, config.input_timeout).await?;

    if selection.is_empty() {
        println!("No collection was selected for export.");
        return Ok(());
    }

    // Let Ctrl+C stop the run between collections instead of killing the
    // process mid-artifact.
    let cancel_token = CancellationToken::new();
    let token_for_signal = cancel_token.clone();
    let ctrl_c_handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => token_for_signal.cancel(),
            Err(err) => eprintln!("Failed to listen for Ctrl+C: {err}"),
        }
    });

    let pipeline = ExportPipeline::new(&config, Box::new(Mongoexport::new()))
        .with_cancellation(cancel_token)
        .with_progress(args.progress_enabled());

    let outcome = pipeline.run(&selection).await;
    ctrl_c_handle.abort();

    let outcome = outcome?;
    if outcome.cancelled {
        return Err("Export cancelled before completion; metadata left unchanged".into());
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
fn initialize_logging(args: &CliArgs) {
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_target(false)
        .without_time()
        .init();
}
