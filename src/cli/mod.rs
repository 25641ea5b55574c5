//! Command-line interface for the export tool
//!
//! The tool takes no configuration arguments: the connection string comes
//! from the `MONGO_URI` environment variable and the filesystem layout is
//! fixed. The flags here only tune logging verbosity and progress display.

use clap::Parser;
use tracing::Level;

/// Interactive collection export for the Undersounds content database
#[derive(Parser, Debug, Default)]
#[command(
    name = "export-db",
    version,
    about = "Export content-database collections to JSON array files",
    long_about = "Connects to the database named by the MONGO_URI environment variable, \
lists the collections that hold data, asks which to export, and writes one \
JSON array file per collection into the data-dump directory."
)]
pub struct CliArgs {
    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Quiet mode (errors only, no banner)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable the progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl CliArgs {
    /// Log level selected by the verbosity flags.
    pub fn log_level(&self) -> Level {
        if self.very_verbose {
            Level::TRACE
        } else if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else {
            Level::INFO
        }
    }

    /// Whether the progress bar should render.
    pub fn progress_enabled(&self) -> bool {
        !self.quiet && !self.no_progress
    }

    /// Print the startup banner unless in quiet mode.
    pub fn print_banner(&self) {
        if !self.quiet {
            println!("export-db v{} - Undersounds collection export", clap::crate_version!());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let args = CliArgs::default();
        assert_eq!(args.log_level(), Level::INFO);
        assert!(args.progress_enabled());
    }

    #[test]
    fn test_verbosity_precedence() {
        let args = CliArgs {
            verbose: true,
            very_verbose: true,
            ..Default::default()
        };
        assert_eq!(args.log_level(), Level::TRACE);
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = CliArgs {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(args.log_level(), Level::ERROR);
        assert!(!args.progress_enabled());
    }
}
