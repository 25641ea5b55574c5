//! Error handling for undersounds tooling.
//!
//! One crate-wide error type wraps the specific error kinds so that every
//! fallible operation can use the shared [`Result`] alias. Fatal errors are
//! always surfaced with operator-facing text before the process exits; see
//! the binary's `run` function for the exit-code mapping.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{
    ClientError, ConfigError, ConnectionError, ExportError, Result, SelectionError,
    UndersoundsError,
};
