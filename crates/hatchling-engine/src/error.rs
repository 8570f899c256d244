//! Error types for the terminal driver.
//!
//! [`EngineError`] is the top-level error type that wraps every failure
//! mode during startup and command handling.

use crate::input::InputError;

/// Top-level error for the terminal driver.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hatchling_core::ConfigError,
    },

    /// The pet loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: hatchling_core::RunnerError,
    },

    /// A command line could not be parsed.
    #[error("{source}")]
    Input {
        /// The underlying parse error.
        #[from]
        source: InputError,
    },

    /// Reading the terminal failed.
    #[error("terminal I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The pet loop stopped while a command was in flight.
    #[error("the pet loop is no longer running")]
    LoopStopped,
}
