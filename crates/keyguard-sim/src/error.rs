//! Replay errors.

use std::path::PathBuf;

use keyguard_harness::{ScenarioError, SimDriverError};
use thiserror::Error;

/// Replay failed.
#[derive(Error, Debug)]
pub enum SimError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the lock screen config.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// Scenario script could not be parsed.
    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    /// Driver failed while replaying.
    #[error(transparent)]
    Driver(#[from] SimDriverError),
}
