//! The run-level error type.

use std::error::Error;
use std::fmt;
use std::io;

use glauber_lattice::CheckpointError;

use crate::config::ConfigError;

/// Errors that abort a simulation run.
///
/// Unreadable checkpoints are deliberately absent: the run loop logs
/// them and falls back to a cold start instead of failing. Only writing
/// the new checkpoint can surface a [`Checkpoint`](Self::Checkpoint)
/// error.
#[derive(Debug)]
pub enum RunError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Sample file I/O failed.
    Io(io::Error),
    /// Writing the end-of-run checkpoint failed.
    Checkpoint(CheckpointError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid run configuration: {e}"),
            Self::Io(e) => write!(f, "sample I/O failed: {e}"),
            Self::Checkpoint(e) => write!(f, "checkpoint write failed: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Checkpoint(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<CheckpointError> for RunError {
    fn from(e: CheckpointError) -> Self {
        Self::Checkpoint(e)
    }
}
