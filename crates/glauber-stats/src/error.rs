//! Error type for the jackknife analysis.

use std::error::Error;
use std::fmt;

/// Errors from [`analyze`](crate::analyze).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// The block size must be at least 1.
    ZeroBlockSize,
    /// Fewer than four full blocks remain after thermalization; the
    /// block variance would be meaningless.
    TooFewBlocks {
        /// Full blocks available.
        blocks: usize,
        /// Minimum required.
        min: usize,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBlockSize => write!(f, "jackknife block size must be at least 1"),
            Self::TooFewBlocks { blocks, min } => {
                write!(f, "only {blocks} full jackknife blocks, need at least {min}")
            }
        }
    }
}

impl Error for AnalysisError {}
