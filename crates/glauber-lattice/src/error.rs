//! Error types for lattice construction and checkpoint I/O.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from constructing a [`Lattice`](crate::Lattice).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// The checkerboard folding requires an even extent.
    ExtentNotEven {
        /// The rejected extent.
        extent: u32,
    },
    /// The extent is below the minimum of 2.
    ExtentTooSmall {
        /// The rejected extent.
        extent: u32,
    },
    /// The extent exceeds the supported maximum.
    ExtentTooLarge {
        /// The rejected extent.
        extent: u32,
        /// The maximum supported extent.
        max: u32,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtentNotEven { extent } => {
                write!(f, "lattice extent must be even, got {extent}")
            }
            Self::ExtentTooSmall { extent } => {
                write!(f, "lattice extent {extent} is below the minimum of 2")
            }
            Self::ExtentTooLarge { extent, max } => {
                write!(f, "lattice extent {extent} exceeds the maximum of {max}")
            }
        }
    }
}

impl Error for LatticeError {}

/// Errors from reading or writing a lattice checkpoint.
#[derive(Debug)]
pub enum CheckpointError {
    /// An I/O error occurred (includes truncated files).
    Io(io::Error),
    /// The file does not start with the checkpoint magic bytes.
    InvalidMagic,
    /// The checkpoint format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the file.
        found: u8,
    },
    /// The checkpoint records a different lattice extent than configured.
    ExtentMismatch {
        /// Extent recorded in the file.
        recorded: u32,
        /// Extent the caller configured.
        configured: u32,
    },
    /// The recorded extent is not itself a valid lattice extent.
    InvalidExtent(LatticeError),
    /// A stored line has bits set outside its active range.
    MalformedLine {
        /// Sublattice index (0 = even, 1 = odd).
        sublattice: usize,
        /// Line index within the sublattice.
        index: usize,
    },
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid checkpoint magic bytes"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported checkpoint version {found}")
            }
            Self::ExtentMismatch {
                recorded,
                configured,
            } => {
                write!(
                    f,
                    "checkpoint extent mismatch: recorded={recorded}, configured={configured}"
                )
            }
            Self::InvalidExtent(e) => write!(f, "checkpoint extent invalid: {e}"),
            Self::MalformedLine { sublattice, index } => {
                write!(
                    f,
                    "line {index} of sublattice {sublattice} has padding bits set"
                )
            }
        }
    }
}

impl Error for CheckpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidExtent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CheckpointError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<LatticeError> for CheckpointError {
    fn from(e: LatticeError) -> Self {
        Self::InvalidExtent(e)
    }
}
