//! Error types for acceptance-probability construction.

use std::error::Error;
use std::fmt;

/// Errors from constructing an [`Acceptance`](crate::Acceptance).
#[derive(Clone, Debug, PartialEq)]
pub enum AcceptanceError {
    /// The inverse temperature is NaN, infinite, or negative.
    InvalidBeta {
        /// The rejected value.
        value: f64,
    },
    /// A raw probability is NaN or outside `[0, 1]`.
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },
    /// The signature string is empty.
    EmptySignature,
    /// The signature string has more digits than the quantization supports.
    SignatureTooLong {
        /// Number of digits in the rejected signature.
        len: usize,
        /// Maximum number of digits accepted.
        max: usize,
    },
    /// The signature contains a character other than `0` or `1`.
    InvalidSignatureDigit {
        /// The offending character.
        ch: char,
    },
    /// The signature encodes a probability greater than one.
    SignatureAboveOne,
}

impl fmt::Display for AcceptanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBeta { value } => {
                write!(f, "inverse temperature must be finite and >= 0, got {value}")
            }
            Self::InvalidProbability { value } => {
                write!(f, "probability must be in [0, 1], got {value}")
            }
            Self::EmptySignature => write!(f, "signature string is empty"),
            Self::SignatureTooLong { len, max } => {
                write!(f, "signature has {len} digits, maximum is {max}")
            }
            Self::InvalidSignatureDigit { ch } => {
                write!(f, "signature digit must be '0' or '1', got {ch:?}")
            }
            Self::SignatureAboveOne => {
                write!(f, "signature encodes a probability greater than one")
            }
        }
    }
}

impl Error for AcceptanceError {}
