//! Randomness and acceptance-probability types for the Glauber Ising
//! simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! [`BitSource`], the generator of word-wide random bit masks that drives
//! every stochastic decision in the sweep engine, and [`Acceptance`], the
//! quantized flip probability `exp(-4β)` together with its bit-string
//! signature used to key output and checkpoint paths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod accept;
mod error;
mod source;

pub use accept::{Acceptance, SIGNATURE_FRACTION_BITS};
pub use error::AcceptanceError;
pub use source::BitSource;
