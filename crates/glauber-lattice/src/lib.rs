//! Bit-packed spin storage for the 2-D Ising model.
//!
//! The lattice is folded into two checkerboard sublattices; each row of a
//! sublattice is one [`Line`], a fixed-width bit vector holding
//! `extent / 2` spins packed into 64-bit words. All spin arithmetic happens
//! word-at-a-time through bitwise operators, so a single machine
//! instruction touches up to 64 sites. [`Lattice`] owns the two sublattice
//! arrays, the magnetization measurement, and the binary checkpoint
//! format.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod checkpoint;
mod error;
mod lattice;
mod line;

pub use checkpoint::{CHECKPOINT_MAGIC, CHECKPOINT_VERSION};
pub use error::{CheckpointError, LatticeError};
pub use lattice::{Lattice, Sublattice};
pub use line::{Line, WORD_BITS};
