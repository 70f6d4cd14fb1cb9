//! Glauber: bit-parallel heat-bath dynamics for the two-dimensional
//! Ising model.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Glauber sub-crates. For most users, adding `glauber` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use glauber::prelude::*;
//!
//! // A 64×64 lattice slightly below the transition temperature.
//! let acceptance = Acceptance::from_beta(0.5).unwrap();
//! let mut lattice = Lattice::new(64).unwrap();
//! let mut engine = SweepEngine::new(&acceptance, BitSource::from_seed(42));
//!
//! for _ in 0..100 {
//!     engine.sweep(&mut lattice);
//! }
//! // Cold start in the ordered phase: the magnetization stays high.
//! assert!(lattice.magnetization() > 0.5);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `glauber-core` | Random mask source, acceptance probability |
//! | [`lattice`] | `glauber-lattice` | Packed lines, the lattice, checkpoints |
//! | [`engine`] | `glauber-engine` | Sweep kernel, run loop, sample files |
//! | [`stats`] | `glauber-stats` | Jackknife error analysis |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Random mask source and acceptance probability (`glauber-core`).
///
/// [`types::BitSource`] turns a seeded PRNG into word-wide Bernoulli
/// masks; [`types::Acceptance`] quantizes `exp(−4β)` and names it on
/// disk.
pub use glauber_core as types;

/// Packed spin storage and checkpoints (`glauber-lattice`).
///
/// [`lattice::Line`] packs one sublattice row into words;
/// [`lattice::Lattice`] folds the checkerboard into two line arrays and
/// round-trips through a binary checkpoint.
pub use glauber_lattice as lattice;

/// Sweep kernel and run orchestration (`glauber-engine`).
///
/// [`engine::SweepEngine`] applies bit-parallel half-sweeps;
/// [`engine::run`] drives resumable measurement runs.
pub use glauber_engine as engine;

/// Jackknife error analysis (`glauber-stats`).
///
/// [`stats::analyze`] turns a correlated magnetization series into
/// estimates with honest error bars.
pub use glauber_stats as stats;

/// Common imports for typical usage.
///
/// ```rust
/// use glauber::prelude::*;
/// ```
pub mod prelude {
    pub use glauber_core::{Acceptance, BitSource};

    pub use glauber_lattice::{Lattice, Line, Sublattice};

    pub use glauber_engine::{run, CancelToken, RunConfig, RunReport, SweepEngine};

    pub use glauber_stats::{analyze, Analysis, AnalysisConfig, Estimate};

    // Errors
    pub use glauber_core::AcceptanceError;
    pub use glauber_engine::{ConfigError, RunError};
    pub use glauber_lattice::{CheckpointError, LatticeError};
    pub use glauber_stats::AnalysisError;
}
