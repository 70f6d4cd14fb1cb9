//! Benchmark profiles for the Glauber simulator.
//!
//! Benchmarks run at the ordering transition: relaxation is slowest
//! there, so it is the regime where sweep throughput actually matters.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use glauber_core::{Acceptance, BitSource};
use glauber_engine::SweepEngine;
use glauber_lattice::Lattice;

/// β of the ordering transition, `ln(1 + √2) / 2`.
pub const CRITICAL_BETA: f64 = 0.440_686_793_509_771_5;

/// An engine at the critical temperature paired with a hot-started
/// lattice of the given extent.
pub fn critical_profile(extent: u32, seed: u64) -> (SweepEngine, Lattice) {
    let acceptance = Acceptance::from_beta(CRITICAL_BETA).expect("critical beta is finite");
    let mut src = BitSource::from_seed(seed);
    let mut lattice = Lattice::new(extent).expect("benchmark extent is even");
    lattice.randomize(&mut src);
    (SweepEngine::new(&acceptance, src), lattice)
}
