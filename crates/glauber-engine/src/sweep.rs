//! The bit-parallel checkerboard sweep.
//!
//! One half-sweep updates every site of one sublattice at once. For each
//! line, the four neighbour lines are XORed against the line itself to get
//! antiparallel indicators, a carry circuit splits the sites into three
//! energy classes, and each class is flipped with its heat-bath
//! probability using Bernoulli bit-masks:
//!
//! * zero antiparallel neighbours: flip with `p² = exp(−8β)`,
//! * exactly one: flip with `p = exp(−4β)`,
//! * two or more: flip unconditionally.
//!
//! The `p²` class is produced by thinning twice: the AND of two
//! independent Bernoulli(`p`) masks is Bernoulli(`p²`) exactly, so no
//! separate mask distribution is needed.

use glauber_core::{Acceptance, BitSource};
use glauber_lattice::{Lattice, Line, Sublattice};

/// Applies heat-bath half-sweeps to a lattice, consuming random masks
/// from an owned [`BitSource`].
///
/// # Examples
///
/// ```
/// use glauber_core::{Acceptance, BitSource};
/// use glauber_engine::SweepEngine;
/// use glauber_lattice::Lattice;
///
/// let acceptance = Acceptance::from_beta(1.0).unwrap();
/// let mut engine = SweepEngine::new(&acceptance, BitSource::from_seed(7));
/// let mut lattice = Lattice::new(16).unwrap();
/// engine.sweep(&mut lattice);
/// ```
pub struct SweepEngine {
    src: BitSource,
    p: f64,
}

impl SweepEngine {
    /// Engine for the given acceptance probability, drawing masks from
    /// `src`.
    pub fn new(acceptance: &Acceptance, src: BitSource) -> Self {
        Self {
            src,
            p: acceptance.probability(),
        }
    }

    /// The single-neighbour flip probability `exp(−4β)`.
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// One full sweep: the even half-sweep, then the odd. The order is
    /// fixed so that runs with the same seed are reproducible bit for
    /// bit.
    pub fn sweep(&mut self, lattice: &mut Lattice) {
        for sub in Sublattice::BOTH {
            self.half_sweep(lattice, sub);
        }
    }

    /// Update every site of one sublattice simultaneously.
    ///
    /// Vertical neighbours sit at the same bit index in the adjacent
    /// lines of the other sublattice. Horizontal neighbours are the
    /// other sublattice's line of the same row, once unshifted and once
    /// rotated by a single bit; the rotation direction alternates with
    /// the row parity because the two arrays interleave columns.
    pub fn half_sweep(&mut self, lattice: &mut Lattice, sub: Sublattice) {
        let extent = lattice.extent() as usize;
        let (current, other) = lattice.update_split(sub);
        let mut right = sub == Sublattice::Odd;
        for x in 0..extent {
            let antiparallel = antiparallel_lines(current, other, x, right);
            let (mut none, mut one, many) = classify(&antiparallel);
            one.thin(&mut self.src, self.p);
            none.thin(&mut self.src, self.p);
            none.thin(&mut self.src, self.p);
            let mut flips = many;
            flips |= &one;
            flips |= &none;
            current[x] ^= &flips;
            right = !right;
        }
    }
}

/// The four per-neighbour disagreement indicator lines for line `x` of
/// the sublattice being updated.
fn antiparallel_lines(current: &[Line], other: &[Line], x: usize, right: bool) -> [Line; 4] {
    let extent = current.len();
    let own = &current[x];
    [
        own ^ &other[wrap_dec(x, extent)],
        own ^ &other[wrap_inc(x, extent)],
        own ^ &other[x],
        own ^ &other[x].rotate(right),
    ]
}

/// Split sites into energy classes by antiparallel-neighbour count.
///
/// Returns `(none, one, many)`: masks of sites with zero, exactly one,
/// and two-or-more set bits across the four indicator lines. The three
/// masks partition the active range.
fn classify(antiparallel: &[Line; 4]) -> (Line, Line, Line) {
    let bits = antiparallel[0].bits();
    let mut at_least_one = Line::zeros(bits);
    let mut at_least_two = Line::zeros(bits);
    for line in antiparallel {
        let carry = &at_least_one & line;
        at_least_two |= &carry;
        at_least_one |= line;
    }
    let none = !&at_least_one;
    let keep = !&at_least_two;
    let mut one = at_least_one;
    one &= &keep;
    (none, one, at_least_two)
}

fn wrap_dec(x: usize, n: usize) -> usize {
    if x == 0 {
        n - 1
    } else {
        x - 1
    }
}

fn wrap_inc(x: usize, n: usize) -> usize {
    if x + 1 == n {
        0
    } else {
        x + 1
    }
}
