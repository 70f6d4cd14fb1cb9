//! Test utilities for Glauber development.
//!
//! The centerpiece is [`SiteLattice`], a byte-per-site reference lattice
//! with explicit row/column geometry. It is deliberately slow and obvious:
//! every geometric claim the packed representation makes (column mapping,
//! neighbour alignment, antiparallel counts) can be cross-checked against
//! it site by site.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use glauber_core::BitSource;
use glauber_lattice::{Lattice, Sublattice};

/// Map a folded coordinate (sublattice, line, bit) to the physical
/// `(row, column)` of the site it encodes.
///
/// Line `x` of either sublattice holds row `x`. Within the line, bit `k`
/// descends through the columns of one parity: the highest bit holds the
/// lowest column, and the parity alternates per row so that the two
/// arrays interleave into a checkerboard.
pub fn site_of(extent: u32, sub: Sublattice, x: u32, k: u32) -> (u32, u32) {
    let half = extent / 2;
    let parity = (x + 1 + sub.index() as u32) & 1;
    (x, 2 * (half - 1 - k) + parity)
}

/// The sublattice that owns physical site `(row, col)`.
pub fn owner_of(row: u32, col: u32) -> Sublattice {
    if (row + col + 1) % 2 == 0 {
        Sublattice::Even
    } else {
        Sublattice::Odd
    }
}

/// The bit index within its line that encodes column `col`.
pub fn bit_of(extent: u32, col: u32) -> u32 {
    extent / 2 - 1 - col / 2
}

/// A lattice with a hot (uniformly random) spin configuration.
pub fn random_lattice(extent: u32, seed: u64) -> Lattice {
    let mut lattice = Lattice::new(extent).expect("test extent must be valid");
    lattice.randomize(&mut BitSource::from_seed(seed));
    lattice
}

/// A byte-per-site unfolding of the checkerboard representation.
///
/// Spins are addressed directly by `(row, col)` with periodic boundaries,
/// so neighbour counting is a four-term loop instead of a carry circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteLattice {
    extent: u32,
    spins: Vec<bool>,
}

impl SiteLattice {
    /// All spins down.
    pub fn aligned(extent: u32) -> Self {
        Self {
            extent,
            spins: vec![false; (extent * extent) as usize],
        }
    }

    /// Unfold a packed lattice into explicit sites.
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let extent = lattice.extent();
        let mut out = Self::aligned(extent);
        for sub in Sublattice::BOTH {
            for (x, line) in lattice.lines(sub).iter().enumerate() {
                for k in 0..line.bits() {
                    let (row, col) = site_of(extent, sub, x as u32, k);
                    out.set_spin(row, col, line.get(k));
                }
            }
        }
        out
    }

    /// Fold back into the packed representation. Inverse of
    /// [`from_lattice`](Self::from_lattice).
    pub fn to_lattice(&self) -> Lattice {
        let mut lattice = Lattice::new(self.extent).expect("extent was valid on construction");
        for row in 0..self.extent {
            for col in 0..self.extent {
                let sub = owner_of(row, col);
                let k = bit_of(self.extent, col);
                let up = self.spin(row, col);
                lattice.lines_mut(sub)[row as usize].set(k, up);
            }
        }
        lattice
    }

    pub fn extent(&self) -> u32 {
        self.extent
    }

    pub fn spin(&self, row: u32, col: u32) -> bool {
        self.spins[(row * self.extent + col) as usize]
    }

    pub fn set_spin(&mut self, row: u32, col: u32, up: bool) {
        self.spins[(row * self.extent + col) as usize] = up;
    }

    /// Number of the four nearest neighbours whose spin differs from the
    /// site's own, with periodic wrapping.
    pub fn antiparallel_neighbours(&self, row: u32, col: u32) -> u32 {
        let n = self.extent;
        let own = self.spin(row, col);
        let neighbours = [
            ((row + n - 1) % n, col),
            ((row + 1) % n, col),
            (row, (col + n - 1) % n),
            (row, (col + 1) % n),
        ];
        neighbours
            .iter()
            .filter(|&&(r, c)| self.spin(r, c) != own)
            .count() as u32
    }

    /// One half-sweep of the zero-temperature limit: every site of `sub`
    /// with two or more antiparallel neighbours flips, the rest hold.
    /// Deterministic, so it doubles as an oracle for the packed engine at
    /// acceptance probability zero.
    pub fn half_sweep_deterministic(&mut self, sub: Sublattice) {
        let mut flips = Vec::new();
        for row in 0..self.extent {
            for col in 0..self.extent {
                if owner_of(row, col) == sub && self.antiparallel_neighbours(row, col) >= 2 {
                    flips.push((row, col));
                }
            }
        }
        for (row, col) in flips {
            let flipped = !self.spin(row, col);
            self.set_spin(row, col, flipped);
        }
    }

    /// Normalized absolute magnetization, matching
    /// [`Lattice::magnetization`].
    pub fn magnetization(&self) -> f64 {
        let up = self.spins.iter().filter(|&&s| s).count() as f64;
        let total = self.spins.len() as f64;
        (2.0 * up / total - 1.0).abs()
    }
}
