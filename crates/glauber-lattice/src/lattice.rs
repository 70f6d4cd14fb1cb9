//! The full spin configuration: two checkerboard sublattice arrays.

use std::io::{Read, Write};

use glauber_core::BitSource;

use crate::checkpoint;
use crate::error::{CheckpointError, LatticeError};
use crate::line::Line;

/// One of the two checkerboard sublattices.
///
/// The assignment of physical column parities to the two arrays is a pure
/// naming convention; what matters is that line `x` of one array is
/// column-offset by exactly one site from line `x` of the other, which the
/// sweep engine compensates with a single-bit rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sublattice {
    /// Sublattice array 0.
    Even,
    /// Sublattice array 1.
    Odd,
}

impl Sublattice {
    /// Both sublattices in update order (even half-sweep first).
    pub const BOTH: [Sublattice; 2] = [Sublattice::Even, Sublattice::Odd];

    /// Array index: 0 for even, 1 for odd.
    pub fn index(self) -> usize {
        match self {
            Sublattice::Even => 0,
            Sublattice::Odd => 1,
        }
    }

    /// The opposite sublattice.
    pub fn other(self) -> Sublattice {
        match self {
            Sublattice::Even => Sublattice::Odd,
            Sublattice::Odd => Sublattice::Even,
        }
    }
}

/// The full `extent × extent` spin configuration, folded into two arrays
/// of `extent` lines of `extent / 2` bits each.
///
/// # Examples
///
/// ```
/// use glauber_lattice::{Lattice, Sublattice};
///
/// let lattice = Lattice::new(16).unwrap();
/// assert_eq!(lattice.extent(), 16);
/// assert_eq!(lattice.lines(Sublattice::Even).len(), 16);
///
/// // The aligned cold start is fully magnetized.
/// assert_eq!(lattice.magnetization(), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    extent: u32,
    sublattices: [Vec<Line>; 2],
}

impl Lattice {
    /// Minimum supported lattice extent.
    pub const MIN_EXTENT: u32 = 2;
    /// Maximum supported lattice extent.
    pub const MAX_EXTENT: u32 = 1 << 16;

    /// Create an aligned (all spins down) lattice.
    ///
    /// # Errors
    ///
    /// Returns a [`LatticeError`] if the extent is odd, below
    /// [`MIN_EXTENT`](Self::MIN_EXTENT), or above
    /// [`MAX_EXTENT`](Self::MAX_EXTENT).
    pub fn new(extent: u32) -> Result<Self, LatticeError> {
        Self::validate_extent(extent)?;
        let half = extent / 2;
        let make = || vec![Line::zeros(half); extent as usize];
        Ok(Self {
            extent,
            sublattices: [make(), make()],
        })
    }

    /// Check an extent against the construction constraints.
    pub fn validate_extent(extent: u32) -> Result<(), LatticeError> {
        if extent < Self::MIN_EXTENT {
            return Err(LatticeError::ExtentTooSmall { extent });
        }
        if extent > Self::MAX_EXTENT {
            return Err(LatticeError::ExtentTooLarge {
                extent,
                max: Self::MAX_EXTENT,
            });
        }
        if extent % 2 != 0 {
            return Err(LatticeError::ExtentNotEven { extent });
        }
        Ok(())
    }

    /// Lattice edge length.
    pub fn extent(&self) -> u32 {
        self.extent
    }

    /// Active bits per line (`extent / 2`).
    pub fn half_extent(&self) -> u32 {
        self.extent / 2
    }

    /// Total number of sites (`extent²`).
    pub fn site_count(&self) -> u64 {
        u64::from(self.extent) * u64::from(self.extent)
    }

    /// The lines of one sublattice, by increasing row index.
    pub fn lines(&self, sub: Sublattice) -> &[Line] {
        &self.sublattices[sub.index()]
    }

    /// Mutable lines of one sublattice.
    pub fn lines_mut(&mut self, sub: Sublattice) -> &mut [Line] {
        &mut self.sublattices[sub.index()]
    }

    /// Split into the sublattice being updated (mutable) and the other
    /// sublattice (shared), the access pattern of one half-sweep.
    pub fn update_split(&mut self, sub: Sublattice) -> (&mut [Line], &[Line]) {
        let [even, odd] = &mut self.sublattices;
        match sub {
            Sublattice::Even => (even.as_mut_slice(), odd.as_slice()),
            Sublattice::Odd => (odd.as_mut_slice(), even.as_slice()),
        }
    }

    /// Randomize every spin (hot start). Used when the target temperature
    /// is above the ordering threshold.
    pub fn randomize(&mut self, src: &mut BitSource) {
        for sub in &mut self.sublattices {
            for line in sub.iter_mut() {
                line.fill_random(src);
            }
        }
    }

    /// Number of up spins across both sublattices.
    pub fn up_count(&self) -> u64 {
        self.sublattices
            .iter()
            .flatten()
            .map(|line| u64::from(line.count()))
            .sum()
    }

    /// Normalized absolute magnetization `|2·up/extent² − 1|`, in `[0, 1]`.
    pub fn magnetization(&self) -> f64 {
        let up = self.up_count() as f64;
        (2.0 * up / self.site_count() as f64 - 1.0).abs()
    }

    /// Serialize the checkpoint: header, then every line raw (even
    /// sublattice then odd, increasing line index).
    ///
    /// # Errors
    ///
    /// Only I/O errors; the in-memory state always serializes.
    pub fn save<W: Write>(&self, w: &mut W) -> Result<(), CheckpointError> {
        checkpoint::write_checkpoint(self, w)
    }

    /// Deserialize a checkpoint recorded for `extent`.
    ///
    /// Returns an error (rather than panicking) on bad magic, version or
    /// extent mismatch, truncation, or padding-bit corruption, so callers
    /// can fall back to a cold start.
    pub fn load<R: Read>(r: &mut R, extent: u32) -> Result<Self, CheckpointError> {
        checkpoint::read_checkpoint(r, extent)
    }

    pub(crate) fn from_parts(extent: u32, sublattices: [Vec<Line>; 2]) -> Self {
        Self {
            extent,
            sublattices,
        }
    }
}
