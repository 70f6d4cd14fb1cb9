//! One row of spins on one checkerboard sublattice, packed into words.
//!
//! A [`Line`] holds `bits = extent / 2` logical spins in `ceil(bits / 64)`
//! words. Word 0 carries the ragged high end: its bits above the active
//! range are padding and stay zero after every operation — the population
//! count and the rotation wraparound depend on that invariant. Logical bit
//! `k` is bit `k % 64` of word `len - 1 - k / 64`, so the last physical
//! column sits in the least significant bit of the last word.

use std::fmt;
use std::io::{Read, Write};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use glauber_core::BitSource;
use smallvec::SmallVec;

/// Bits per storage word.
pub const WORD_BITS: u32 = 64;

/// A fixed-width bit vector of spins with cyclic rotation over the active
/// range.
///
/// # Examples
///
/// ```
/// use glauber_lattice::Line;
///
/// let mut line = Line::zeros(10);
/// line.set(0, true);
/// line.set(9, true);
/// assert_eq!(line.count(), 2);
///
/// // Rotation is cyclic over the 10 active bits.
/// let rot = line.rotate_right();
/// assert!(rot.get(9), "bit 0 wraps to the top");
/// assert!(rot.get(8));
/// assert_eq!(rot.count(), 2);
/// assert_eq!(rot.rotate_left(), line);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Line {
    words: SmallVec<[u64; 4]>,
    bits: u32,
}

impl Line {
    /// A line of `bits` zero spins.
    ///
    /// # Panics
    ///
    /// Panics if `bits == 0`; a line always represents at least one spin.
    pub fn zeros(bits: u32) -> Self {
        assert!(bits > 0, "a line must hold at least one spin");
        let words = (bits as usize).div_ceil(WORD_BITS as usize);
        Self {
            words: SmallVec::from_elem(0, words),
            bits,
        }
    }

    /// Number of active (spin-carrying) bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of storage words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Mask of the active bits within word 0.
    fn head_mask(&self) -> u64 {
        let ragged = self.bits - (self.words.len() as u32 - 1) * WORD_BITS;
        if ragged == WORD_BITS {
            !0
        } else {
            (1u64 << ragged) - 1
        }
    }

    /// Bit position of the highest active bit within word 0.
    fn top_bit(&self) -> u32 {
        (self.bits - 1) % WORD_BITS
    }

    /// Fill every active bit from the uniform stream (cold random start).
    pub fn fill_random(&mut self, src: &mut BitSource) {
        for word in self.words.iter_mut() {
            *word = src.uniform();
        }
        self.words[0] &= self.head_mask();
    }

    /// Keep each set bit with probability `p`, clearing the rest.
    ///
    /// Every word is ANDed with an independent biased mask, so the
    /// decisions are independent across all active positions. Applying
    /// this twice keeps bits with probability exactly `p²`.
    pub fn thin(&mut self, src: &mut BitSource, p: f64) {
        for word in self.words.iter_mut() {
            *word &= src.biased_mask(p);
        }
    }

    /// Read logical bit `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= bits`.
    pub fn get(&self, k: u32) -> bool {
        assert!(k < self.bits, "bit {k} out of range 0..{}", self.bits);
        let word = self.words.len() - 1 - (k / WORD_BITS) as usize;
        (self.words[word] >> (k % WORD_BITS)) & 1 == 1
    }

    /// Set logical bit `k` to `up`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= bits`.
    pub fn set(&mut self, k: u32, up: bool) {
        assert!(k < self.bits, "bit {k} out of range 0..{}", self.bits);
        let word = self.words.len() - 1 - (k / WORD_BITS) as usize;
        let mask = 1u64 << (k % WORD_BITS);
        if up {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Population count over the active bits.
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Cyclic rotation moving logical bit `k` to `k - 1`; bit 0 wraps to
    /// the top of the active range. One physical column step toward higher
    /// column indices in the folded encoding.
    pub fn rotate_right(&self) -> Self {
        let n = self.words.len();
        let mut out = Self::zeros(self.bits);
        out.words[0] = (self.words[0] >> 1) | ((self.words[n - 1] & 1) << self.top_bit());
        for i in 1..n {
            out.words[i] = (self.words[i] >> 1) | (self.words[i - 1] << (WORD_BITS - 1));
        }
        out
    }

    /// Cyclic rotation moving logical bit `k` to `k + 1`; the top active
    /// bit wraps to bit 0. Inverse of [`rotate_right`](Self::rotate_right).
    pub fn rotate_left(&self) -> Self {
        let n = self.words.len();
        let mut out = Self::zeros(self.bits);
        for i in 0..n - 1 {
            out.words[i] = (self.words[i] << 1) | (self.words[i + 1] >> (WORD_BITS - 1));
        }
        out.words[n - 1] = (self.words[n - 1] << 1) | (self.words[0] >> self.top_bit());
        out.words[0] &= self.head_mask();
        out
    }

    /// Rotation selected by direction flag (`true` = right).
    pub fn rotate(&self, right: bool) -> Self {
        if right {
            self.rotate_right()
        } else {
            self.rotate_left()
        }
    }

    /// Write all words raw, word 0 first, each little-endian.
    pub fn write_into<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for word in &self.words {
            w.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }

    /// Read a line of `bits` spins back from its raw serialization.
    ///
    /// The bit pattern is restored exactly as written; callers that cannot
    /// trust the source should verify [`padding_clear`](Self::padding_clear).
    pub fn read_from<R: Read>(r: &mut R, bits: u32) -> std::io::Result<Self> {
        let mut out = Self::zeros(bits);
        let mut buf = [0u8; 8];
        for word in out.words.iter_mut() {
            r.read_exact(&mut buf)?;
            *word = u64::from_le_bytes(buf);
        }
        Ok(out)
    }

    /// Whether the padding bits above the active range are all zero.
    pub fn padding_clear(&self) -> bool {
        self.words[0] & !self.head_mask() == 0
    }

    fn assert_compatible(&self, other: &Self) {
        debug_assert_eq!(
            self.bits, other.bits,
            "lines of different widths cannot be combined"
        );
    }
}

impl BitAndAssign<&Line> for Line {
    fn bitand_assign(&mut self, rhs: &Line) {
        self.assert_compatible(rhs);
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a &= b;
        }
    }
}

impl BitOrAssign<&Line> for Line {
    fn bitor_assign(&mut self, rhs: &Line) {
        self.assert_compatible(rhs);
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a |= b;
        }
    }
}

impl BitXorAssign<&Line> for Line {
    fn bitxor_assign(&mut self, rhs: &Line) {
        self.assert_compatible(rhs);
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a ^= b;
        }
    }
}

impl BitAnd for &Line {
    type Output = Line;

    fn bitand(self, rhs: &Line) -> Line {
        let mut out = self.clone();
        out &= rhs;
        out
    }
}

impl BitOr for &Line {
    type Output = Line;

    fn bitor(self, rhs: &Line) -> Line {
        let mut out = self.clone();
        out |= rhs;
        out
    }
}

impl BitXor for &Line {
    type Output = Line;

    fn bitxor(self, rhs: &Line) -> Line {
        let mut out = self.clone();
        out ^= rhs;
        out
    }
}

impl Not for &Line {
    type Output = Line;

    /// Complement of the active bits only; padding stays zero. Without the
    /// mask, inverted padding would register as phantom antiparallel
    /// neighbours in the sweep reduction.
    fn not(self) -> Line {
        let mut out = Line::zeros(self.bits);
        out.words[0] = !self.words[0] & self.head_mask();
        for i in 1..self.words.len() {
            out.words[i] = !self.words[i];
        }
        out
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line[{}]<", self.bits)?;
        for k in (0..self.bits).rev() {
            f.write_str(if self.get(k) { "1" } else { "0" })?;
        }
        f.write_str(">")
    }
}
