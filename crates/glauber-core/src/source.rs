//! Word-wide random bit generation.
//!
//! [`BitSource`] wraps a seeded ChaCha8 stream and exposes the two mask
//! shapes the sweep engine consumes: full-entropy words ([`uniform`]) and
//! Bernoulli-biased words ([`biased_mask`]) where each bit is set with a
//! configured probability. Randomness is injected into the lattice update
//! as whole words, never as per-site draws.
//!
//! [`uniform`]: BitSource::uniform
//! [`biased_mask`]: BitSource::biased_mask

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::accept::SIGNATURE_FRACTION_BITS;

/// A stream of random machine words with configurable per-bit bias.
///
/// Construction requires a seed (or OS entropy), so there is no
/// "uninitialized source" state to misuse. One source must serve exactly
/// one sequential consumer; parallel line workers need one source each,
/// seeded independently.
///
/// # Examples
///
/// ```
/// use glauber_core::BitSource;
///
/// let mut src = BitSource::from_seed(42);
/// let a = src.uniform();
/// let b = src.uniform();
/// assert_ne!(a, b, "consecutive draws come from a progressing stream");
///
/// // Degenerate biases are exact.
/// assert_eq!(src.biased_mask(0.0), 0);
/// assert_eq!(src.biased_mask(1.0), !0u64);
/// ```
#[derive(Clone, Debug)]
pub struct BitSource {
    rng: ChaCha8Rng,
}

impl BitSource {
    /// Create a source from a fixed 64-bit seed (reproducible runs, tests).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from OS entropy (production runs without a
    /// `--seed` override).
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// One word with every bit independently set with probability 0.5.
    #[inline]
    pub fn uniform(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// One word with every bit independently set with probability `p`.
    ///
    /// `p` is quantized to [`SIGNATURE_FRACTION_BITS`] binary fraction
    /// digits — the same quantization the acceptance signature uses, so a
    /// probability recovered from a signature reproduces the mask
    /// distribution exactly. Values at or below 0 yield the zero word,
    /// values at or above 1 yield the all-ones word, and neither consumes
    /// generator state.
    ///
    /// The construction folds one uniform word per significant fraction
    /// digit, from the lowest set digit upward: OR for a 1 digit, AND for
    /// a 0 digit. Each output bit is then set with probability exactly
    /// equal to the quantized `p`. In particular, ANDing two independent
    /// masks drawn at the same `p` yields a Bernoulli(`p²`) mask — the
    /// identity the sweep engine relies on to realize `exp(-8β)` from two
    /// `exp(-4β)` draws.
    pub fn biased_mask(&mut self, p: f64) -> u64 {
        let scale = (1u64 << SIGNATURE_FRACTION_BITS) as f64;
        let q = (p * scale).round();
        if q <= 0.0 {
            return 0;
        }
        if q >= scale {
            return !0u64;
        }
        let q = q as u64;

        let mut acc = self.rng.next_u64();
        for digit in (q.trailing_zeros() + 1)..SIGNATURE_FRACTION_BITS {
            let word = self.rng.next_u64();
            acc = if (q >> digit) & 1 == 1 {
                word | acc
            } else {
                word & acc
            };
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_fraction(src: &mut BitSource, p: f64, draws: usize) -> f64 {
        let mut ones = 0u64;
        for _ in 0..draws {
            ones += u64::from(src.biased_mask(p).count_ones());
        }
        ones as f64 / (draws as f64 * 64.0)
    }

    // ── Determinism ─────────────────────────────────────────────

    #[test]
    fn same_seed_same_stream() {
        let mut a = BitSource::from_seed(7);
        let mut b = BitSource::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
        for _ in 0..100 {
            assert_eq!(a.biased_mask(0.3), b.biased_mask(0.3));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = BitSource::from_seed(1);
        let mut b = BitSource::from_seed(2);
        let same = (0..64).filter(|_| a.uniform() == b.uniform()).count();
        assert_eq!(same, 0, "independent streams should not collide");
    }

    // ── Degenerate biases ───────────────────────────────────────

    #[test]
    fn bias_zero_is_empty_mask() {
        let mut src = BitSource::from_seed(0);
        assert_eq!(src.biased_mask(0.0), 0);
        assert_eq!(src.biased_mask(-1.0), 0);
    }

    #[test]
    fn bias_one_is_full_mask() {
        let mut src = BitSource::from_seed(0);
        assert_eq!(src.biased_mask(1.0), !0u64);
        assert_eq!(src.biased_mask(1.5), !0u64);
    }

    #[test]
    fn degenerate_bias_consumes_no_state() {
        let mut a = BitSource::from_seed(11);
        let mut b = BitSource::from_seed(11);
        let _ = a.biased_mask(0.0);
        let _ = a.biased_mask(1.0);
        assert_eq!(a.uniform(), b.uniform());
    }

    // ── Statistical behaviour ───────────────────────────────────

    #[test]
    fn bias_half_matches_uniform_rate() {
        let mut src = BitSource::from_seed(3);
        let rate = set_fraction(&mut src, 0.5, 4000);
        assert!((rate - 0.5).abs() < 0.01, "rate {rate} too far from 0.5");
    }

    #[test]
    fn biased_rate_tracks_p() {
        let mut src = BitSource::from_seed(5);
        for &p in &[0.1, 0.25, 0.7, 0.9] {
            let rate = set_fraction(&mut src, p, 4000);
            assert!((rate - p).abs() < 0.01, "rate {rate} too far from {p}");
        }
    }

    #[test]
    fn and_of_two_masks_squares_probability() {
        // AND of two independent Bernoulli(p) masks must be Bernoulli(p^2).
        let mut src = BitSource::from_seed(9);
        let p = 0.6;
        let draws = 8000;
        let mut ones = 0u64;
        for _ in 0..draws {
            let m = src.biased_mask(p) & src.biased_mask(p);
            ones += u64::from(m.count_ones());
        }
        let rate = ones as f64 / (draws as f64 * 64.0);
        assert!(
            (rate - p * p).abs() < 0.01,
            "rate {rate} too far from {}",
            p * p
        );
    }
}
