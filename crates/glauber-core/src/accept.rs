//! Acceptance probability and its path signature.
//!
//! The heat-bath update flips a site with one antiparallel neighbour with
//! probability `exp(-4β)` and a site with zero antiparallel neighbours with
//! `exp(-8β)`; both are derived from the single value `p = exp(-4β)`.
//! [`Acceptance`] stores `p` quantized to a fixed number of binary fraction
//! digits and renders those digits as the run's *signature* — the string
//! that keys sample and checkpoint file paths. Two runs with equal
//! signatures draw from identical mask distributions, which is what makes
//! checkpoint resume statistically seamless.

use std::fmt;

use crate::error::AcceptanceError;

/// Number of binary fraction digits the acceptance probability is
/// quantized to. Shared with [`BitSource::biased_mask`](crate::BitSource::biased_mask)
/// so signature-derived probabilities reproduce masks exactly.
pub const SIGNATURE_FRACTION_BITS: u32 = 32;

/// Quantized flip probability `exp(-4β)` with a path-safe signature.
///
/// # Examples
///
/// ```
/// use glauber_core::Acceptance;
///
/// let acc = Acceptance::from_beta(1.0).unwrap();
/// assert!((acc.probability() - (-4.0f64).exp()).abs() < 1e-9);
///
/// // Signature round-trip is exact.
/// let back = Acceptance::from_signature(&acc.signature()).unwrap();
/// assert_eq!(acc, back);
///
/// // β = 0 is the unconditional-flip limit.
/// assert_eq!(Acceptance::from_beta(0.0).unwrap().signature(), "1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Acceptance {
    /// Numerator of `p` over `2^SIGNATURE_FRACTION_BITS`;
    /// invariant: `q <= 1 << SIGNATURE_FRACTION_BITS`.
    q: u64,
}

impl Acceptance {
    /// Quantize `exp(-4β)` for a finite, non-negative inverse temperature.
    ///
    /// # Errors
    ///
    /// Returns [`AcceptanceError::InvalidBeta`] for NaN, infinite, or
    /// negative `beta`.
    pub fn from_beta(beta: f64) -> Result<Self, AcceptanceError> {
        if !beta.is_finite() || beta < 0.0 {
            return Err(AcceptanceError::InvalidBeta { value: beta });
        }
        Self::from_probability((-4.0 * beta).exp())
    }

    /// Quantize a raw per-bit probability in `[0, 1]`.
    ///
    /// Probabilities below the quantization step round to zero; a run at
    /// such a `p` never flips zero- or one-neighbour sites.
    pub fn from_probability(p: f64) -> Result<Self, AcceptanceError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AcceptanceError::InvalidProbability { value: p });
        }
        let scale = (1u64 << SIGNATURE_FRACTION_BITS) as f64;
        Ok(Self {
            q: (p * scale).round() as u64,
        })
    }

    /// Parse a signature string back into the probability it encodes.
    ///
    /// The first digit is the ones digit of `p`, the remaining digits are
    /// binary fraction digits MSB-first: `"1"` is `p = 1`, `"01"` is
    /// `p = 0.5`, `"0011"` is `p = 0.1875`.
    ///
    /// # Errors
    ///
    /// Rejects empty strings, non-binary digits, more than
    /// `1 + SIGNATURE_FRACTION_BITS` digits, and values above one.
    pub fn from_signature(sig: &str) -> Result<Self, AcceptanceError> {
        let mut digits = sig.chars();
        let max = 1 + SIGNATURE_FRACTION_BITS as usize;
        if sig.is_empty() {
            return Err(AcceptanceError::EmptySignature);
        }
        if sig.len() > max {
            return Err(AcceptanceError::SignatureTooLong {
                len: sig.len(),
                max,
            });
        }

        let whole = match digits.next() {
            Some('0') => 0u64,
            Some('1') => 1u64,
            Some(ch) => return Err(AcceptanceError::InvalidSignatureDigit { ch }),
            None => unreachable!("emptiness checked above"),
        };

        let mut fraction = 0u64;
        for (i, ch) in digits.enumerate() {
            let digit = match ch {
                '0' => 0u64,
                '1' => 1u64,
                _ => return Err(AcceptanceError::InvalidSignatureDigit { ch }),
            };
            fraction |= digit << (SIGNATURE_FRACTION_BITS - 1 - i as u32);
        }

        if whole == 1 && fraction != 0 {
            return Err(AcceptanceError::SignatureAboveOne);
        }
        Ok(Self {
            q: (whole << SIGNATURE_FRACTION_BITS) | fraction,
        })
    }

    /// The quantized per-bit probability `p`.
    pub fn probability(&self) -> f64 {
        self.q as f64 / (1u64 << SIGNATURE_FRACTION_BITS) as f64
    }

    /// The inverse temperature `β = -ln(p)/4` implied by the quantized
    /// probability. Returns `+∞` when the probability quantized to zero.
    pub fn beta(&self) -> f64 {
        -0.25 * self.probability().ln()
    }

    /// Render the signature: ones digit followed by the fraction digits
    /// MSB-first, trailing zeros trimmed. Never empty; `"0"` and `"1"` are
    /// the two degenerate values.
    pub fn signature(&self) -> String {
        let whole = self.q >> SIGNATURE_FRACTION_BITS;
        let fraction = self.q & ((1u64 << SIGNATURE_FRACTION_BITS) - 1);

        let mut out = String::new();
        out.push(if whole == 1 { '1' } else { '0' });
        if fraction != 0 {
            let last = SIGNATURE_FRACTION_BITS - 1 - fraction.trailing_zeros();
            for i in 0..=last {
                let digit = (fraction >> (SIGNATURE_FRACTION_BITS - 1 - i)) & 1;
                out.push(if digit == 1 { '1' } else { '0' });
            }
        }
        out
    }
}

impl fmt::Display for Acceptance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn beta_zero_is_certain_flip() {
        let acc = Acceptance::from_beta(0.0).unwrap();
        assert_eq!(acc.probability(), 1.0);
        assert_eq!(acc.signature(), "1");
        assert_eq!(acc.beta(), 0.0);
    }

    #[test]
    fn deep_cold_quantizes_to_zero() {
        // exp(-4 * 20) is far below the quantization step.
        let acc = Acceptance::from_beta(20.0).unwrap();
        assert_eq!(acc.probability(), 0.0);
        assert_eq!(acc.signature(), "0");
        assert!(acc.beta().is_infinite());
    }

    #[test]
    fn half_probability_signature() {
        let acc = Acceptance::from_probability(0.5).unwrap();
        assert_eq!(acc.signature(), "01");
        assert_eq!(Acceptance::from_signature("01").unwrap(), acc);
    }

    #[test]
    fn known_fraction_signature() {
        // 0.1875 = 0.0011 in binary.
        let acc = Acceptance::from_probability(0.1875).unwrap();
        assert_eq!(acc.signature(), "00011");
        assert_eq!(acc.probability(), 0.1875);
    }

    #[test]
    fn beta_probability_roundtrip() {
        for &beta in &[0.1, 0.3, 0.44, 1.0, 2.0] {
            let acc = Acceptance::from_beta(beta).unwrap();
            assert!(
                (acc.beta() - beta).abs() < 1e-8,
                "beta {beta} drifted to {}",
                acc.beta()
            );
        }
    }

    #[test]
    fn rejects_bad_beta() {
        assert!(matches!(
            Acceptance::from_beta(-0.5),
            Err(AcceptanceError::InvalidBeta { .. })
        ));
        assert!(matches!(
            Acceptance::from_beta(f64::NAN),
            Err(AcceptanceError::InvalidBeta { .. })
        ));
        assert!(matches!(
            Acceptance::from_beta(f64::INFINITY),
            Err(AcceptanceError::InvalidBeta { .. })
        ));
    }

    #[test]
    fn rejects_bad_signatures() {
        assert!(matches!(
            Acceptance::from_signature(""),
            Err(AcceptanceError::EmptySignature)
        ));
        assert!(matches!(
            Acceptance::from_signature("0120"),
            Err(AcceptanceError::InvalidSignatureDigit { ch: '2' })
        ));
        assert!(matches!(
            Acceptance::from_signature("11"),
            Err(AcceptanceError::SignatureAboveOne)
        ));
        let too_long = "0".repeat(34);
        assert!(matches!(
            Acceptance::from_signature(&too_long),
            Err(AcceptanceError::SignatureTooLong { len: 34, max: 33 })
        ));
    }

    #[test]
    fn whole_one_with_trailing_zeros_allowed() {
        let acc = Acceptance::from_signature("100").unwrap();
        assert_eq!(acc.probability(), 1.0);
        assert_eq!(acc.signature(), "1");
    }

    proptest! {
        #[test]
        fn signature_roundtrip(q in 0u64..=(1u64 << SIGNATURE_FRACTION_BITS)) {
            let acc = Acceptance { q };
            let back = Acceptance::from_signature(&acc.signature()).unwrap();
            prop_assert_eq!(acc, back);
        }

        #[test]
        fn probability_in_range(beta in 0.0f64..10.0) {
            let acc = Acceptance::from_beta(beta).unwrap();
            prop_assert!((0.0..=1.0).contains(&acc.probability()));
        }
    }
}
