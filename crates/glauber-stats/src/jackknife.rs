//! Blocked jackknife estimates of magnetization and susceptibility.
//!
//! Samples from a Markov chain are correlated, so the naive variance of
//! the mean underestimates the true error. Grouping the series into
//! blocks much longer than the autocorrelation time and resampling
//! leave-one-block-out restores an honest error bar. For each block `j`
//! the statistic `T` is recomputed without that block (`T_j`), and the
//! pseudo-value `J_j = n·T − (n−1)·T_j` is formed; the mean and scatter
//! of the pseudo-values give the estimate and its squared error.

use crate::error::AnalysisError;

/// Default jackknife block length.
pub const DEFAULT_BLOCK_SIZE: usize = 20;

/// Minimum number of full blocks the analysis accepts.
pub const MIN_BLOCKS: usize = 4;

/// Parameters of one analysis pass.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Samples per jackknife block.
    pub block_size: usize,
    /// Leading samples to discard as thermalization.
    pub thermalization: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            thermalization: 0,
        }
    }
}

/// A jackknife estimate with its one-sigma error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    /// Bias-corrected estimate.
    pub value: f64,
    /// One standard error.
    pub error: f64,
}

/// The full result of analyzing one sample series.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    /// Samples actually analyzed, after thermalization and truncation
    /// to whole blocks.
    pub analyzed: usize,
    /// Plain sample mean of the magnetization.
    pub mean: f64,
    /// Plain sample variance of the magnetization.
    pub variance: f64,
    /// Jackknife magnetization estimate.
    pub magnetization: Estimate,
    /// Jackknife susceptibility estimate, scaled by `extent² · β`.
    pub susceptibility: Estimate,
}

/// Run the jackknife analysis on one magnetization series.
///
/// The first `thermalization` samples are discarded, the remainder is
/// truncated to whole blocks, and mean and variance are resampled
/// leave-one-block-out. The variance estimate is scaled by `extent²·β`
/// into the magnetic susceptibility.
///
/// # Errors
///
/// Returns an [`AnalysisError`] for a zero block size or fewer than
/// [`MIN_BLOCKS`] full blocks.
///
/// # Examples
///
/// ```
/// use glauber_stats::{analyze, AnalysisConfig};
///
/// let samples: Vec<f32> = (0..200).map(|i| 0.5 + 0.001 * (i % 7) as f32).collect();
/// let config = AnalysisConfig { block_size: 10, ..Default::default() };
/// let analysis = analyze(&samples, 0.4, 64, &config).unwrap();
/// assert_eq!(analysis.analyzed, 200);
/// assert!((analysis.magnetization.value - analysis.mean).abs() < 1e-12);
/// ```
pub fn analyze(
    samples: &[f32],
    beta: f64,
    extent: u32,
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    if config.block_size == 0 {
        return Err(AnalysisError::ZeroBlockSize);
    }
    let usable = samples.len().saturating_sub(config.thermalization);
    let blocks = usable / config.block_size;
    if blocks < MIN_BLOCKS {
        return Err(AnalysisError::TooFewBlocks {
            blocks,
            min: MIN_BLOCKS,
        });
    }

    let count = blocks * config.block_size;
    let values: Vec<f64> = samples[config.thermalization..config.thermalization + count]
        .iter()
        .map(|&v| f64::from(v))
        .collect();

    let sum: f64 = values.iter().sum();
    let sum_sq: f64 = values.iter().map(|v| v * v).sum();
    let mean = sum / count as f64;
    let variance = sum_sq / count as f64 - mean * mean;

    // Leave-one-block-out statistics, built by subtracting each block
    // from the precomputed totals.
    let retained = (count - config.block_size) as f64;
    let n = blocks as f64;
    let mut pseudo_mean = Vec::with_capacity(blocks);
    let mut pseudo_var = Vec::with_capacity(blocks);
    for block in values.chunks_exact(config.block_size) {
        let block_sum: f64 = block.iter().sum();
        let block_sum_sq: f64 = block.iter().map(|v| v * v).sum();
        let loo_mean = (sum - block_sum) / retained;
        let loo_var = (sum_sq - block_sum_sq) / retained - loo_mean * loo_mean;
        pseudo_mean.push(n * mean - (n - 1.0) * loo_mean);
        pseudo_var.push(n * variance - (n - 1.0) * loo_var);
    }

    let magnetization = estimate(&pseudo_mean);
    let mut susceptibility = estimate(&pseudo_var);
    let scale = f64::from(extent) * f64::from(extent) * beta;
    susceptibility.value *= scale;
    susceptibility.error *= scale;

    Ok(Analysis {
        analyzed: count,
        mean,
        variance,
        magnetization,
        susceptibility,
    })
}

/// Mean and standard error of a set of pseudo-values.
fn estimate(pseudo: &[f64]) -> Estimate {
    let n = pseudo.len() as f64;
    let mean = pseudo.iter().sum::<f64>() / n;
    let var = (pseudo.iter().map(|v| v * v).sum::<f64>() / n - mean * mean) / (n - 1.0);
    Estimate {
        value: mean,
        // Rounding can push a zero variance a hair negative.
        error: var.max(0.0).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn defaults(block_size: usize) -> AnalysisConfig {
        AnalysisConfig {
            block_size,
            thermalization: 0,
        }
    }

    #[test]
    fn constant_series_has_zero_error() {
        let samples = vec![0.7f32; 100];
        let analysis = analyze(&samples, 0.5, 16, &defaults(10)).unwrap();
        assert!((analysis.mean - 0.7).abs() < 1e-6);
        assert!((analysis.magnetization.value - 0.7).abs() < 1e-6);
        assert!(analysis.magnetization.error < 1e-9);
        assert!(analysis.susceptibility.value.abs() < 1e-6);
        assert!(analysis.susceptibility.error < 1e-6);
    }

    #[test]
    fn jackknife_mean_matches_plain_mean() {
        // The mean is a linear statistic, so resampling reproduces it
        // exactly.
        let samples: Vec<f32> = (0..80).map(|i| (i % 13) as f32 / 13.0).collect();
        let analysis = analyze(&samples, 1.0, 8, &defaults(8)).unwrap();
        assert!((analysis.magnetization.value - analysis.mean).abs() < 1e-12);
    }

    #[test]
    fn alternating_series_susceptibility_is_exact() {
        // Blocks of (0, 1) are all identical, so every leave-one-out
        // statistic equals the full one: variance 1/4, zero error, and
        // the susceptibility is just the volume-beta scaling.
        let samples: Vec<f32> = (0..40).map(|i| (i % 2) as f32).collect();
        let beta = 0.4;
        let extent = 10u32;
        let analysis = analyze(&samples, beta, extent, &defaults(2)).unwrap();
        let expected = 0.25 * f64::from(extent * extent) * beta;
        assert!((analysis.variance - 0.25).abs() < 1e-9);
        assert!((analysis.susceptibility.value - expected).abs() < 1e-6);
        assert!(analysis.susceptibility.error < 1e-6);
    }

    #[test]
    fn thermalization_discards_the_front() {
        let mut samples = vec![100.0f32; 25];
        samples.extend(std::iter::repeat(0.5f32).take(80));
        let config = AnalysisConfig {
            block_size: 10,
            thermalization: 25,
        };
        let analysis = analyze(&samples, 0.5, 16, &config).unwrap();
        assert_eq!(analysis.analyzed, 80);
        assert!((analysis.mean - 0.5).abs() < 1e-6);
    }

    #[test]
    fn partial_trailing_block_is_dropped() {
        let samples = vec![0.3f32; 47];
        let analysis = analyze(&samples, 0.5, 16, &defaults(10)).unwrap();
        assert_eq!(analysis.analyzed, 40);
    }

    #[test]
    fn too_few_blocks_rejected() {
        let samples = vec![0.5f32; 39];
        assert_eq!(
            analyze(&samples, 0.5, 16, &defaults(10)),
            Err(AnalysisError::TooFewBlocks { blocks: 3, min: 4 })
        );
        // Thermalization eating the series counts too.
        let config = AnalysisConfig {
            block_size: 10,
            thermalization: 1000,
        };
        assert!(matches!(
            analyze(&vec![0.5f32; 100], 0.5, 16, &config),
            Err(AnalysisError::TooFewBlocks { blocks: 0, .. })
        ));
    }

    #[test]
    fn zero_block_size_rejected() {
        assert_eq!(
            analyze(&[0.5; 100], 0.5, 16, &defaults(0)),
            Err(AnalysisError::ZeroBlockSize)
        );
    }

    #[test]
    fn error_bar_tracks_the_sampling_error() {
        // Independent uniform samples: the error of the mean should be
        // close to sqrt(1/12 / n).
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let n = 4000;
        let samples: Vec<f32> = (0..n).map(|_| rng.gen::<f32>()).collect();
        let analysis = analyze(&samples, 0.5, 16, &defaults(20)).unwrap();
        let expected = (1.0 / 12.0 / n as f64).sqrt();
        let ratio = analysis.magnetization.error / expected;
        assert!(
            (0.6..1.6).contains(&ratio),
            "error bar off by factor {ratio}"
        );
    }
}
