//! Run configuration, validation, and its error type.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use glauber_core::Acceptance;
use glauber_lattice::{Lattice, LatticeError};

/// Default number of full sweeps between recorded measurements.
///
/// Consecutive configurations are strongly correlated; spacing the
/// measurements out keeps the stored samples closer to independent.
pub const DEFAULT_SWEEPS_PER_MEASUREMENT: u32 = 16;

/// Everything a single simulation run needs: geometry, temperature,
/// workload, and where on disk samples and checkpoints live.
///
/// # Examples
///
/// ```
/// use glauber_core::Acceptance;
/// use glauber_engine::RunConfig;
///
/// let acceptance = Acceptance::from_beta(0.43).unwrap();
/// let config = RunConfig::new(64, acceptance, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Lattice edge length. Must be even.
    pub extent: u32,
    /// Temperature, as the quantized single-neighbour flip probability.
    pub acceptance: Acceptance,
    /// Total number of magnetization samples the sample file should
    /// hold. A resumed run records only the shortfall; a file already
    /// at the target records nothing.
    pub measurements: u64,
    /// Full sweeps between consecutive samples.
    pub sweeps_per_measurement: u32,
    /// Seed for the mask stream. `None` seeds from OS entropy, which is
    /// what production runs want; tests pin it for reproducibility.
    pub seed: Option<u64>,
    /// Directory under which the `data/` and `.state/` trees are kept.
    pub root: PathBuf,
}

impl RunConfig {
    /// A config with the default measurement spacing, entropy seeding,
    /// and the current directory as root.
    pub fn new(extent: u32, acceptance: Acceptance, measurements: u64) -> Self {
        Self {
            extent,
            acceptance,
            measurements,
            sweeps_per_measurement: DEFAULT_SWEEPS_PER_MEASUREMENT,
            seed: None,
            root: PathBuf::from("."),
        }
    }

    /// Check the structural invariants before a run starts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid extent, zero
    /// measurements, or zero sweeps per measurement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Lattice::validate_extent(self.extent)?;
        if self.measurements == 0 {
            return Err(ConfigError::NoMeasurements);
        }
        if self.sweeps_per_measurement == 0 {
            return Err(ConfigError::NoSweeps);
        }
        Ok(())
    }
}

/// Errors from [`RunConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The extent cannot form a checkerboard lattice.
    Extent(LatticeError),
    /// A run must record at least one measurement.
    NoMeasurements,
    /// Measurements must be separated by at least one sweep.
    NoSweeps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extent(e) => write!(f, "invalid extent: {e}"),
            Self::NoMeasurements => write!(f, "measurements must be at least 1"),
            Self::NoSweeps => write!(f, "sweeps per measurement must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for ConfigError {
    fn from(e: LatticeError) -> Self {
        Self::Extent(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RunConfig {
        RunConfig::new(32, Acceptance::from_beta(0.4).unwrap(), 10)
    }

    #[test]
    fn defaults_are_valid() {
        let config = base();
        assert_eq!(
            config.sweeps_per_measurement,
            DEFAULT_SWEEPS_PER_MEASUREMENT
        );
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn odd_extent_rejected() {
        let mut config = base();
        config.extent = 33;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Extent(LatticeError::ExtentNotEven { extent: 33 }))
        ));
    }

    #[test]
    fn zero_workload_rejected() {
        let mut config = base();
        config.measurements = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoMeasurements));

        let mut config = base();
        config.sweeps_per_measurement = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoSweeps));
    }
}
