//! The measurement run loop: resume, sweep, sample, checkpoint.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glauber_core::BitSource;
use glauber_lattice::Lattice;

use crate::cancel::CancelToken;
use crate::config::{ConfigError, RunConfig};
use crate::error::RunError;
use crate::paths::{checkpoint_path, sample_path};
use crate::samples::SampleWriter;
use crate::sweep::SweepEngine;

/// Rounded-down β of the ordering transition, `ln(1 + √2) / 2 ≈ 0.4407`.
///
/// Cold starts below it begin from random spins and above it from the
/// aligned configuration, so the start is near the equilibrium phase
/// either way and thermalization stays short.
pub const ORDERING_THRESHOLD: f64 = 0.44;

/// What a completed (or cancelled) run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Samples recorded by this run.
    pub measured: u64,
    /// Samples already in the file when the run started.
    pub already_recorded: u64,
    /// Whether the lattice was restored from a checkpoint.
    pub resumed: bool,
    /// Whether the run stopped early on a cancellation request.
    pub cancelled: bool,
}

/// Execute one simulation run.
///
/// Restores the lattice from the per-parameter checkpoint when a valid
/// one exists, otherwise starts cold. Records samples spaced by
/// `sweeps_per_measurement` full sweeps until the sample file holds
/// `measurements` of them in total, so a resumed run only works off the
/// shortfall. The cancellation token is polled between measurements; a
/// cancelled run keeps everything recorded so far and still
/// checkpoints.
///
/// # Errors
///
/// Fails on invalid configuration, sample-file I/O, or a failed
/// checkpoint write. An unreadable existing checkpoint is not an error;
/// it is logged and the run starts cold.
pub fn run(config: &RunConfig, cancel: &CancelToken) -> Result<RunReport, RunError> {
    config.validate()?;
    let beta = config.acceptance.beta();
    let mut src = match config.seed {
        Some(seed) => BitSource::from_seed(seed),
        None => BitSource::from_entropy(),
    };

    let checkpoint = checkpoint_path(&config.root, config.extent, &config.acceptance);
    let (mut lattice, resumed) = match load_checkpoint(&checkpoint, config.extent) {
        Some(lattice) => {
            tracing::info!(path = %checkpoint.display(), "resumed from checkpoint");
            (lattice, true)
        }
        None => {
            let mut lattice = Lattice::new(config.extent).map_err(ConfigError::from)?;
            if beta < ORDERING_THRESHOLD {
                lattice.randomize(&mut src);
            }
            (lattice, false)
        }
    };

    let mut engine = SweepEngine::new(&config.acceptance, src);
    let sample_file = sample_path(&config.root, config.extent, &config.acceptance);
    let (mut samples, already_recorded) = SampleWriter::append(&sample_file, beta)?;

    tracing::info!(
        extent = config.extent,
        beta,
        signature = %config.acceptance.signature(),
        measurements = config.measurements,
        resumed,
        already_recorded,
        "starting run"
    );

    let mut measured = 0u64;
    let mut cancelled = false;
    while already_recorded + measured < config.measurements {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        for _ in 0..config.sweeps_per_measurement {
            engine.sweep(&mut lattice);
        }
        samples.push(lattice.magnetization())?;
        measured += 1;
    }

    if let Some(parent) = checkpoint.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(&checkpoint)?);
    lattice.save(&mut out)?;
    out.flush()?;

    if cancelled {
        tracing::info!(measured, "run cancelled, state checkpointed");
    } else {
        tracing::info!(measured, "run complete");
    }
    Ok(RunReport {
        measured,
        already_recorded,
        resumed,
        cancelled,
    })
}

/// Try to restore a lattice; any failure means a cold start.
fn load_checkpoint(path: &Path, extent: u32) -> Option<Lattice> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "checkpoint unreadable, starting cold");
            return None;
        }
    };
    match Lattice::load(&mut file, extent) {
        Ok(lattice) => Some(lattice),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "checkpoint rejected, starting cold");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_sits_just_below_the_exact_transition() {
        let exact = 0.5 * (1.0 + 2f64.sqrt()).ln();
        assert!(ORDERING_THRESHOLD < exact);
        assert!(exact - ORDERING_THRESHOLD < 0.001);
    }
}
