//! Heat-bath sweep engine and run orchestration.
//!
//! The sweep kernel ([`SweepEngine`]) updates one checkerboard
//! sublattice per half-sweep with word-wide Bernoulli masks. Around it,
//! [`run`] drives the production loop: restore from a checkpoint when
//! one exists, sweep, append magnetization samples, and checkpoint the
//! final state so the next invocation continues the same Markov chain.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod cancel;
mod config;
mod error;
mod paths;
mod run;
mod samples;
mod sweep;

pub use cancel::CancelToken;
pub use config::{ConfigError, RunConfig, DEFAULT_SWEEPS_PER_MEASUREMENT};
pub use error::RunError;
pub use paths::{checkpoint_path, sample_path};
pub use run::{run, RunReport, ORDERING_THRESHOLD};
pub use samples::{read_samples, SampleWriter};
pub use sweep::SweepEngine;
