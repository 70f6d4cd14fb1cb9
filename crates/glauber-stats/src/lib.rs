//! Jackknife error analysis for magnetization sample series.
//!
//! Pure math: reading sample files and walking the data tree belong to
//! the callers. See [`analyze`] for the resampling scheme.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod jackknife;

pub use error::AnalysisError;
pub use jackknife::{
    analyze, Analysis, AnalysisConfig, Estimate, DEFAULT_BLOCK_SIZE, MIN_BLOCKS,
};
