//! On-disk layout for samples and checkpoints.
//!
//! Both trees key files by lattice extent and acceptance signature, so a
//! run resumed with the same parameters lands on the same files:
//!
//! ```text
//! <root>/data/064/011000101110110001  sample file (extent 64)
//! <root>/.state/64/011000101110110001 checkpoint
//! ```
//!
//! The sample directory zero-pads the extent to three digits so shell
//! globs list sizes in order.

use std::path::{Path, PathBuf};

use glauber_core::Acceptance;

/// Path of the sample file for one (extent, temperature) pair.
pub fn sample_path(root: &Path, extent: u32, acceptance: &Acceptance) -> PathBuf {
    root.join("data")
        .join(format!("{extent:03}"))
        .join(acceptance.signature())
}

/// Path of the checkpoint for one (extent, temperature) pair.
pub fn checkpoint_path(root: &Path, extent: u32, acceptance: &Acceptance) -> PathBuf {
    root.join(".state")
        .join(extent.to_string())
        .join(acceptance.signature())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_keyed_by_extent_and_signature() {
        let acceptance = Acceptance::from_probability(0.5).unwrap();
        let root = Path::new("/var/run/glauber");
        assert_eq!(
            sample_path(root, 64, &acceptance),
            Path::new("/var/run/glauber/data/064/01")
        );
        assert_eq!(
            checkpoint_path(root, 64, &acceptance),
            Path::new("/var/run/glauber/.state/64/01")
        );
    }

    #[test]
    fn extents_pad_to_three_digits() {
        let acceptance = Acceptance::from_probability(1.0).unwrap();
        let root = Path::new(".");
        assert!(sample_path(root, 8, &acceptance).ends_with("data/008/1"));
        assert!(sample_path(root, 1024, &acceptance).ends_with("data/1024/1"));
    }
}
