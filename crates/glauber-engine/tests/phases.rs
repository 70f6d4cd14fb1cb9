//! Physical sanity: the two phases of the model show up in the samples.

use glauber_core::Acceptance;
use glauber_engine::{read_samples, run, sample_path, CancelToken, RunConfig};

fn mean(samples: &[f32]) -> f64 {
    samples.iter().map(|&m| f64::from(m)).sum::<f64>() / samples.len() as f64
}

#[test]
fn ordered_phase_stays_magnetized() {
    // Well below the transition temperature the aligned cold start is
    // close to equilibrium and the magnetization stays near 1.
    let dir = tempfile::tempdir().unwrap();
    let acceptance = Acceptance::from_beta(1.0).unwrap();
    let mut config = RunConfig::new(8, acceptance, 20);
    config.sweeps_per_measurement = 4;
    config.seed = Some(42);
    config.root = dir.path().to_path_buf();

    run(&config, &CancelToken::new()).unwrap();
    let (_, samples) = read_samples(&sample_path(dir.path(), 8, &config.acceptance)).unwrap();
    assert_eq!(samples.len(), 20);
    assert!(
        mean(&samples) > 0.9,
        "ordered-phase magnetization {} too low",
        mean(&samples)
    );
}

#[test]
fn hot_phase_stays_unmagnetized() {
    let dir = tempfile::tempdir().unwrap();
    let acceptance = Acceptance::from_beta(0.1).unwrap();
    let mut config = RunConfig::new(32, acceptance, 20);
    config.sweeps_per_measurement = 4;
    config.seed = Some(7);
    config.root = dir.path().to_path_buf();

    run(&config, &CancelToken::new()).unwrap();
    let (_, samples) = read_samples(&sample_path(dir.path(), 32, &config.acceptance)).unwrap();
    assert!(
        mean(&samples) < 0.2,
        "hot-phase magnetization {} too high",
        mean(&samples)
    );
}
