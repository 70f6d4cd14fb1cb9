//! The `glauber` binary: run simulations and analyze their samples.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glauber_core::Acceptance;
use glauber_engine::{read_samples, run, CancelToken, RunConfig, DEFAULT_SWEEPS_PER_MEASUREMENT};
use glauber_stats::{analyze, AnalysisConfig, DEFAULT_BLOCK_SIZE};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "glauber",
    version,
    about = "Bit-parallel Glauber dynamics for the two-dimensional Ising model"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulation, appending samples and checkpointing at exit
    Run(RunArgs),
    /// Jackknife-analyze the recorded samples for one lattice size
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(
    clap::ArgGroup::new("temperature")
        .required(true)
        .args(["beta", "signature"])
))]
struct RunArgs {
    /// Lattice edge length (must be even)
    #[arg(long, short = 'x')]
    extent: u32,

    /// Inverse temperature β
    #[arg(long, short = 'b')]
    beta: Option<f64>,

    /// Acceptance signature instead of β (continues an existing file set)
    #[arg(long)]
    signature: Option<String>,

    /// Number of magnetization samples to record
    #[arg(long, short = 'n')]
    measurements: u64,

    /// Full sweeps between consecutive samples
    #[arg(long, default_value_t = DEFAULT_SWEEPS_PER_MEASUREMENT)]
    sweeps: u32,

    /// Seed for the mask stream (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the data/ and .state/ trees
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Lattice edge length whose samples to analyze
    #[arg(long, short = 'x')]
    extent: u32,

    /// Leading samples to discard per file as thermalization
    #[arg(long, short = 't', default_value_t = 0)]
    thermalization: usize,

    /// Samples per jackknife block
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Directory holding the data/ tree
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Run(args) => cmd_run(args),
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let acceptance = match (args.beta, &args.signature) {
        (Some(beta), None) => {
            Acceptance::from_beta(beta).with_context(|| format!("invalid beta {beta}"))?
        }
        (None, Some(sig)) => Acceptance::from_signature(sig)
            .with_context(|| format!("invalid signature {sig:?}"))?,
        _ => anyhow::bail!("exactly one of --beta and --signature is required"),
    };
    let mut config = RunConfig::new(args.extent, acceptance, args.measurements);
    config.sweeps_per_measurement = args.sweeps;
    config.seed = args.seed;
    config.root = args.root;

    let report = run(&config, &CancelToken::new())?;
    println!(
        "recorded {} samples ({} total on disk){}",
        report.measured,
        report.already_recorded + report.measured,
        if report.resumed {
            ", resumed from checkpoint"
        } else {
            ""
        }
    );
    Ok(())
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let dir = args.root.join("data").join(format!("{:03}", args.extent));
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("no sample directory {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    anyhow::ensure!(!files.is_empty(), "no sample files under {}", dir.display());

    let config = AnalysisConfig {
        block_size: args.block_size,
        thermalization: args.thermalization,
    };
    println!(
        "# jackknife analysis, block size {}, thermalization {}",
        config.block_size, config.thermalization
    );
    println!(
        "# {:>9} {:>7} {:>9} {:>9} {:>10} {:>9} {:>9} {:>11} {:>9}",
        "samples", "extent", "beta", "mean", "variance", "mag", "err", "sus", "err"
    );
    for path in files {
        let (beta, samples) = match read_samples(&path) {
            Ok(read) => read,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable sample file, skipping");
                continue;
            }
        };
        match analyze(&samples, f64::from(beta), args.extent, &config) {
            Ok(a) => println!(
                "{:>11} {:>7} {:>9.6} {:>9.6} {:>10.6} {:>9.6} {:>9.6} {:>11.4} {:>9.4}",
                a.analyzed,
                args.extent,
                beta,
                a.mean,
                a.variance,
                a.magnetization.value,
                a.magnetization.error,
                a.susceptibility.value,
                a.susceptibility.error
            ),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping file");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_args_parse() {
        let cli = Cli::parse_from([
            "glauber", "run", "-x", "64", "-b", "0.43", "-n", "1000", "--seed", "7",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.extent, 64);
                assert_eq!(args.beta, Some(0.43));
                assert_eq!(args.signature, None);
                assert_eq!(args.measurements, 1000);
                assert_eq!(args.sweeps, DEFAULT_SWEEPS_PER_MEASUREMENT);
                assert_eq!(args.seed, Some(7));
            }
            other => panic!("parsed the wrong command: {other:?}"),
        }
    }

    #[test]
    fn beta_and_signature_are_exclusive() {
        let conflict = Cli::try_parse_from([
            "glauber",
            "run",
            "-x",
            "8",
            "-n",
            "1",
            "-b",
            "0.4",
            "--signature",
            "01",
        ]);
        assert!(conflict.is_err());
        let neither = Cli::try_parse_from(["glauber", "run", "-x", "8", "-n", "1"]);
        assert!(neither.is_err());
    }

    #[test]
    fn run_then_analyze_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let run_args = RunArgs {
            extent: 8,
            beta: Some(0.6),
            signature: None,
            measurements: 80,
            sweeps: 1,
            seed: Some(3),
            root: dir.path().to_path_buf(),
        };
        cmd_run(run_args).unwrap();

        let analyze_args = AnalyzeArgs {
            extent: 8,
            thermalization: 0,
            block_size: DEFAULT_BLOCK_SIZE,
            root: dir.path().to_path_buf(),
        };
        cmd_analyze(analyze_args).unwrap();
    }

    #[test]
    fn analyze_without_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            extent: 8,
            thermalization: 0,
            block_size: DEFAULT_BLOCK_SIZE,
            root: dir.path().to_path_buf(),
        };
        assert!(cmd_analyze(args).is_err());
    }

    #[test]
    fn analyze_args_parse() {
        let cli = Cli::parse_from(["glauber", "analyze", "-x", "32", "-t", "50"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.extent, 32);
                assert_eq!(args.thermalization, 50);
                assert_eq!(args.block_size, DEFAULT_BLOCK_SIZE);
            }
            other => panic!("parsed the wrong command: {other:?}"),
        }
    }
}
