//! Lineup grid dataset composer.
//!
//! Reads one or more JSON files of match records (each an array), turns
//! them into labelled skill matrices, and writes the dataset as JSONL.
//!
//! Usage:
//!   lineup-grid [OPTIONS] <INPUT>...
//!
//! Logs and the summary go to stderr; stdout only carries data when no
//! `--output` is given.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lineup_grid::compose::{self, Composition};
use lineup_grid::config::ComposeConfig;
use lineup_grid::dataset::{write_jsonl, Dataset, ScalingMode};
use lineup_grid::record::load_matches;

#[derive(Parser)]
#[command(name = "lineup-grid")]
#[command(version, about = "Compose lineup records into a labelled skill-matrix dataset", long_about = None)]
struct Cli {
    /// Match record files (JSON arrays), concatenated in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append bench slots for unpositioned players
    #[arg(long, conflicts_with = "no_bench")]
    bench: bool,

    /// Leave unpositioned players out
    #[arg(long)]
    no_bench: bool,

    /// Bench slots per team
    #[arg(long)]
    bench_slots: Option<usize>,

    /// Scaling mode: none, divide_by_100, standardize
    #[arg(long)]
    scaling: Option<ScalingMode>,

    /// Oversample minority outcomes
    #[arg(long)]
    balance: bool,

    /// Worker threads for assembly
    #[arg(long)]
    threads: Option<usize>,

    /// Random seed for balancing, 0 for entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of examples kept for training; the rest go to --validation-output
    #[arg(long, requires = "validation_output")]
    split: Option<f64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Validation output file, used with --split
    #[arg(long)]
    validation_output: Option<PathBuf>,

    /// Only log errors and skip the summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log fallback relocations and other details
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn compose_config(&self) -> Result<ComposeConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ComposeConfig::from_json_file(path)?,
            None => ComposeConfig::default(),
        };
        if self.bench {
            config.include_bench = true;
        }
        if self.no_bench {
            config.include_bench = false;
        }
        if let Some(n) = self.bench_slots {
            config.bench_slots = n;
        }
        if let Some(scaling) = self.scaling {
            config.scaling = scaling;
        }
        if self.balance {
            config.balance = true;
        }
        if let Some(n) = self.threads {
            config.threads = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }

    fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.compose_config()?;

    let mut records = Vec::new();
    for path in &cli.inputs {
        let matches = load_matches(path)?;
        info!(path = %path.display(), matches = matches.len(), "loaded match records");
        records.extend(matches);
    }

    let start = Instant::now();
    let composition = compose::compose(&records, &config)?;
    if !cli.quiet {
        eprintln!(
            "Composed {} matches in {:.2}s",
            records.len(),
            start.elapsed().as_secs_f64()
        );
        compose::print_summary(&composition);
    }

    write_outputs(cli, composition)
}

fn write_outputs(cli: &Cli, composition: Composition) -> Result<(), Box<dyn Error>> {
    let Composition { dataset, .. } = composition;
    let (train, validation) = match cli.split {
        Some(fraction) => {
            let (train, validation) = dataset.split(fraction)?;
            (train, Some(validation))
        }
        None => (dataset, None),
    };

    match &cli.output {
        Some(path) => write_file(path, &train)?,
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_jsonl(&train, &mut writer)?;
        }
    }
    if !cli.quiet {
        if let Some(path) = &cli.output {
            eprintln!("Wrote {} examples to {}", train.len(), path.display());
        }
    }

    if let (Some(validation), Some(path)) = (validation, &cli.validation_output) {
        write_file(path, &validation)?;
        if !cli.quiet {
            eprintln!(
                "Wrote {} validation examples to {}",
                validation.len(),
                path.display()
            );
        }
    }
    Ok(())
}

fn write_file(path: &Path, dataset: &Dataset) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_jsonl(dataset, &mut writer)?;
    writer.flush()
}
