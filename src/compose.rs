//! Dataset composition.
//!
//! Assembles every match record into a labelled example, skipping the
//! matches that cannot be assembled, then runs the dataset-level passes
//! (standardization, balancing) the config asks for.
//!
//! When `config.threads > 1`, matches are assembled concurrently using
//! rayon. Output order always follows input order.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ComposeConfig;
use crate::dataset::{
    balance, standardize, AssembledMatch, BalanceError, Dataset, DatasetError, MatchError,
    MatchVectorAssembler, ScalingMode, Standardizer, ALL_LABELS,
};
use crate::grid::GridEvent;
use crate::record::MatchRecord;

/// Errors that abort a whole composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A match left out of the dataset, with enough context to find it again.
#[derive(Debug, PartialEq)]
pub struct SkippedMatch {
    /// Position of the record in the input.
    pub index: usize,
    pub description: String,
    pub error: MatchError,
}

/// Counters collected while composing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Match records handed in.
    pub matches: usize,
    /// Matches that made it into the dataset (before balancing).
    pub assembled: usize,
    /// Players missing from their team grid.
    pub dropped_players: usize,
    /// Players given the team average.
    pub imputed_players: usize,
    /// Fallback relocations.
    pub relocated_players: usize,
    /// Per-class counts of the final dataset.
    pub class_counts: [usize; 3],
}

/// Result of [`compose`].
#[derive(Debug)]
pub struct Composition {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedMatch>,
    pub stats: ComposeStats,
    /// Fitted scaler, present when standardization ran.
    pub standardizer: Option<Standardizer>,
}

/// Turns match records into a dataset according to `config`.
pub fn compose(records: &[MatchRecord], config: &ComposeConfig) -> Result<Composition, ComposeError> {
    let assembler = config.assembler();
    let results = if config.threads > 1 {
        assemble_parallel(records, &assembler, config)?
    } else {
        assemble_sequential(records, &assembler, config.scaling)
    };

    let mut dataset = Dataset::new();
    let mut skipped = Vec::new();
    let mut stats = ComposeStats {
        matches: records.len(),
        ..Default::default()
    };

    for (index, (record, result)) in records.iter().zip(results).enumerate() {
        match result {
            Ok(assembled) => {
                tally(&mut stats, &assembled);
                dataset.push(assembled.example)?;
                stats.assembled += 1;
            }
            Err(error) => {
                let description = record.describe();
                warn!(index, %description, %error, "skipping match");
                skipped.push(SkippedMatch {
                    index,
                    description,
                    error,
                });
            }
        }
    }

    let standardizer = if config.scaling.is_dataset_level() {
        Some(standardize(&mut dataset))
    } else {
        None
    };

    if config.balance {
        let mut rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        dataset = balance(dataset, &mut rng)?;
    }

    stats.class_counts = dataset.class_counts();
    info!(
        matches = stats.matches,
        assembled = stats.assembled,
        skipped = skipped.len(),
        dropped_players = stats.dropped_players,
        imputed_players = stats.imputed_players,
        examples = dataset.len(),
        "composition finished"
    );

    Ok(Composition {
        dataset,
        skipped,
        stats,
        standardizer,
    })
}

fn tally(stats: &mut ComposeStats, assembled: &AssembledMatch) {
    for (_, event) in &assembled.events {
        match event {
            GridEvent::Relocated { .. } => stats.relocated_players += 1,
            GridEvent::Imputed { .. } => stats.imputed_players += 1,
            GridEvent::SlotCollisionDropped { .. } | GridEvent::BenchFull { .. } => {
                stats.dropped_players += 1
            }
        }
    }
}

fn assemble_sequential(
    records: &[MatchRecord],
    assembler: &MatchVectorAssembler,
    scaling: ScalingMode,
) -> Vec<Result<AssembledMatch, MatchError>> {
    records
        .iter()
        .map(|record| assembler.assemble(record, scaling))
        .collect()
}

fn assemble_parallel(
    records: &[MatchRecord],
    assembler: &MatchVectorAssembler,
    config: &ComposeConfig,
) -> Result<Vec<Result<AssembledMatch, MatchError>>, ComposeError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let scaling = config.scaling;
    Ok(pool.install(|| {
        records
            .par_iter()
            .map(|record| assembler.assemble(record, scaling))
            .collect()
    }))
}

/// Prints a human-readable summary to stderr.
pub fn print_summary(composition: &Composition) {
    let stats = &composition.stats;
    eprintln!("=== Composition Summary ===");
    eprintln!("Matches: {}", stats.matches);
    eprintln!("Assembled: {}", stats.assembled);
    eprintln!("Skipped: {}", composition.skipped.len());
    for skipped in &composition.skipped {
        eprintln!("  #{} {}: {}", skipped.index, skipped.description, skipped.error);
    }
    eprintln!("Dropped players: {}", stats.dropped_players);
    eprintln!("Imputed players: {}", stats.imputed_players);
    eprintln!("Relocated players: {}", stats.relocated_players);
    if let Some((rows, cols)) = composition.dataset.shape() {
        eprintln!("Example shape: [{}, {}]", rows, cols);
    }
    let total = composition.dataset.len();
    eprintln!("Examples: {}", total);
    for label in ALL_LABELS {
        let n = stats.class_counts[label.index()];
        let pct = 100.0 * n as f64 / total.max(1) as f64;
        eprintln!("  {:>8}: {} ({:.1}%)", label.as_str(), n, pct);
    }
}
