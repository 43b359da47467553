//! Ensemble generation: many independent paths under one parameter set
//!
//! Each path is a stateless unit of work with a private rng seeded from the
//! run's base seed, so there is no shared mutable state during generation.
//! Work is distributed either one task per path or in contiguous batches
//! across a fixed number of workers; both yield the same ensemble semantics.
//! With the `parallel` feature disabled, both strategies degrade to plain
//! sequential loops.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::available_parallelism;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::generate::generate_path;
use crate::model::{Ensemble, Path, ProjectionOutcome, RunStats, SimulationParameters};
use crate::summary::build_summary;

/// How path generation is distributed across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// One independent task per path
    PerPath,
    /// Partition paths evenly into contiguous batches, each generated
    /// sequentially by one worker
    Batched { batches: usize },
}

impl ExecutionStrategy {
    /// Batched execution with one batch per available CPU.
    #[must_use]
    pub fn batched_for_cpus() -> Self {
        ExecutionStrategy::Batched {
            batches: available_parallelism().map(|n| n.get()).unwrap_or(4),
        }
    }
}

/// How many paths to run and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub path_count: usize,
    pub strategy: ExecutionStrategy,
    /// Base seed for the run; None draws one from thread entropy
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            path_count: 1_000,
            strategy: ExecutionStrategy::batched_for_cpus(),
            seed: None,
        }
    }
}

/// Progress reporting and cancellation handle shared with the caller.
///
/// The runner bumps the completion counter as paths finish and checks the
/// cancel flag between units of work; a set flag aborts the whole run with
/// [`SimulationError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct RunProgress {
    completed: Arc<AtomicUsize>,
    cancel: Arc<AtomicBool>,
}

impl RunProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Share pre-existing atomics, e.g. ones a UI thread already polls.
    #[must_use]
    pub fn from_atomics(completed: Arc<AtomicUsize>, cancel: Arc<AtomicBool>) -> Self {
        Self { completed, cancel }
    }

    /// Paths completed so far
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn record(&self, paths: usize) {
        self.completed.fetch_add(paths, Ordering::SeqCst);
    }
}

/// Run `run.path_count` independent paths under `params`.
pub fn run_ensemble(
    params: &SimulationParameters,
    run: &RunConfig,
    progress: &RunProgress,
) -> Result<Ensemble> {
    let base_seed = resolve_seed(run);
    run_with_seed(params, run, base_seed, progress)
}

/// Run the full projection: generate the ensemble, then build the yearly
/// summary over it. This is the engine's whole control flow in one call.
pub fn run_projection(
    params: &SimulationParameters,
    run: &RunConfig,
    year_count: usize,
    progress: &RunProgress,
) -> Result<ProjectionOutcome> {
    let base_seed = resolve_seed(run);
    let ensemble = run_with_seed(params, run, base_seed, progress)?;
    let rows = build_summary(&ensemble, year_count, params)?;
    let stats = RunStats {
        path_count: ensemble.len(),
        step_count: ensemble.step_count(),
        base_seed,
    };
    Ok(ProjectionOutcome::new(ensemble, rows, stats))
}

fn resolve_seed(run: &RunConfig) -> u64 {
    run.seed.unwrap_or_else(|| rand::rng().next_u64())
}

fn run_with_seed(
    params: &SimulationParameters,
    run: &RunConfig,
    base_seed: u64,
    progress: &RunProgress,
) -> Result<Ensemble> {
    // Fail fast, before any worker is dispatched
    params.validate()?;
    if run.path_count == 0 {
        return Err(SimulationError::InvalidParameters {
            parameter: "path_count",
            value: 0.0,
            constraint: "must be positive",
        });
    }

    let paths = match run.strategy {
        ExecutionStrategy::PerPath => {
            generate_per_path(params, run.path_count, base_seed, progress)?
        }
        ExecutionStrategy::Batched { batches } => {
            generate_batched(params, run.path_count, batches.max(1), base_seed, progress)?
        }
    };
    Ok(Ensemble::from_paths(paths))
}

fn generate_per_path(
    params: &SimulationParameters,
    path_count: usize,
    base_seed: u64,
    progress: &RunProgress,
) -> Result<Vec<Path>> {
    let one = |i: usize| -> Result<Path> {
        if progress.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }
        let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i as u64));
        let path = generate_path(params, &mut rng)?;
        progress.record(1);
        Ok(path)
    };

    #[cfg(feature = "parallel")]
    let paths = (0..path_count).into_par_iter().map(one).collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let paths = (0..path_count).map(one).collect::<Result<Vec<_>>>()?;

    Ok(paths)
}

fn generate_batched(
    params: &SimulationParameters,
    path_count: usize,
    batches: usize,
    base_seed: u64,
    progress: &RunProgress,
) -> Result<Vec<Path>> {
    let batch_size = path_count.div_ceil(batches);
    let num_batches = path_count.div_ceil(batch_size);

    let one_batch = |b: usize| -> Result<Vec<Path>> {
        // Each batch derives its per-path seeds from its own seeding rng,
        // keeping every path's draw sequence private
        let mut seed_rng = SmallRng::seed_from_u64(base_seed.wrapping_add(b as u64));
        let start = b * batch_size;
        let end = (start + batch_size).min(path_count);

        let mut batch = Vec::with_capacity(end - start);
        for _ in start..end {
            if progress.is_cancelled() {
                return Err(SimulationError::Cancelled);
            }
            let mut rng = SmallRng::seed_from_u64(seed_rng.next_u64());
            batch.push(generate_path(params, &mut rng)?);
            progress.record(1);
        }
        Ok(batch)
    };

    #[cfg(feature = "parallel")]
    let collected = (0..num_batches)
        .into_par_iter()
        .map(one_batch)
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let collected = (0..num_batches).map(one_batch).collect::<Result<Vec<_>>>()?;

    // Batches concatenate in order; path identity is never interleaved
    Ok(collected.into_iter().flatten().collect())
}
