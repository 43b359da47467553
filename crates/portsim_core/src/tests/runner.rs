//! Tests for ensemble generation: strategies, progress, cancellation

use crate::error::SimulationError;
use crate::model::{ModelKind, SimulationParameters};
use crate::simulation::{ExecutionStrategy, RunConfig, RunProgress, run_ensemble, run_projection};

fn small_params() -> SimulationParameters {
    SimulationParameters {
        step_count: 60,
        ..SimulationParameters::default()
    }
}

#[test]
fn test_cardinality_and_length_under_both_strategies() {
    for strategy in [
        ExecutionStrategy::PerPath,
        ExecutionStrategy::Batched { batches: 3 },
    ] {
        let run = RunConfig {
            path_count: 5,
            strategy,
            seed: Some(11),
        };
        let ensemble = run_ensemble(&small_params(), &run, &RunProgress::new()).unwrap();
        assert_eq!(ensemble.len(), 5, "wrong cardinality under {strategy:?}");
        assert_eq!(ensemble.step_count(), 60);
        assert!(ensemble.paths().iter().all(|p| p.len() == 60));
    }
}

#[test]
fn test_more_batches_than_paths() {
    let run = RunConfig {
        path_count: 2,
        strategy: ExecutionStrategy::Batched { batches: 8 },
        seed: Some(1),
    };
    let ensemble = run_ensemble(&small_params(), &run, &RunProgress::new()).unwrap();
    assert_eq!(ensemble.len(), 2);
}

#[test]
fn test_fixed_seed_reproduces_ensemble() {
    for strategy in [
        ExecutionStrategy::PerPath,
        ExecutionStrategy::Batched { batches: 4 },
    ] {
        let run = RunConfig {
            path_count: 20,
            strategy,
            seed: Some(123),
        };
        let first = run_ensemble(&small_params(), &run, &RunProgress::new()).unwrap();
        let second = run_ensemble(&small_params(), &run, &RunProgress::new()).unwrap();
        assert_eq!(first.paths(), second.paths(), "seeded run diverged under {strategy:?}");
    }
}

#[test]
fn test_paths_are_independent_draws() {
    let run = RunConfig {
        path_count: 10,
        strategy: ExecutionStrategy::Batched { batches: 2 },
        seed: Some(7),
    };
    let ensemble = run_ensemble(&small_params(), &run, &RunProgress::new()).unwrap();
    let finals: Vec<f64> = ensemble.paths().iter().map(|p| p[59]).collect();
    // Distinct random streams should not collide
    for i in 1..finals.len() {
        assert_ne!(finals[0], finals[i], "paths 0 and {i} are identical");
    }
}

#[test]
fn test_progress_counts_every_path() {
    let progress = RunProgress::new();
    let run = RunConfig {
        path_count: 17,
        strategy: ExecutionStrategy::Batched { batches: 4 },
        seed: Some(2),
    };
    run_ensemble(&small_params(), &run, &progress).unwrap();
    assert_eq!(progress.completed(), 17);
}

#[test]
fn test_cancelled_flag_aborts_run() {
    let progress = RunProgress::new();
    progress.cancel();
    let run = RunConfig {
        path_count: 100,
        strategy: ExecutionStrategy::Batched { batches: 4 },
        seed: Some(3),
    };
    let err = run_ensemble(&small_params(), &run, &progress).unwrap_err();
    assert_eq!(err, SimulationError::Cancelled);
}

#[test]
fn test_invalid_parameters_fail_the_whole_run() {
    let params = SimulationParameters {
        volatility: -0.5,
        ..small_params()
    };
    let run = RunConfig {
        path_count: 10,
        strategy: ExecutionStrategy::PerPath,
        seed: Some(4),
    };
    let err = run_ensemble(&params, &run, &RunProgress::new()).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidParameters { parameter: "volatility", .. }));
}

#[test]
fn test_zero_paths_rejected() {
    let run = RunConfig {
        path_count: 0,
        strategy: ExecutionStrategy::PerPath,
        seed: Some(5),
    };
    let err = run_ensemble(&small_params(), &run, &RunProgress::new()).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidParameters { parameter: "path_count", .. }));
}

#[test]
fn test_run_projection_end_to_end() {
    let params = SimulationParameters {
        model: ModelKind::Heston,
        deposit_amount: 200.0,
        ..SimulationParameters::default()
    }
    .with_years(3);

    let run = RunConfig {
        path_count: 50,
        strategy: ExecutionStrategy::Batched { batches: 2 },
        seed: Some(9),
    };
    let outcome = run_projection(&params, &run, 3, &RunProgress::new()).unwrap();

    assert_eq!(outcome.ensemble.len(), 50);
    assert_eq!(outcome.rows.len(), 3);
    assert_eq!(outcome.stats.base_seed, 9);
    assert_eq!(outcome.stats.path_count, 50);

    let last = outcome.rows.last().unwrap();
    assert_eq!(outcome.headline.pessimistic, last.p10);
    assert_eq!(outcome.headline.average, last.p50);
    assert_eq!(outcome.headline.optimistic, last.p90);
}
