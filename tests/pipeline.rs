//! End-to-end checks of the generate + combine pipeline.

use approx::assert_relative_eq;
use proptest::prelude::*;
use vec_combine::{
    combine, combine_lanes, combine_parallel, compare_strategies, Execution, RunConfig,
    RunController, SampleStats, Seed, Sequences, RANGE_MAX, SCALE, VALUE_MAX,
};

fn run(config: RunConfig) -> Sequences {
    let (_, seqs) = RunController::new(config)
        .execute(&mut std::io::sink())
        .unwrap();
    seqs
}

#[test]
fn test_lengths_and_formula_hold_after_run() {
    let seqs = run(RunConfig::with_len(10_000).seed(Seed::Fixed(42)));
    assert_eq!(seqs.a().len(), 10_000);
    assert_eq!(seqs.b().len(), 10_000);
    assert_eq!(seqs.results().len(), 10_000);

    for i in 0..seqs.len() {
        let (a, b) = (seqs.a()[i], seqs.b()[i]);
        assert!((0.0..=VALUE_MAX).contains(&a));
        assert!((0.0..=VALUE_MAX).contains(&b));
        assert_eq!(seqs.results()[i], (a + b) * b);
    }
}

#[test]
fn test_three_element_scenario() {
    let mut seqs = Sequences::from_inputs(vec![0.2, 2.0, 0.0], vec![0.4, 0.0, 30000.0]).unwrap();
    let (a, b, out) = seqs.split_for_combine();
    combine(a, b, out).unwrap();

    let expected = [0.24, 0.0, 900_000_000.0];
    for (got, want) in seqs.results().iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-9);
    }
}

#[test]
fn test_zero_length_run_completes() {
    let (report, seqs) = RunController::new(RunConfig::with_len(0).seed(Seed::Fixed(1)))
        .execute(&mut std::io::sink())
        .unwrap();
    assert_eq!(report.len, 0);
    assert!(seqs.is_empty());
    assert!(seqs.a().is_empty() && seqs.b().is_empty() && seqs.results().is_empty());
}

#[test]
fn test_entropy_seed_runs() {
    let (report, seqs) = RunController::new(RunConfig::with_len(64))
        .execute(&mut std::io::sink())
        .unwrap();
    assert_eq!(seqs.len(), 64);
    // Re-running with the reported seed reproduces the inputs.
    let again = run(RunConfig::with_len(64).seed(Seed::Fixed(report.seed)));
    assert_eq!(seqs, again);
}

#[test]
fn test_combine_is_idempotent() {
    let mut seqs = run(RunConfig::with_len(4_096).seed(Seed::Fixed(3)));
    let first = seqs.results().to_vec();
    let (a, b, out) = seqs.split_for_combine();
    combine(a, b, out).unwrap();
    assert_eq!(seqs.results(), first.as_slice());
}

#[test]
fn test_parallel_run_matches_formula() {
    let config = RunConfig::with_len(100_003)
        .seed(Seed::Fixed(8))
        .execution(Execution::parallel());
    let seqs = run(config);
    let mut expected = vec![0.0; seqs.len()];
    combine(seqs.a(), seqs.b(), &mut expected).unwrap();
    assert_eq!(seqs.results(), expected.as_slice());
    assert!(compare_strategies(seqs.a(), seqs.b(), 4_096).is_ok());
}

#[test]
fn test_uniform_mean_over_a_million_draws() {
    let seqs = run(RunConfig::with_len(1_000_000).seed(Seed::Fixed(2024)));
    let scaled: Vec<f64> = seqs.a().iter().map(|v| v / SCALE).collect();
    let stats = SampleStats::of(&scaled).unwrap();

    // Std error of the mean is ~43 here; allow a generous margin.
    assert!((stats.mean - 75_000.0).abs() < 1_000.0, "mean = {}", stats.mean);
    assert!(stats.min >= 0.0);
    assert!(stats.max <= RANGE_MAX as f64 + 1e-6);
    // Both ends of the range should be close to covered.
    assert!(stats.min < 1_000.0);
    assert!(stats.max > RANGE_MAX as f64 - 1_000.0);
}

proptest! {
    #[test]
    fn prop_strategies_agree(
        pairs in prop::collection::vec((0u32..=RANGE_MAX, 0u32..=RANGE_MAX), 0..300),
        chunk_len in 1usize..64,
    ) {
        let a: Vec<f64> = pairs.iter().map(|&(x, _)| f64::from(x) * SCALE).collect();
        let b: Vec<f64> = pairs.iter().map(|&(_, y)| f64::from(y) * SCALE).collect();
        let mut plain = vec![0.0; a.len()];
        let mut lanes = vec![0.0; a.len()];
        let mut par = vec![0.0; a.len()];
        combine(&a, &b, &mut plain).unwrap();
        combine_lanes(&a, &b, &mut lanes).unwrap();
        combine_parallel(&a, &b, &mut par, chunk_len).unwrap();
        prop_assert_eq!(&plain, &lanes);
        prop_assert_eq!(&plain, &par);
        for i in 0..a.len() {
            prop_assert_eq!(plain[i], (a[i] + b[i]) * b[i]);
        }
    }

    #[test]
    fn prop_generated_values_are_quantized(seed in any::<u64>(), len in 0usize..512) {
        let seqs = run(RunConfig::with_len(len).seed(Seed::Fixed(seed)));
        for &v in seqs.a().iter().chain(seqs.b()) {
            let k = (v / SCALE).round();
            prop_assert!((0.0..=RANGE_MAX as f64).contains(&k));
            prop_assert_eq!(k * SCALE, v);
        }
    }
}
