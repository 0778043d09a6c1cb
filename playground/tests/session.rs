use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use machine_learning::MlErr;
use playground::{DriverConfig, PlaygroundErr, RunConfig, StopReason};

fn xor(hidden: Vec<usize>, batch_size: usize, seed: u64) -> RunConfig {
    RunConfig {
        hidden_layer_sizes: hidden,
        batch_size,
        seed: Some(seed),
        ..Default::default()
    }
}

fn bounded(generations: usize) -> DriverConfig {
    DriverConfig::bounded(NonZeroUsize::new(generations).unwrap())
}

#[test]
fn xor_error_goes_down() {
    let mut session = playground::start(xor(vec![4], 10, 42)).unwrap();
    let first = session.step().unwrap();

    let summary = session.run(&bounded(5000), |_| {}).unwrap();

    assert_eq!(summary.reason, StopReason::MaxGenerations);
    assert_eq!(summary.generations, 5000);
    assert!(summary.error <= first.best_error);
    assert!(first.best_error == 0. || summary.error < first.best_error);
    assert_eq!(session.last_generation().unwrap().index, 5000);
}

#[test]
fn best_error_is_monotonic() {
    let mut session = playground::start(xor(vec![4, 4], 8, 3)).unwrap();
    let mut prev = session.step().unwrap();

    for _ in 0..500 {
        let curr = session.step().unwrap();
        assert!(curr.best_error <= prev.best_error);
        prev = curr;
    }
}

#[test]
fn single_candidate_keeps_its_model() {
    let mut session = playground::start(xor(vec![4], 1, 42)).unwrap();
    session.step().unwrap();
    let first = session.best();

    session.run(&bounded(50), |_| {}).unwrap();

    assert!(Arc::ptr_eq(&first, &session.best()));
}

#[test]
fn no_examples_score_zero() {
    let mut config = xor(vec![4], 5, 42);
    config.examples.clear();
    let mut session = playground::start(config).unwrap();

    let generation = session.step().unwrap();

    assert_eq!(generation.best_index, 0);
    assert_eq!(generation.best_error, 0.);
    assert!(session.diagnostics().unwrap().predictions.is_empty());
}

#[test]
fn reports_until_the_target_is_reached() {
    let mut session = playground::start(xor(vec![4], 10, 42)).unwrap();
    let driver = DriverConfig {
        max_generations: None,
        target_error: Some(f32::MAX),
        report_interval: Duration::ZERO,
    };

    let mut reports = Vec::new();
    let summary = session
        .run(&driver, |report| reports.push(report.generation.index))
        .unwrap();

    assert_eq!(summary.reason, StopReason::TargetReached);
    assert_eq!(summary.generations, 1);
    assert_eq!(reports, [0]);
}

#[test]
fn reports_every_step_without_an_interval() {
    let mut session = playground::start(xor(vec![4], 4, 42)).unwrap();

    let mut reports = Vec::new();
    session
        .run(&bounded(3), |report| {
            assert_eq!(report.diagnostics.predictions.len(), 4);
            reports.push(report.generation.index);
        })
        .unwrap();

    // The last step is only reported once, right before returning.
    assert_eq!(reports, [0, 1, 2]);
}

#[test]
fn examples_are_replaced_between_steps() {
    let mut session = playground::start(xor(vec![4], 4, 42)).unwrap();
    session.step().unwrap();

    session.set_examples(vec![vec![1., 1., 1.]]).unwrap();
    session.step().unwrap();

    assert_eq!(session.dataset().len(), 1);
    assert_eq!(session.recipe().examples, [[1., 1., 1.]]);
}

#[test]
fn malformed_examples_are_rejected() {
    let mut session = playground::start(xor(vec![4], 4, 42)).unwrap();

    let err = session
        .set_examples(vec![vec![1., 1., 1.], vec![0., 1.]])
        .unwrap_err();

    assert!(matches!(
        err,
        PlaygroundErr::Ml(MlErr::ExampleLength { example: 1, .. })
    ));
    assert_eq!(session.dataset().len(), 4);
}

#[test]
fn invalid_configs_never_start() {
    let config = RunConfig {
        batch_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        playground::start(config),
        Err(PlaygroundErr::Ml(MlErr::InvalidBatchSize))
    ));

    let config = RunConfig {
        output_layer_size: 0,
        ..Default::default()
    };
    assert!(playground::start(config).is_err());
}

#[test]
fn recipe_round_trips_through_a_file() {
    let mut session = playground::start(xor(vec![3], 6, 11)).unwrap();
    session
        .set_examples(vec![vec![0., 0., 1.], vec![1., 1., 1.]])
        .unwrap();

    let path = std::env::temp_dir().join(format!("playground-recipe-{}.json", std::process::id()));
    session.recipe().save(&path).unwrap();
    let loaded = RunConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, session.recipe());

    // Same seed and same examples make the same run.
    let mut a = playground::start(loaded.clone()).unwrap();
    let mut b = playground::start(loaded).unwrap();
    for _ in 0..20 {
        assert_eq!(a.step().unwrap(), b.step().unwrap());
    }
    assert_eq!(*a.best(), *b.best());
}
