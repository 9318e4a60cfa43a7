use std::ops::ControlFlow;

use optimizer_boosting::pruner::DeterministicPruner;
use optimizer_boosting::{
    Direction, IterationReport, PruneSignal, PruningCallback, Study, TrialProgress, TrialState,
};

use crate::sink::RecordingSink;

fn train_report(iteration: u64) -> IterationReport {
    IterationReport::new(iteration, 0, 1).record(("validation", "binary_error", 1.0, false))
}

fn cv_report(iteration: u64) -> IterationReport {
    IterationReport::new(iteration, 0, 1).record(("cv_agg", "binary_error", 1.0, false, 1.0))
}

// --- Single validation set ---

#[test]
fn reports_value_then_continues_when_not_pruned() {
    let mut callback =
        PruningCallback::new(RecordingSink::pruning(false), "binary_error").valid_name("validation");

    let flow = callback.call(&train_report(1)).unwrap();

    assert_eq!(flow, ControlFlow::Continue(()));
    assert_eq!(callback.sink().reports, vec![(1.0, 1)]);
    assert_eq!(callback.sink().prune_queries.get(), 1);
}

#[test]
fn breaks_with_step_and_value_when_pruned() {
    let mut callback =
        PruningCallback::new(RecordingSink::pruning(true), "binary_error").valid_name("validation");

    let flow = callback.call(&train_report(1)).unwrap();

    assert_eq!(flow, ControlFlow::Break(PruneSignal { step: 1, value: 1.0 }));
    assert_eq!(callback.sink().reports, vec![(1.0, 1)]);
}

#[test]
fn picks_requested_metric_among_several() {
    let report = IterationReport::new(3, 0, 10)
        .record(("valid_0", "auc", 0.9, true))
        .record(("valid_0", "binary_error", 0.12, false))
        .record(("valid_0", "binary_logloss", 0.3, false));
    let mut callback = PruningCallback::new(RecordingSink::pruning(false), "binary_logloss");

    callback.call(&report).unwrap();

    assert_eq!(callback.sink().reports, vec![(0.3, 3)]);
}

#[test]
fn configured_set_wins_over_first_seen() {
    let report = IterationReport::new(0, 0, 5)
        .record(("training", "l2", 0.5, false))
        .record(("holdout", "l2", 0.7, false));
    let mut callback =
        PruningCallback::new(RecordingSink::pruning(false), "l2").valid_name("holdout");

    callback.call(&report).unwrap();

    assert_eq!(callback.sink().reports, vec![(0.7, 0)]);
}

#[test]
fn unnamed_callback_uses_first_set_seen() {
    let report = IterationReport::new(0, 0, 5)
        .record(("training", "l2", 0.5, false))
        .record(("holdout", "l2", 0.7, false));
    let mut callback = PruningCallback::new(RecordingSink::pruning(false), "l2");

    callback.call(&report).unwrap();

    assert_eq!(callback.sink().reports, vec![(0.5, 0)]);
}

// --- Cross-validation aggregates ---

#[test]
fn cv_aggregate_without_configured_name() {
    let mut callback = PruningCallback::new(RecordingSink::pruning(false), "binary_error");

    let flow = callback.call(&cv_report(1)).unwrap();

    assert_eq!(flow, ControlFlow::Continue(()));
    assert_eq!(callback.sink().reports, vec![(1.0, 1)]);
}

#[test]
fn cv_aggregate_ignores_configured_name() {
    let mut callback =
        PruningCallback::new(RecordingSink::pruning(true), "binary_error").valid_name("validation");

    let flow = callback.call(&cv_report(1)).unwrap();

    assert_eq!(flow, ControlFlow::Break(PruneSignal { step: 1, value: 1.0 }));
}

// --- Statelessness ---

#[test]
fn repeated_calls_record_each_step() {
    let mut callback =
        PruningCallback::new(RecordingSink::pruning(false), "binary_error").valid_name("validation");

    assert_eq!(callback.call(&train_report(0)).unwrap(), ControlFlow::Continue(()));
    assert_eq!(callback.call(&train_report(1)).unwrap(), ControlFlow::Continue(()));

    assert_eq!(callback.sink().reports, vec![(1.0, 0), (1.0, 1)]);
    assert_eq!(callback.sink().prune_queries.get(), 2);
}

// --- Study trials as sinks ---

#[test]
fn study_trial_without_pruning_keeps_values() {
    let study = Study::with_pruner(Direction::Minimize, DeterministicPruner::new(false));
    let mut trial = study.create_trial();

    {
        let mut callback =
            PruningCallback::new(&mut trial, "binary_error").valid_name("validation");
        assert!(callback.call(&train_report(1)).unwrap().is_continue());
        assert!(callback.call(&cv_report(2)).unwrap().is_continue());
    }

    assert_eq!(trial.intermediate_values(), &[(1, 1.0), (2, 1.0)]);
    assert!(!trial.should_prune());
}

#[test]
fn study_trial_with_pruning_breaks_on_first_report() {
    let study = Study::with_pruner(Direction::Minimize, DeterministicPruner::new(true));
    let mut trial = study.create_trial();
    let mut callback = PruningCallback::new(&mut trial, "binary_error").valid_name("validation");

    assert!(callback.call(&train_report(1)).unwrap().is_break());
}

#[test]
fn owned_trial_is_handed_back_after_pruning() {
    let study = Study::with_pruner(Direction::Minimize, DeterministicPruner::new(true));
    let mut callback = PruningCallback::new(study.create_trial(), "binary_error");
    assert_eq!(callback.metric(), "binary_error");

    let flow = callback.call(&train_report(0)).unwrap();
    assert!(flow.is_break());

    let trial = callback.into_sink();
    assert_eq!(trial.intermediate_values(), &[(0, 1.0)]);
    study.prune_trial(trial);

    let recorded = &study.trials()[0];
    assert_eq!(recorded.state, TrialState::Pruned);
    assert_eq!(recorded.intermediate_values, vec![(0, 1.0)]);
}
