use std::ops::ControlFlow;

use optimizer_boosting::{
    IterationReport, PruneSignal, PruningCallback, Result, TrainingCallback, run_callbacks,
};

use crate::sink::RecordingSink;

/// Counts how many iterations it has seen.
#[derive(Default)]
struct Counter(usize);

impl TrainingCallback for Counter {
    fn after_iteration(&mut self, _report: &IterationReport) -> Result<ControlFlow<PruneSignal>> {
        self.0 += 1;
        Ok(ControlFlow::Continue(()))
    }
}

fn report() -> IterationReport {
    IterationReport::new(4, 0, 10).record(("valid_0", "l1", 0.2, false))
}

#[test]
fn all_callbacks_run_when_nobody_stops() {
    let mut first = Counter::default();
    let mut pruning = PruningCallback::new(RecordingSink::pruning(false), "l1");
    let mut last = Counter::default();

    let flow = run_callbacks(&mut [&mut first, &mut pruning, &mut last], &report()).unwrap();

    assert!(flow.is_continue());
    assert_eq!((first.0, last.0), (1, 1));
}

#[test]
fn break_skips_remaining_callbacks() {
    let mut pruning = PruningCallback::new(RecordingSink::pruning(true), "l1");
    let mut after = Counter::default();

    let flow = run_callbacks(&mut [&mut pruning, &mut after], &report()).unwrap();

    assert_eq!(flow, ControlFlow::Break(PruneSignal { step: 4, value: 0.2 }));
    assert_eq!(after.0, 0);
}

#[test]
fn errors_propagate_through_dispatch() {
    let mut pruning = PruningCallback::new(RecordingSink::pruning(false), "l2");
    let mut after = Counter::default();

    assert!(run_callbacks(&mut [&mut pruning, &mut after], &report()).is_err());
    assert_eq!(after.0, 0);
}

#[test]
fn no_callbacks_continue() {
    assert!(run_callbacks(&mut [], &report()).unwrap().is_continue());
}
