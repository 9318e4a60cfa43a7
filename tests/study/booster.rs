//! A fake boosting library: emits evaluation results the way a real booster
//! does for `train` (one record per metric per validation set) and `cv`
//! (one `cv_agg` aggregate per metric), and honors its callbacks.

use std::ops::ControlFlow;

use optimizer_boosting::{
    DEFAULT_VALID_NAME, IterationReport, Result, TrainingCallback, run_callbacks,
};

/// Metrics the fake booster evaluates each round: `auc` (higher is better)
/// and `binary_error` (lower is better).
fn metrics(round: u64) -> [(&'static str, f64, bool); 2] {
    let error = 1.0 / (round as f64 + 1.0);
    [("auc", 1.0 - error, true), ("binary_error", error, false)]
}

/// Train for `rounds` iterations against one validation set.
///
/// `valid_name` of `None` lets the booster name the set itself.
pub fn train(
    rounds: u64,
    valid_name: Option<&str>,
    callbacks: &mut [&mut dyn TrainingCallback],
) -> Result<u64> {
    let valid_name = valid_name.unwrap_or(DEFAULT_VALID_NAME);
    for round in 0..rounds {
        let mut report = IterationReport::new(round, 0, rounds);
        for (metric, value, higher_is_better) in metrics(round) {
            report = report.record((valid_name, metric, value, higher_is_better));
        }
        if let ControlFlow::Break(signal) = run_callbacks(callbacks, &report)? {
            return Err(signal.into());
        }
    }
    Ok(rounds)
}

/// Cross-validate for `rounds` iterations, reporting fold aggregates.
pub fn cv(rounds: u64, callbacks: &mut [&mut dyn TrainingCallback]) -> Result<u64> {
    for round in 0..rounds {
        let mut report = IterationReport::new(round, 0, rounds);
        for (metric, value, higher_is_better) in metrics(round) {
            report = report.record(("cv_agg", metric, value, higher_is_better, 0.01));
        }
        if let ControlFlow::Break(signal) = run_callbacks(callbacks, &report)? {
            return Err(signal.into());
        }
    }
    Ok(rounds)
}
