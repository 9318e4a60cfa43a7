//! Pruning callback for gradient-boosting training loops.
//!
//! A boosting loop calls its callbacks after every iteration with an
//! [`IterationReport`]. [`PruningCallback`] picks one metric on one
//! validation set out of that report, records it on the trial and asks the
//! trial's pruner whether to stop. A stop decision comes back as
//! [`ControlFlow::Break`] carrying a [`PruneSignal`]; configuration mistakes
//! come back as [`Error::Configuration`](crate::Error::Configuration).
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use optimizer_boosting::prelude::*;
//!
//! let study = Study::with_pruner(Direction::Minimize, DeterministicPruner::new(true));
//! let mut trial = study.create_trial();
//! let mut callback = PruningCallback::new(&mut trial, "binary_error").valid_name("validation");
//!
//! let report = IterationReport::new(1, 0, 1).record(("validation", "binary_error", 1.0, false));
//! let flow = callback.call(&report).unwrap();
//! assert_eq!(flow, ControlFlow::Break(PruneSignal { step: 1, value: 1.0 }));
//! ```

use core::ops::ControlFlow;

use crate::error::{ConfigurationError, Error, Result};
use crate::evaluation::{
    CV_AGG_VALID_NAME, DEFAULT_VALID_NAME, EvaluationRecord, IterationReport, is_cross_validation,
};
use crate::trial::TrialProgress;

/// The decision to stop training early, with the step and value that led
/// to it.
///
/// This is not an error. The code that owns the trial converts it into
/// [`Error::TrialPruned`] (`?` does this) so the study records the trial as
/// pruned rather than failed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PruneSignal {
    /// Iteration at which the trial was pruned.
    pub step: u64,
    /// Metric value reported at that iteration.
    pub value: f64,
}

impl core::fmt::Display for PruneSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "trial was pruned at iteration {} (value {})",
            self.step, self.value
        )
    }
}

impl From<PruneSignal> for Error {
    fn from(_: PruneSignal) -> Self {
        Error::TrialPruned
    }
}

/// A callback invoked by a training loop after each boosting iteration.
///
/// Returning `Break` asks the loop to stop training. Errors must be passed
/// up to the caller of the training loop, not swallowed.
pub trait TrainingCallback {
    /// Inspect the results of one iteration.
    ///
    /// # Errors
    ///
    /// Implementations return an error when they cannot make sense of the
    /// report, e.g. a metric they were configured for is missing.
    fn after_iteration(&mut self, report: &IterationReport) -> Result<ControlFlow<PruneSignal>>;
}

/// Invoke `callbacks` in order for one iteration.
///
/// Stops at the first callback that returns `Break` and hands that signal
/// back; later callbacks do not run for this iteration.
///
/// # Errors
///
/// Returns the first error raised by a callback.
pub fn run_callbacks(
    callbacks: &mut [&mut dyn TrainingCallback],
    report: &IterationReport,
) -> Result<ControlFlow<PruneSignal>> {
    for callback in callbacks.iter_mut() {
        if let ControlFlow::Break(signal) = callback.after_iteration(report)? {
            return Ok(ControlFlow::Break(signal));
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// Work out which validation set a callback should read from `records`.
///
/// - Cross-validation aggregates are always read from `cv_agg`, whatever
///   name was configured, since fold aggregates carry no other label.
/// - Otherwise a configured name wins.
/// - Otherwise the first record's validation set is used.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnknownValidationSet`] when nothing is
/// configured and `records` is empty.
///
/// # Examples
///
/// ```
/// use optimizer_boosting::{EvaluationRecord, resolve_effective_validation_set};
///
/// let train = [EvaluationRecord::from(("valid_0", "l2", 0.1, false))];
/// let cv = [EvaluationRecord::from(("cv_agg", "l2", 0.1, false, 0.01))];
///
/// assert_eq!(resolve_effective_validation_set(&train, None).unwrap(), "valid_0");
/// assert_eq!(resolve_effective_validation_set(&train, Some("test")).unwrap(), "test");
/// assert_eq!(resolve_effective_validation_set(&cv, Some("test")).unwrap(), "cv_agg");
/// ```
pub fn resolve_effective_validation_set(
    records: &[EvaluationRecord],
    configured: Option<&str>,
) -> core::result::Result<String, ConfigurationError> {
    if is_cross_validation(records) {
        return Ok(CV_AGG_VALID_NAME.to_owned());
    }
    if let Some(name) = configured {
        return Ok(name.to_owned());
    }
    records
        .first()
        .map(|r| r.valid_name().to_owned())
        .ok_or_else(|| ConfigurationError::UnknownValidationSet {
            valid_name: DEFAULT_VALID_NAME.to_owned(),
        })
}

/// Reports one metric of a boosting run to a trial and stops the run when
/// the trial's pruner says so.
///
/// Only "lower is better" metrics are supported; a metric reported with
/// `higher_is_better` is rejected on every call rather than inverted.
///
/// The callback keeps no state between iterations. Everything it learns is
/// handed to the sink.
#[derive(Debug)]
pub struct PruningCallback<S> {
    sink: S,
    metric: String,
    valid_name: Option<String>,
}

impl<S: TrialProgress> PruningCallback<S> {
    /// Create a callback that watches `metric` and reports it to `sink`.
    ///
    /// Without [`valid_name`](Self::valid_name), the first validation set in
    /// each report is used.
    #[must_use]
    pub fn new(sink: S, metric: impl Into<String>) -> Self {
        Self {
            sink,
            metric: metric.into(),
            valid_name: None,
        }
    }

    /// Read the metric from the validation set called `name`.
    #[must_use]
    pub fn valid_name(mut self, name: impl Into<String>) -> Self {
        self.valid_name = Some(name.into());
        self
    }

    /// The metric this callback watches.
    #[must_use]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// The sink values are reported to.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Release the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Report this iteration's metric and decide whether to stop.
    ///
    /// The sink is only touched once the report has passed validation.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownValidationSet`] if no record carries
    ///   the effective validation-set name.
    /// - [`ConfigurationError::UnknownMetric`] if that set does not report
    ///   the metric.
    /// - [`ConfigurationError::MaximizationUnsupported`] if the metric is
    ///   higher-is-better.
    pub fn call(&mut self, report: &IterationReport) -> Result<ControlFlow<PruneSignal>> {
        let value = self.target_value(&report.evaluation_results)?;
        let step = report.iteration;

        self.sink.report(value, step);
        trace_debug!(step, value, metric = %self.metric, "reported intermediate value");

        if self.sink.should_prune() {
            let signal = PruneSignal { step, value };
            trace_info!(step, value, "{signal}");
            return Ok(ControlFlow::Break(signal));
        }
        Ok(ControlFlow::Continue(()))
    }

    fn target_value(&self, records: &[EvaluationRecord]) -> Result<f64> {
        let valid_name = resolve_effective_validation_set(records, self.valid_name.as_deref())?;

        let mut in_set = records
            .iter()
            .filter(|r| r.valid_name() == valid_name)
            .peekable();
        if in_set.peek().is_none() {
            return Err(ConfigurationError::UnknownValidationSet { valid_name }.into());
        }

        let Some(record) = in_set.find(|r| r.metric() == self.metric) else {
            return Err(ConfigurationError::UnknownMetric {
                metric: self.metric.clone(),
                valid_name,
            }
            .into());
        };

        if record.is_higher_better() {
            return Err(ConfigurationError::MaximizationUnsupported {
                metric: self.metric.clone(),
            }
            .into());
        }

        Ok(record.value())
    }
}

impl<S: TrialProgress> TrainingCallback for PruningCallback<S> {
    fn after_iteration(&mut self, report: &IterationReport) -> Result<ControlFlow<PruneSignal>> {
        self.call(report)
    }
}
