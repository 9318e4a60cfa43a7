//! Evaluation results handed to callbacks after each boosting iteration.
//!
//! The training loop emits one [`EvaluationRecord`] per metric per validation
//! set. A plain training run produces [`EvaluationRecord::Single`] records;
//! cross-validation produces [`EvaluationRecord::Aggregate`] records that are
//! labelled [`CV_AGG_VALID_NAME`] and carry the standard deviation across
//! folds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validation-set label the boosting library gives cross-validation
/// aggregates.
pub const CV_AGG_VALID_NAME: &str = "cv_agg";

/// Name the boosting library assigns to the first validation set when the
/// caller does not name it.
pub const DEFAULT_VALID_NAME: &str = "valid_0";

/// One metric value for one validation set at one iteration.
///
/// # Examples
///
/// ```
/// use optimizer_boosting::EvaluationRecord;
///
/// let single = EvaluationRecord::from(("valid_0", "l2", 0.25, false));
/// let agg = EvaluationRecord::from(("cv_agg", "l2", 0.25, false, 0.01));
///
/// assert_eq!(single.metric(), agg.metric());
/// assert_eq!(single.std_dev(), None);
/// assert_eq!(agg.std_dev(), Some(0.01));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum EvaluationRecord {
    /// Cross-validation aggregate across folds. Listed first so that
    /// deserialization tries the longer shape before the shorter one.
    Aggregate {
        /// Validation-set label, normally [`CV_AGG_VALID_NAME`].
        valid_name: String,
        /// Metric name, e.g. `binary_error`.
        metric: String,
        /// Mean metric value over the folds.
        value: f64,
        /// Whether larger values of this metric are better.
        higher_is_better: bool,
        /// Standard deviation of the metric over the folds.
        std_dev: f64,
    },
    /// Result on a single validation set.
    Single {
        /// Validation-set name, e.g. `valid_0`.
        valid_name: String,
        /// Metric name, e.g. `binary_error`.
        metric: String,
        /// Metric value.
        value: f64,
        /// Whether larger values of this metric are better.
        higher_is_better: bool,
    },
}

impl EvaluationRecord {
    /// Returns the validation-set name.
    #[must_use]
    pub fn valid_name(&self) -> &str {
        match self {
            Self::Single { valid_name, .. } | Self::Aggregate { valid_name, .. } => valid_name,
        }
    }

    /// Returns the metric name.
    #[must_use]
    pub fn metric(&self) -> &str {
        match self {
            Self::Single { metric, .. } | Self::Aggregate { metric, .. } => metric,
        }
    }

    /// Returns the metric value.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Single { value, .. } | Self::Aggregate { value, .. } => *value,
        }
    }

    /// Returns `true` if larger values of the metric are better.
    #[must_use]
    pub fn is_higher_better(&self) -> bool {
        match self {
            Self::Single {
                higher_is_better, ..
            }
            | Self::Aggregate {
                higher_is_better, ..
            } => *higher_is_better,
        }
    }

    /// Returns the fold standard deviation for aggregate records.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        match self {
            Self::Single { .. } => None,
            Self::Aggregate { std_dev, .. } => Some(*std_dev),
        }
    }

    /// Returns `true` for cross-validation aggregate records.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate { .. })
    }
}

impl From<(&str, &str, f64, bool)> for EvaluationRecord {
    fn from((valid_name, metric, value, higher_is_better): (&str, &str, f64, bool)) -> Self {
        Self::Single {
            valid_name: valid_name.to_owned(),
            metric: metric.to_owned(),
            value,
            higher_is_better,
        }
    }
}

impl From<(&str, &str, f64, bool, f64)> for EvaluationRecord {
    fn from(
        (valid_name, metric, value, higher_is_better, std_dev): (&str, &str, f64, bool, f64),
    ) -> Self {
        Self::Aggregate {
            valid_name: valid_name.to_owned(),
            metric: metric.to_owned(),
            value,
            higher_is_better,
            std_dev,
        }
    }
}

/// The state a training loop passes to its callbacks after one iteration.
///
/// Only [`iteration`](IterationReport::iteration) is used as the pruning
/// step; the begin/end bounds are carried for callbacks that need the
/// configured schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IterationReport {
    /// Zero-based index of the iteration that just finished.
    pub iteration: u64,
    /// First iteration of this training run.
    pub begin_iteration: u64,
    /// One past the last configured iteration.
    pub end_iteration: u64,
    /// Every metric on every validation set for this iteration.
    pub evaluation_results: Vec<EvaluationRecord>,
}

impl IterationReport {
    /// Creates a report for `iteration` of a run spanning
    /// `begin_iteration..end_iteration`.
    #[must_use]
    pub fn new(iteration: u64, begin_iteration: u64, end_iteration: u64) -> Self {
        Self {
            iteration,
            begin_iteration,
            end_iteration,
            evaluation_results: Vec::new(),
        }
    }

    /// Appends one evaluation record.
    #[must_use]
    pub fn record(mut self, record: impl Into<EvaluationRecord>) -> Self {
        self.evaluation_results.push(record.into());
        self
    }

    /// Returns `true` when the results come from a cross-validation run,
    /// judged by the shape of the first record.
    #[must_use]
    pub fn is_cross_validation(&self) -> bool {
        is_cross_validation(&self.evaluation_results)
    }
}

/// Cross-validation results are recognised by the shape of the first record.
pub(crate) fn is_cross_validation(records: &[EvaluationRecord]) -> bool {
    records.first().is_some_and(EvaluationRecord::is_aggregate)
}
