/// Errors returned by the pruning callback and the study that drives it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the callback's metric or validation-set setup does not
    /// match what the training loop actually produces.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Returned when a trial is pruned (stopped early by its pruner).
    #[error("trial was pruned")]
    TrialPruned,

    /// Returned when requesting the best trial but no trials have completed.
    #[error("no completed trials available")]
    NoCompletedTrials,
}

/// A mismatch between the callback's configuration and the evaluation
/// results it receives.
///
/// These are discovered lazily, on the first iteration whose results are
/// inspected, because the training loop decides when metrics appear.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No evaluation record carries the requested validation-set name.
    #[error("unknown validation set '{valid_name}': not found in the evaluation results")]
    UnknownValidationSet {
        /// The validation-set name that was looked up.
        valid_name: String,
    },

    /// The validation set exists but does not report the requested metric.
    #[error("unknown metric '{metric}' for validation set '{valid_name}'")]
    UnknownMetric {
        /// The metric name that was looked up.
        metric: String,
        /// The validation set it was looked up in.
        valid_name: String,
    },

    /// The metric is "higher is better", which pruning does not support.
    #[error("metric '{metric}' is maximized; pruning on higher-is-better metrics is not supported")]
    MaximizationUnsupported {
        /// The offending metric name.
        metric: String,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Convenience type for signalling a pruned trial from an objective function.
///
/// Implements `Into<Error>` so it can be used with `?` in objectives that
/// return `Result<f64, Error>`.
///
/// # Examples
///
/// ```
/// use optimizer_boosting::{Error, TrialPruned};
///
/// fn objective_that_prunes() -> Result<f64, Error> {
///     Err(TrialPruned)?
/// }
///
/// assert!(matches!(objective_that_prunes(), Err(Error::TrialPruned)));
/// ```
#[derive(Debug)]
pub struct TrialPruned;

impl core::fmt::Display for TrialPruned {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "trial was pruned")
    }
}

impl From<TrialPruned> for Error {
    fn from(_: TrialPruned) -> Self {
        Error::TrialPruned
    }
}
