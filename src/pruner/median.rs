use super::Pruner;
use crate::study::CompletedTrial;
use crate::types::{Direction, TrialState};

/// Prune a trial whose latest value is worse than the median that finished
/// trials reached at the same boosting iteration.
///
/// Only `Complete` trials count towards the median; pruned and failed trials
/// stopped too early to be a fair reference.
///
/// # Examples
///
/// ```
/// use optimizer_boosting::Direction;
/// use optimizer_boosting::pruner::MedianPruner;
///
/// // Let each booster train 10 rounds and wait for 3 finished trials.
/// let pruner = MedianPruner::new(Direction::Minimize)
///     .n_warmup_steps(10)
///     .n_min_trials(3);
/// ```
#[derive(Clone, Debug)]
pub struct MedianPruner {
    direction: Direction,
    /// Steps below this are never pruned.
    n_warmup_steps: u64,
    /// Reference trials needed at a step before it can prune.
    n_min_trials: usize,
}

impl MedianPruner {
    /// Create a new `MedianPruner` for the given optimization direction.
    ///
    /// By default, `n_warmup_steps` is 0 and `n_min_trials` is 1.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            n_warmup_steps: 0,
            n_min_trials: 1,
        }
    }

    /// Set the number of warmup steps. No pruning occurs before this step.
    #[must_use]
    pub fn n_warmup_steps(mut self, n: u64) -> Self {
        self.n_warmup_steps = n;
        self
    }

    /// Set the minimum number of completed trials that must have reported
    /// the current step before pruning is considered.
    #[must_use]
    pub fn n_min_trials(mut self, n: usize) -> Self {
        self.n_min_trials = n;
        self
    }
}

impl Pruner for MedianPruner {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn should_prune(
        &self,
        trial_id: u64,
        step: u64,
        intermediate_values: &[(u64, f64)],
        completed_trials: &[CompletedTrial],
    ) -> bool {
        if step < self.n_warmup_steps {
            return false;
        }
        let Some(current) = value_at(intermediate_values, step) else {
            return false;
        };

        let mut reference: Vec<f64> = completed_trials
            .iter()
            .filter(|t| t.state == TrialState::Complete)
            .filter_map(|t| value_at(&t.intermediate_values, step))
            .filter(|v| !v.is_nan())
            .collect();
        if reference.is_empty() || reference.len() < self.n_min_trials {
            return false;
        }

        let median = median(&mut reference);
        let prune = self.direction.is_better(median, current);
        if prune {
            trace_debug!(trial_id, step, current, median, "value worse than median");
        }
        prune
    }
}

fn value_at(values: &[(u64, f64)], step: u64) -> Option<f64> {
    values.iter().find(|(s, _)| *s == step).map(|&(_, v)| v)
}

/// Median of a non-empty slice. Reorders the slice.
fn median(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len().is_multiple_of(2) {
        f64::midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    }
}
