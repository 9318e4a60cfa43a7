use super::Pruner;
use crate::study::CompletedTrial;

/// A pruner that always returns the same decision.
///
/// Handy for exercising training-loop integrations: `DeterministicPruner::new(true)`
/// prunes at the first reported step, `DeterministicPruner::new(false)` never
/// prunes.
///
/// # Examples
///
/// ```
/// use optimizer_boosting::pruner::{DeterministicPruner, Pruner};
///
/// assert!(DeterministicPruner::new(true).should_prune(0, 3, &[(3, 1.0)], &[]));
/// assert!(!DeterministicPruner::new(false).should_prune(0, 3, &[(3, 1.0)], &[]));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DeterministicPruner {
    prune: bool,
}

impl DeterministicPruner {
    /// Create a pruner that always answers `prune`.
    #[must_use]
    pub fn new(prune: bool) -> Self {
        Self { prune }
    }
}

impl Pruner for DeterministicPruner {
    fn should_prune(
        &self,
        _trial_id: u64,
        _step: u64,
        _intermediate_values: &[(u64, f64)],
        _completed_trials: &[CompletedTrial],
    ) -> bool {
        self.prune
    }
}
