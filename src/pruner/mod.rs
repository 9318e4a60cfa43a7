//! Pruners decide whether a running trial should stop early.
//!
//! A [`Trial`](crate::Trial) consults its pruner every time the training
//! loop asks [`TrialProgress::should_prune`](crate::TrialProgress::should_prune).
//! The pruner sees the trial's own intermediate values and, for relative
//! strategies such as [`MedianPruner`], the history of finished trials.

mod deterministic;
mod median;
mod nop;

pub use deterministic::DeterministicPruner;
pub use median::MedianPruner;
pub use nop::NopPruner;

use crate::study::CompletedTrial;

/// Trait for pluggable trial pruning strategies.
///
/// The trait requires `Send + Sync` so one pruner can be shared by every
/// trial a study creates.
///
/// # Implementing a custom pruner
///
/// ```
/// use optimizer_boosting::pruner::Pruner;
/// use optimizer_boosting::study::CompletedTrial;
///
/// /// Stop once the training error stops falling.
/// struct PlateauPruner;
///
/// impl Pruner for PlateauPruner {
///     fn should_prune(
///         &self,
///         _trial_id: u64,
///         _step: u64,
///         intermediate_values: &[(u64, f64)],
///         _completed_trials: &[CompletedTrial],
///     ) -> bool {
///         match intermediate_values {
///             [.., (_, prev), (_, last)] => last >= prev,
///             _ => false,
///         }
///     }
/// }
/// ```
pub trait Pruner: Send + Sync {
    /// Decide whether to prune a trial at the given step.
    ///
    /// # Arguments
    ///
    /// * `trial_id` - The current trial's ID.
    /// * `step` - The step of the most recently reported value.
    /// * `intermediate_values` - All `(step, value)` pairs reported so far for this trial.
    /// * `completed_trials` - History of finished trials (for comparison).
    fn should_prune(
        &self,
        trial_id: u64,
        step: u64,
        intermediate_values: &[(u64, f64)],
        completed_trials: &[CompletedTrial],
    ) -> bool;
}
