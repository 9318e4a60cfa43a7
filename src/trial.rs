//! Trial implementation: the progress sink a pruning callback reports into.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::pruner::{NopPruner, Pruner};
use crate::study::CompletedTrial;
use crate::types::TrialState;

/// Capability a training callback needs from whatever tracks trial progress.
///
/// [`Trial`] is the built-in implementation. The trait is also implemented for
/// `&mut T`, so a [`PruningCallback`](crate::PruningCallback) can borrow a
/// trial for the length of a training run instead of owning it.
pub trait TrialProgress {
    /// Record `value` as the intermediate objective value at `step`.
    fn report(&mut self, value: f64, step: u64);

    /// Ask whether the trial should stop, given everything reported so far.
    fn should_prune(&self) -> bool;
}

impl<T: TrialProgress + ?Sized> TrialProgress for &mut T {
    fn report(&mut self, value: f64, step: u64) {
        (**self).report(value, step);
    }

    fn should_prune(&self) -> bool {
        (**self).should_prune()
    }
}

/// A trial represents a single evaluation of the objective function.
///
/// While it runs, the training loop reports one intermediate value per
/// boosting iteration; the trial keeps one value per step and asks its
/// pruner whether to stop. How the trial ended is recorded on its
/// [`CompletedTrial`] once it is handed back to the [`Study`](crate::Study).
#[derive(Clone)]
pub struct Trial {
    id: u64,
    /// `(step, value)` pairs, one per step, most recent last.
    intermediate_values: Vec<(u64, f64)>,
    pruner: Arc<dyn Pruner>,
    /// Finished trials of the owning study, read by relative pruners.
    history: Arc<RwLock<Vec<CompletedTrial>>>,
}

impl core::fmt::Debug for Trial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Trial")
            .field("id", &self.id)
            .field("intermediate_values", &self.intermediate_values)
            .field("n_history", &self.history.read().len())
            .finish_non_exhaustive()
    }
}

impl Trial {
    /// Creates a standalone trial with the given ID.
    ///
    /// The trial never prunes and has no history to compare against. Trials
    /// created through [`Study::create_trial`](crate::Study::create_trial)
    /// use the study's pruner instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use optimizer_boosting::{Trial, TrialProgress};
    ///
    /// let mut trial = Trial::new(0);
    /// trial.report(0.5, 0);
    /// assert!(!trial.should_prune());
    /// assert_eq!(trial.intermediate_values(), &[(0, 0.5)]);
    /// ```
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self::with_pruner(id, Arc::new(NopPruner), Arc::new(RwLock::new(Vec::new())))
    }

    /// Creates a trial that consults `pruner` and compares against `history`.
    pub(crate) fn with_pruner(
        id: u64,
        pruner: Arc<dyn Pruner>,
        history: Arc<RwLock<Vec<CompletedTrial>>>,
    ) -> Self {
        Self {
            id,
            intermediate_values: Vec::new(),
            pruner,
            history,
        }
    }

    /// Returns the unique ID of this trial.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns every `(step, value)` pair reported so far.
    #[must_use]
    pub fn intermediate_values(&self) -> &[(u64, f64)] {
        &self.intermediate_values
    }

    /// Returns the most recently reported step, if any.
    #[must_use]
    pub fn last_step(&self) -> Option<u64> {
        self.intermediate_values.last().map(|&(step, _)| step)
    }

    /// Consumes the trial into its history record.
    pub(crate) fn into_completed(self, value: Option<f64>, state: TrialState) -> CompletedTrial {
        CompletedTrial {
            id: self.id,
            value,
            intermediate_values: self.intermediate_values,
            state,
        }
    }
}

impl TrialProgress for Trial {
    /// Replaces any earlier value for `step` and makes `step` the latest.
    fn report(&mut self, value: f64, step: u64) {
        if let Some(pos) = self.intermediate_values.iter().position(|(s, _)| *s == step) {
            self.intermediate_values.remove(pos);
        }
        self.intermediate_values.push((step, value));
    }

    fn should_prune(&self) -> bool {
        let Some(step) = self.last_step() else {
            return false;
        };
        let history = self.history.read();
        self.pruner
            .should_prune(self.id, step, &self.intermediate_values, &history)
    }
}
