//! Study implementation: runs trials and records how each one ended.

use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::pruner::{NopPruner, Pruner};
use crate::trial::Trial;
use crate::types::{Direction, TrialState};

mod builder;
mod optimize;

pub use builder::StudyBuilder;

/// A finished trial: its final value, the intermediate values it reported
/// and how it ended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedTrial {
    /// The unique identifier for this trial.
    pub id: u64,
    /// The objective value; `None` for pruned and failed trials.
    pub value: Option<f64>,
    /// Intermediate values reported during the trial, as `(step, value)`.
    pub intermediate_values: Vec<(u64, f64)>,
    /// The state of the trial (Complete, Pruned, or Failed).
    pub state: TrialState,
}

impl CompletedTrial {
    /// Creates a `Complete` trial record with the given intermediate values.
    ///
    /// Mostly useful for seeding a pruner's history in tests.
    #[must_use]
    pub fn with_intermediate_values(
        id: u64,
        value: f64,
        intermediate_values: Vec<(u64, f64)>,
    ) -> Self {
        Self {
            id,
            value: Some(value),
            intermediate_values,
            state: TrialState::Complete,
        }
    }
}

/// A study manages the optimization process, tracking trials and their results.
///
/// # Examples
///
/// ```
/// use optimizer_boosting::{Direction, Study};
///
/// let study = Study::new(Direction::Minimize);
/// assert_eq!(study.direction(), Direction::Minimize);
/// assert_eq!(study.n_trials(), 0);
/// ```
pub struct Study {
    direction: Direction,
    pruner: Arc<dyn Pruner>,
    /// Finished trials, shared with running trials for relative pruning.
    trials: Arc<RwLock<Vec<CompletedTrial>>>,
    next_id: AtomicU64,
}

impl core::fmt::Debug for Study {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Study")
            .field("direction", &self.direction)
            .field("n_trials", &self.n_trials())
            .finish_non_exhaustive()
    }
}

impl Study {
    /// Create a new study with the given optimization direction and no pruner.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self::with_pruner(direction, NopPruner)
    }

    /// Create a study whose trials consult `pruner`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optimizer_boosting::pruner::MedianPruner;
    /// use optimizer_boosting::{Direction, Study};
    ///
    /// let study = Study::with_pruner(Direction::Minimize, MedianPruner::new(Direction::Minimize));
    /// ```
    #[must_use]
    pub fn with_pruner(direction: Direction, pruner: impl Pruner + 'static) -> Self {
        Self::from_parts(direction, Arc::new(pruner))
    }

    /// Return a [`StudyBuilder`] for constructing a study with a fluent API.
    #[must_use]
    pub fn builder() -> StudyBuilder {
        StudyBuilder::new()
    }

    pub(crate) fn from_parts(direction: Direction, pruner: Arc<dyn Pruner>) -> Self {
        Self {
            direction,
            pruner,
            trials: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Return the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Return a reference to the study's pruner.
    #[must_use]
    pub fn pruner(&self) -> &dyn Pruner {
        &*self.pruner
    }

    /// Create a new running trial with a fresh ID.
    ///
    /// The trial uses the study's pruner and sees every trial finished so far.
    /// Hand it back through [`Study::complete_trial`], [`Study::prune_trial`]
    /// or [`Study::fail_trial`] when done, or let [`Study::optimize`] manage
    /// it.
    #[must_use]
    pub fn create_trial(&self) -> Trial {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Trial::with_pruner(id, Arc::clone(&self.pruner), Arc::clone(&self.trials))
    }

    /// Record `trial` as complete with objective `value`.
    pub fn complete_trial(&self, trial: Trial, value: f64) {
        let completed = trial.into_completed(Some(value), TrialState::Complete);
        self.trials.write().push(completed);
    }

    /// Record `trial` as pruned, keeping its intermediate values.
    pub fn prune_trial(&self, trial: Trial) {
        let completed = trial.into_completed(None, TrialState::Pruned);
        self.trials.write().push(completed);
    }

    /// Record `trial` as failed.
    pub fn fail_trial(&self, trial: Trial) {
        let completed = trial.into_completed(None, TrialState::Failed);
        self.trials.write().push(completed);
    }

    /// Return a snapshot of every finished trial, in the order they finished.
    #[must_use]
    pub fn trials(&self) -> Vec<CompletedTrial> {
        self.trials.read().clone()
    }

    /// Return the number of finished trials (any state).
    #[must_use]
    pub fn n_trials(&self) -> usize {
        self.trials.read().len()
    }

    /// Return the best `Complete` trial according to the study direction.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoCompletedTrials` if no trial has completed.
    pub fn best_trial(&self) -> Result<CompletedTrial> {
        let trials = self.trials.read();
        trials
            .iter()
            .filter(|t| t.state == TrialState::Complete)
            .filter_map(|t| t.value.map(|v| (t, v)))
            .reduce(|best, cand| {
                if self.direction.is_better(cand.1, best.1) {
                    cand
                } else {
                    best
                }
            })
            .map(|(t, _)| t.clone())
            .ok_or(Error::NoCompletedTrials)
    }

    /// Return the objective value of the best `Complete` trial.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoCompletedTrials` if no trial has completed.
    pub fn best_value(&self) -> Result<f64> {
        self.best_trial()?.value.ok_or(Error::NoCompletedTrials)
    }
}
