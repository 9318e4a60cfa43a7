use crate::error::{Error, Result};
use crate::trial::Trial;

use super::Study;

impl Study {
    /// Run `objective` for up to `n_trials` trials, one after another.
    ///
    /// Each trial ends in one of three ways:
    ///
    /// - `Ok(value)`: recorded as `Complete`.
    /// - `Err(Error::TrialPruned)`: recorded as `Pruned`, and the loop moves
    ///   on to the next trial. A pruning callback's
    ///   [`PruneSignal`](crate::PruneSignal) converts into this error with `?`.
    /// - Any other error: recorded as `Failed` and returned at once, so a
    ///   misconfigured callback stops the study instead of failing silently
    ///   trial after trial.
    ///
    /// # Errors
    ///
    /// Returns the first non-pruning error raised by `objective`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optimizer_boosting::pruner::DeterministicPruner;
    /// use optimizer_boosting::{Direction, Study, TrialProgress, TrialState};
    ///
    /// let study = Study::with_pruner(Direction::Minimize, DeterministicPruner::new(true));
    /// study
    ///     .optimize(1, |trial| {
    ///         trial.report(0.5, 0);
    ///         if trial.should_prune() {
    ///             return Err(optimizer_boosting::TrialPruned.into());
    ///         }
    ///         Ok(0.5)
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(study.trials()[0].state, TrialState::Pruned);
    /// ```
    pub fn optimize<F>(&self, n_trials: usize, mut objective: F) -> Result<()>
    where
        F: FnMut(&mut Trial) -> Result<f64>,
    {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::info_span!("optimize", n_trials, direction = ?self.direction).entered();

        for _ in 0..n_trials {
            let mut trial = self.create_trial();
            #[cfg(feature = "tracing")]
            let trial_id = trial.id();

            match objective(&mut trial) {
                Ok(value) => {
                    self.complete_trial(trial, value);
                    trace_info!(trial_id, value, "trial completed");
                }
                Err(Error::TrialPruned) => {
                    #[cfg(feature = "tracing")]
                    let step = trial.last_step();
                    self.prune_trial(trial);
                    trace_info!(trial_id, ?step, "trial pruned");
                }
                Err(e) => {
                    self.fail_trial(trial);
                    trace_info!(trial_id, error = %e, "trial failed");
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}
