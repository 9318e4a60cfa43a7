use std::sync::Arc;

use crate::pruner::{NopPruner, Pruner};
use crate::types::Direction;

use super::Study;

/// A builder for constructing [`Study`] instances with a fluent API.
///
/// Created via [`Study::builder()`].
///
/// # Defaults
///
/// - Direction: [`Minimize`](Direction::Minimize)
/// - Pruner: [`NopPruner`]
///
/// # Examples
///
/// ```
/// use optimizer_boosting::pruner::MedianPruner;
/// use optimizer_boosting::{Direction, Study};
///
/// let study = Study::builder()
///     .minimize()
///     .pruner(MedianPruner::new(Direction::Minimize).n_warmup_steps(5))
///     .build();
///
/// assert_eq!(study.direction(), Direction::Minimize);
/// ```
pub struct StudyBuilder {
    direction: Direction,
    pruner: Option<Box<dyn Pruner>>,
}

impl StudyBuilder {
    pub(super) fn new() -> Self {
        Self {
            direction: Direction::Minimize,
            pruner: None,
        }
    }

    /// Set the optimization direction to minimize (the default).
    #[must_use]
    pub fn minimize(mut self) -> Self {
        self.direction = Direction::Minimize;
        self
    }

    /// Set the optimization direction to maximize.
    #[must_use]
    pub fn maximize(mut self) -> Self {
        self.direction = Direction::Maximize;
        self
    }

    /// Set the optimization direction explicitly.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the pruner consulted by every trial of the study.
    ///
    /// Defaults to [`NopPruner`] (no pruning) if not specified.
    #[must_use]
    pub fn pruner(mut self, pruner: impl Pruner + 'static) -> Self {
        self.pruner = Some(Box::new(pruner));
        self
    }

    /// Build the [`Study`] with the configured options.
    #[must_use]
    pub fn build(self) -> Study {
        let pruner = self.pruner.unwrap_or_else(|| Box::new(NopPruner));
        let pruner: Arc<dyn Pruner> = Arc::from(pruner);
        Study::from_parts(self.direction, pruner)
    }
}
