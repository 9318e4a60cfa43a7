#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Trial pruning for gradient-boosting training loops, with an Optuna-like
//! API. A [`PruningCallback`] sits in the booster's callback list, reports
//! one validation metric per iteration to a [`Trial`], and tells the loop to
//! stop as soon as the trial's [`Pruner`](pruner::Pruner) gives up on it.
//!
//! # Getting Started
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use optimizer_boosting::prelude::*;
//!
//! // Stand-in for a boosting library: the validation error stops improving
//! // after a few rounds.
//! fn train(callbacks: &mut [&mut dyn TrainingCallback]) -> Result<f64> {
//!     let errors = [0.40, 0.31, 0.27, 0.27, 0.27, 0.27];
//!     for (i, &err) in errors.iter().enumerate() {
//!         let report = IterationReport::new(i as u64, 0, errors.len() as u64)
//!             .record(("valid_0", "binary_error", err, false))
//!             .record(("valid_0", "auc", 1.0 - err, true));
//!         if let ControlFlow::Break(signal) = run_callbacks(callbacks, &report)? {
//!             return Err(signal.into());
//!         }
//!     }
//!     Ok(errors[errors.len() - 1])
//! }
//!
//! let study = Study::builder()
//!     .minimize()
//!     .pruner(MedianPruner::new(Direction::Minimize))
//!     .build();
//!
//! study
//!     .optimize(3, |trial| {
//!         let mut pruning = PruningCallback::new(trial, "binary_error");
//!         train(&mut [&mut pruning])
//!     })
//!     .unwrap();
//!
//! assert!((study.best_value().unwrap() - 0.27).abs() < 1e-12);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`PruningCallback`] | Pick a metric out of each [`IterationReport`], report it, decide whether to stop. |
//! | [`TrialProgress`] | What the callback reports into; implemented by [`Trial`]. |
//! | [`Pruner`](pruner::Pruner) | Stopping rule a trial consults: [`NopPruner`](pruner::NopPruner), [`DeterministicPruner`](pruner::DeterministicPruner), [`MedianPruner`](pruner::MedianPruner). |
//! | [`Study`] | Run trials and record them as complete, pruned or failed. |
//!
//! # Limitations
//!
//! Metrics whose evaluation record says "higher is better" (e.g. `auc`) are
//! rejected with [`ConfigurationError::MaximizationUnsupported`]. Watch the
//! complementary error metric instead.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on evaluation records, reports and trial records | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) when values are reported and trials end | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod callback;
mod error;
mod evaluation;
pub mod pruner;
pub mod study;
mod trial;
mod types;

pub use callback::{
    PruneSignal, PruningCallback, TrainingCallback, resolve_effective_validation_set,
    run_callbacks,
};
pub use error::{ConfigurationError, Error, Result, TrialPruned};
pub use evaluation::{CV_AGG_VALID_NAME, DEFAULT_VALID_NAME, EvaluationRecord, IterationReport};
pub use study::{CompletedTrial, Study, StudyBuilder};
pub use trial::{Trial, TrialProgress};
pub use types::{Direction, TrialState};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use optimizer_boosting::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callback::{
        PruneSignal, PruningCallback, TrainingCallback, run_callbacks,
    };
    pub use crate::error::{ConfigurationError, Error, Result, TrialPruned};
    pub use crate::evaluation::{EvaluationRecord, IterationReport};
    pub use crate::pruner::{DeterministicPruner, MedianPruner, NopPruner, Pruner};
    pub use crate::study::{CompletedTrial, Study, StudyBuilder};
    pub use crate::trial::{Trial, TrialProgress};
    pub use crate::types::{Direction, TrialState};
}
