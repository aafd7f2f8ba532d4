//! Hidden Markov model inference and evaluation (`hmm_eval`)
//!
//! This crate decodes hidden state sequences of a first-order discrete HMM
//! and scores the predictions against ground truth.
//!
//! ## Core idea
//! 1. Load a [`Model`] (states, transitions, emissions) and an
//!    [`ObservationSequence`] of `(time, true state, symbol)` records.
//! 2. Decode with [`decode`] (Viterbi, one globally best path) or with
//!    [`forward_backward`] + [`most_probable_states`] (per-step marginals).
//! 3. Estimate either prediction with a [`ConfusionMatrix`] and per-state
//!    [`PredictionEstimation`]s.
//!
//! Both algorithms are layered dynamic programs: they implement
//! [`LayeredProblem`] and are driven by [`DpEngine`], one layer per time step.
//! State `0` is the silent begin state and `N-1` the silent end state.
//! Probabilities are plain products, not logarithms.
//!
//! ## Quick start
//! ```
//! use hmm_eval::{decode, ConfusionMatrix, ModelBuilder, ObservationSequence};
//!
//! let model = ModelBuilder::new(["begin", "A", "B", "end"], 2)?
//!     .with_transition(0, 1, 0.6)?
//!     .with_transition(0, 2, 0.4)?
//!     .with_transition(1, 1, 0.7)?
//!     .with_transition(1, 2, 0.3)?
//!     .with_transition(2, 1, 0.4)?
//!     .with_transition(2, 2, 0.6)?
//!     .with_emission(1, 0, 0.9)?
//!     .with_emission(1, 1, 0.1)?
//!     .with_emission(2, 0, 0.2)?
//!     .with_emission(2, 1, 0.8)?
//!     .build();
//!
//! // (true state, symbol) per step: a, a, b
//! let obs = ObservationSequence::from_pairs(&model, [(1, 0), (1, 0), (2, 1)])?;
//! let path = decode(&model, &obs);
//! assert_eq!(path, vec![1, 1, 2]);
//!
//! let cm = ConfusionMatrix::combine(&obs, &path, &model);
//! assert_eq!(cm.estimation(1).f_measure, 1.0);
//! # Ok::<(), hmm_eval::HmmError>(())
//! ```
//!
//! ## Cargo features
//! - `parallel`: fill the forward and backward tables, and run the two
//!   algorithms in [`evaluate`], concurrently with rayon.
//! - `tracing`: spans and events from the engine and the loaders.
//! - `cli` (default): the `hmm_eval` binary.

pub mod builder;
pub mod engine;
pub mod error;
pub mod estimation;
pub mod evaluate;
pub mod model;
pub mod observation;
pub mod problems;
pub mod traits;
pub mod utils;

pub use crate::builder::ModelBuilder;
pub use crate::engine::DpEngine;
pub use crate::error::{HmmError, Result};
pub use crate::estimation::{
    confusion_matrix, most_probable_states, state_prediction_estimations, ConfusionMatrix,
    PredictionEstimation,
};
pub use crate::evaluate::{evaluate, Algorithm, AlgorithmReport, Evaluation};
pub use crate::model::Model;
pub use crate::observation::{Observation, ObservationSequence};
pub use crate::problems::forward_backward::{forward_backward, sequence_probability, AlphaBeta};
pub use crate::problems::viterbi::{decode, viterbi, ViterbiPath};
pub use crate::traits::LayeredProblem;
