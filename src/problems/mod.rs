//! HMM inference problems for the layered DP engine.
//!
//! - [`viterbi`]          : single most probable hidden-state path.
//! - [`forward_backward`] : per-step forward/backward probabilities.

pub mod forward_backward;
pub mod viterbi;
