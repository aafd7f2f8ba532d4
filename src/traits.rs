//! Core trait definition for layered dynamic programs.
//!
//! Every recurrence in this crate has the same shape: one layer per time
//! step, each layer a frontier of per-state values computed from the
//! previous layer and fixed input data. Implement [`LayeredProblem`] for a
//! struct capturing that input (a model and an observation sequence) and let
//! [`DpEngine`](crate::engine::DpEngine) fill the table.

/// Trait for a layered dynamic program instance.
///
/// Semantics:
/// - There are `T = num_layers()` layers, indexed `0..T`.
/// - `init_frontier()` is layer 0.
/// - `forward_step(i, frontier)` maps layer `i` -> layer `i+1`.
///
/// "Layer" is the order in which the engine visits frontiers, not
/// necessarily time: a backward recurrence maps layer `i` to time `T-1-i`.
pub trait LayeredProblem {
    /// Representation of the DP values on one layer (e.g. one column of a
    /// `T × N` table).
    type Frontier: Clone;

    /// Number of DP layers `T`.
    fn num_layers(&self) -> usize;

    /// Initialize the frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// Perform one DP step: from layer `layer` to `layer + 1`.
    ///
    /// Must only depend on `frontier_i` and fixed problem data.
    fn forward_step(&self, layer: usize, frontier_i: &Self::Frontier) -> Self::Frontier;
}
