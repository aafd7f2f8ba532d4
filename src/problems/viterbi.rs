//! Viterbi decoding as a layered DP.
//!
//! Layer `t` holds, for every state `s`, the probability of the best path
//! that explains observations `0..=t` and ends in `s`, plus the predecessor
//! that achieved it. Probabilities are plain products (no log transform), so
//! long sequences underflow to zero; a zero column resolves every argmax to
//! state 0.

use crate::engine::DpEngine;
use crate::model::Model;
use crate::observation::ObservationSequence;
use crate::traits::LayeredProblem;

/// Viterbi DP instance: borrowed model + observed symbols.
#[derive(Clone, Debug)]
pub struct ViterbiProblem<'a> {
    pub model: &'a Model,
    /// Observations as discrete symbols in `0..alphabet_size`.
    pub symbols: Vec<usize>,
}

/// One column of the Viterbi table.
#[derive(Clone, Debug, PartialEq)]
pub struct ViterbiColumn {
    /// Best-path probability ending in each state at this time.
    pub probability: Vec<f64>,
    /// Predecessor state achieving `probability[s]`.
    pub backpointer: Vec<usize>,
}

/// Decoded path together with its probability.
#[derive(Clone, Debug, PartialEq)]
pub struct ViterbiPath {
    pub states: Vec<usize>,
    pub probability: f64,
}

impl<'a> ViterbiProblem<'a> {
    pub fn new(model: &'a Model, observations: &ObservationSequence) -> Self {
        Self::from_symbols(model, observations.symbols())
    }

    pub fn from_symbols(model: &'a Model, symbols: Vec<usize>) -> Self {
        Self { model, symbols }
    }

    /// Best predecessor of `s_to` given the previous column and the
    /// emission probability of the current symbol.
    ///
    /// The scan starts from state 0 and only moves on a strictly greater
    /// candidate, so equal maxima keep the lowest index.
    fn best_predecessor(&self, prev: &[f64], s_to: usize, emit: f64) -> (usize, f64) {
        let a = self.model.transitions();
        let mut arg = 0;
        let mut best = prev[0] * a[0][s_to] * emit;
        for (s_from, &p) in prev.iter().enumerate().skip(1) {
            let cand = p * a[s_from][s_to] * emit;
            if cand > best {
                best = cand;
                arg = s_from;
            }
        }
        (arg, best)
    }

    /// Fill the table and backtrack from the best terminal state.
    pub fn solve(&self) -> ViterbiPath {
        let table = DpEngine::new(self.clone()).run();
        let Some(last) = table.last() else {
            return ViterbiPath {
                states: Vec::new(),
                probability: 0.0,
            };
        };

        let terminal = argmax_first(&last.probability);
        let probability = last.probability[terminal];

        let mut states = Vec::with_capacity(table.len());
        let mut s = terminal;
        states.push(s);
        for column in table[1..].iter().rev() {
            s = column.backpointer[s];
            states.push(s);
        }
        states.reverse();

        #[cfg(feature = "tracing")]
        tracing::debug!(steps = states.len(), terminal, probability, "viterbi decoded");

        ViterbiPath {
            states,
            probability,
        }
    }
}

impl LayeredProblem for ViterbiProblem<'_> {
    type Frontier = ViterbiColumn;

    fn num_layers(&self) -> usize {
        self.symbols.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        let o0 = self.symbols[0];
        let begin = self.model.begin_state();
        let n = self.model.n_states();
        let probability = (0..n)
            .map(|s| self.model.transition(begin, s) * self.model.emission(s, o0))
            .collect::<Vec<_>>();
        ViterbiColumn {
            probability,
            backpointer: vec![begin; n],
        }
    }

    fn forward_step(&self, layer: usize, f: &Self::Frontier) -> Self::Frontier {
        let obs_sym = self.symbols[layer + 1];
        let n = self.model.n_states();
        let mut probability = vec![0.0; n];
        let mut backpointer = vec![0; n];
        for s_to in 0..n {
            let emit = self.model.emission(s_to, obs_sym);
            let (arg, best) = self.best_predecessor(&f.probability, s_to, emit);
            probability[s_to] = best;
            backpointer[s_to] = arg;
        }
        ViterbiColumn {
            probability,
            backpointer,
        }
    }
}

/// Index of the first maximal value (strict `>` scan, ties keep the lower
/// index). Returns 0 for an empty slice.
#[inline]
pub fn argmax_first(values: &[f64]) -> usize {
    let mut best_s = 0;
    let mut best = f64::NEG_INFINITY;
    for (s, &v) in values.iter().enumerate() {
        if v > best {
            best = v;
            best_s = s;
        }
    }
    best_s
}

/// Most probable hidden-state path, one state per observation.
pub fn decode(model: &Model, observations: &ObservationSequence) -> Vec<usize> {
    viterbi(model, observations).states
}

/// Most probable hidden-state path and its probability.
pub fn viterbi(model: &Model, observations: &ObservationSequence) -> ViterbiPath {
    ViterbiProblem::new(model, observations).solve()
}
