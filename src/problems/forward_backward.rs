//! Forward-Backward probabilities as a pair of layered DPs.
//!
//! `alpha[t][s]` is the probability of observations `0..=t` with hidden state
//! `s` at time `t`; `beta[t][s]` the probability of observations `t+1..T`
//! given state `s` at time `t`. Neither table is normalized by the total
//! sequence probability and the backward base case does not force a
//! transition into the end state: `beta[T-1][s] = 1` for every `s`.

use crate::engine::DpEngine;
use crate::model::Model;
use crate::observation::ObservationSequence;
use crate::traits::LayeredProblem;

/// Forward and backward value for one (time, state) cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaBeta {
    pub alpha: f64,
    pub beta: f64,
}

impl AlphaBeta {
    /// Unnormalized marginal likelihood of the state at this time.
    #[inline]
    pub fn product(&self) -> f64 {
        self.alpha * self.beta
    }
}

/// Forward recursion: layer `t` is `alpha[t]`.
#[derive(Clone, Debug)]
pub struct ForwardProblem<'a> {
    pub model: &'a Model,
    pub symbols: &'a [usize],
}

/// Backward recursion: layer `i` is `beta[T-1-i]`.
#[derive(Clone, Debug)]
pub struct BackwardProblem<'a> {
    pub model: &'a Model,
    pub symbols: &'a [usize],
}

impl LayeredProblem for ForwardProblem<'_> {
    type Frontier = Vec<f64>;

    fn num_layers(&self) -> usize {
        self.symbols.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        let o0 = self.symbols[0];
        let begin = self.model.begin_state();
        (0..self.model.n_states())
            .map(|s| self.model.transition(begin, s) * self.model.emission(s, o0))
            .collect()
    }

    fn forward_step(&self, layer: usize, alpha: &Self::Frontier) -> Self::Frontier {
        let obs_sym = self.symbols[layer + 1];
        let a = self.model.transitions();
        (0..self.model.n_states())
            .map(|s_to| {
                let mut acc = 0.0;
                for (s_from, &prev) in alpha.iter().enumerate() {
                    acc += prev * a[s_from][s_to];
                }
                acc * self.model.emission(s_to, obs_sym)
            })
            .collect()
    }
}

impl LayeredProblem for BackwardProblem<'_> {
    type Frontier = Vec<f64>;

    fn num_layers(&self) -> usize {
        self.symbols.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        vec![1.0; self.model.n_states()]
    }

    fn forward_step(&self, layer: usize, beta_next: &Self::Frontier) -> Self::Frontier {
        // layer i holds time T-1-i, so this step produces time t = T-2-i
        // from beta[t+1], consuming the symbol observed at t+1.
        let t_next = self.symbols.len() - 1 - layer;
        let obs_sym = self.symbols[t_next];
        let a = self.model.transitions();
        let n = self.model.n_states();
        (0..n)
            .map(|s_from| {
                let mut acc = 0.0;
                for (s_to, &b) in beta_next.iter().enumerate() {
                    acc += a[s_from][s_to] * self.model.emission(s_to, obs_sym) * b;
                }
                acc
            })
            .collect()
    }
}

#[cfg(feature = "parallel")]
fn fill_tables(
    forward: ForwardProblem<'_>,
    backward: BackwardProblem<'_>,
) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    rayon::join(
        || DpEngine::new(forward).run(),
        || DpEngine::new(backward).run(),
    )
}

#[cfg(not(feature = "parallel"))]
fn fill_tables(
    forward: ForwardProblem<'_>,
    backward: BackwardProblem<'_>,
) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    (DpEngine::new(forward).run(), DpEngine::new(backward).run())
}

/// Forward and backward probabilities for every time step and state.
///
/// Returns `result[t][s]`, a `T × N` table of [`AlphaBeta`] pairs.
pub fn forward_backward(
    model: &Model,
    observations: &ObservationSequence,
) -> Vec<Vec<AlphaBeta>> {
    let symbols = observations.symbols();
    forward_backward_symbols(model, &symbols)
}

/// [`forward_backward`] over a bare symbol sequence.
pub fn forward_backward_symbols(model: &Model, symbols: &[usize]) -> Vec<Vec<AlphaBeta>> {
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("forward_backward", steps = symbols.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let (alpha, mut beta) = fill_tables(
        ForwardProblem { model, symbols },
        BackwardProblem { model, symbols },
    );
    beta.reverse();

    alpha
        .into_iter()
        .zip(beta)
        .map(|(a_t, b_t)| {
            a_t.into_iter()
                .zip(b_t)
                .map(|(alpha, beta)| AlphaBeta { alpha, beta })
                .collect()
        })
        .collect()
}

/// Total probability of the observed symbols, `Σ_s alpha[T-1][s]`.
///
/// Only the last forward column is kept in memory.
pub fn sequence_probability(model: &Model, observations: &ObservationSequence) -> f64 {
    let symbols = observations.symbols();
    DpEngine::new(ForwardProblem {
        model,
        symbols: &symbols,
    })
    .last_frontier()
    .map(|alpha| alpha.iter().sum())
    .unwrap_or(0.0)
}
