//! Discrete hidden Markov model description.
//!
//! States are dense indices `0..N`. State `0` is the silent *begin* state and
//! state `N - 1` the silent *end* state; neither emits, nothing enters the
//! begin state and nothing leaves the end state. Models are built through
//! [`ModelBuilder`] (directly or via the text loader) which enforces these
//! invariants, and are read-only afterwards.

use crate::builder::ModelBuilder;
use crate::error::{HmmError, Result};
use crate::utils::{resolve_state, resolve_symbol, Tokens};
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

/// Hidden Markov model with discrete states and emissions.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub(crate) state_names: Vec<String>,
    pub(crate) state_index: HashMap<String, usize>,
    pub(crate) alphabet_size: usize,
    /// transition probabilities [s_from][s_to]
    pub(crate) transition: Vec<Vec<f64>>,
    /// emission probabilities [s][symbol]
    pub(crate) emission: Vec<Vec<f64>>,
}

impl Model {
    /// Number of states, begin and end included.
    #[inline]
    pub fn n_states(&self) -> usize {
        self.transition.len()
    }

    #[inline]
    pub fn begin_state(&self) -> usize {
        0
    }

    #[inline]
    pub fn end_state(&self) -> usize {
        self.n_states() - 1
    }

    #[inline]
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Probability of moving from `from` to `to`.
    #[inline]
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from][to]
    }

    /// Probability that `state` emits `symbol`.
    #[inline]
    pub fn emission(&self, state: usize, symbol: usize) -> f64 {
        self.emission[state][symbol]
    }

    /// Full transition matrix, row-indexed by source state.
    pub fn transitions(&self) -> &[Vec<f64>] {
        &self.transition
    }

    /// Full emission matrix, row-indexed by state.
    pub fn emissions(&self) -> &[Vec<f64>] {
        &self.emission
    }

    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.state_index.get(name).copied()
    }

    pub fn state_name(&self, index: usize) -> Option<&str> {
        self.state_names.get(index).map(String::as_str)
    }

    pub fn state_names(&self) -> &[String] {
        &self.state_names
    }

    /// Resolve a state name, failing with [`HmmError::UnknownState`].
    pub(crate) fn require_state(&self, name: &str) -> Result<usize> {
        resolve_state(&self.state_index, name)
    }

    /// Resolve a symbol token against this model's alphabet.
    pub(crate) fn require_symbol(&self, token: &str) -> Result<usize> {
        resolve_symbol(token, self.alphabet_size)
    }

    /// Read a model description in the text format:
    ///
    /// ```text
    /// <nstates> <name>...
    /// <alphabet size>
    /// <ntransitions> (<from> <to> <prob>)...
    /// <nemissions> (<state> <symbol> <prob>)...
    /// ```
    ///
    /// Tokens are whitespace separated; line breaks carry no meaning.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }
}

impl FromStr for Model {
    type Err = HmmError;

    fn from_str(text: &str) -> Result<Self> {
        let mut tokens = Tokens::new(text);

        let n_states = tokens.next_usize("state count")?;
        let mut names = Vec::new();
        for _ in 0..n_states {
            names.push(tokens.next_str("state name")?);
        }
        let alphabet_size = tokens.next_usize("alphabet size")?;
        let mut builder = ModelBuilder::new(names, alphabet_size)?;

        let n_transitions = tokens.next_usize("transition count")?;
        for _ in 0..n_transitions {
            let from = tokens.next_str("transition source state")?;
            let to = tokens.next_str("transition target state")?;
            let prob = tokens.next_f64("transition probability")?;
            let from = builder.require_state(from)?;
            let to = builder.require_state(to)?;
            builder.set_transition(from, to, prob)?;
        }

        let n_emissions = tokens.next_usize("emission count")?;
        for _ in 0..n_emissions {
            let state = tokens.next_str("emitting state")?;
            let symbol = tokens.next_str("emitted symbol")?;
            let prob = tokens.next_f64("emission probability")?;
            let state = builder.require_state(state)?;
            let symbol = resolve_symbol(symbol, alphabet_size)?;
            builder.set_emission(state, symbol, prob)?;
        }

        let model = builder.build();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            states = model.n_states(),
            alphabet = model.alphabet_size(),
            transitions = n_transitions,
            emissions = n_emissions,
            "model loaded"
        );
        Ok(model)
    }
}
