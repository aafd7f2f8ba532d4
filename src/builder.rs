use crate::error::{HmmError, Result};
use crate::model::Model;
use crate::utils::{resolve_state, MAX_ALPHABET_SIZE};
use std::collections::HashMap;

/// Incremental, invariant-checking construction of a [`Model`].
///
/// Every probability starts at zero. The builder rejects transitions out of
/// the end state or into the begin state, emissions from either silent state,
/// and probabilities that are not finite values in `[0, 1]`.
pub struct ModelBuilder {
    state_names: Vec<String>,
    state_index: HashMap<String, usize>,
    alphabet_size: usize,
    transition: Vec<Vec<f64>>,
    emission: Vec<Vec<f64>>,
}

impl ModelBuilder {
    /// Start a model over the given states; the first is begin, the last end.
    pub fn new<I, S>(state_names: I, alphabet_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state_names: Vec<String> = state_names.into_iter().map(Into::into).collect();
        let n = state_names.len();
        if n < 2 {
            return Err(HmmError::InvalidModel(format!(
                "at least a begin and an end state are required, got {n} state(s)"
            )));
        }
        if alphabet_size > MAX_ALPHABET_SIZE {
            return Err(HmmError::InvalidModel(format!(
                "alphabet size {alphabet_size} exceeds the {MAX_ALPHABET_SIZE} letters a..z"
            )));
        }

        let mut state_index = HashMap::with_capacity(n);
        for (i, name) in state_names.iter().enumerate() {
            if state_index.insert(name.clone(), i).is_some() {
                return Err(HmmError::InvalidModel(format!(
                    "duplicate state name '{name}'"
                )));
            }
        }

        Ok(Self {
            state_names,
            state_index,
            alphabet_size,
            transition: vec![vec![0.0; n]; n],
            emission: vec![vec![0.0; alphabet_size]; n],
        })
    }

    pub fn with_transition(mut self, from: usize, to: usize, prob: f64) -> Result<Self> {
        self.set_transition(from, to, prob)?;
        Ok(self)
    }

    pub fn with_emission(mut self, state: usize, symbol: usize, prob: f64) -> Result<Self> {
        self.set_emission(state, symbol, prob)?;
        Ok(self)
    }

    pub fn set_transition(&mut self, from: usize, to: usize, prob: f64) -> Result<()> {
        let n = self.n_states();
        if from >= n || to >= n {
            return Err(HmmError::InvalidModel(format!(
                "transition {from} -> {to} is outside the {n} states"
            )));
        }
        if from + 1 == n {
            return Err(HmmError::InvalidModel(
                "transition from the end state is forbidden".into(),
            ));
        }
        if to == 0 {
            return Err(HmmError::InvalidModel(
                "transition to the begin state is forbidden".into(),
            ));
        }
        self.transition[from][to] = check_probability(prob)?;
        Ok(())
    }

    pub fn set_emission(&mut self, state: usize, symbol: usize, prob: f64) -> Result<()> {
        let n = self.n_states();
        if state >= n {
            return Err(HmmError::InvalidModel(format!(
                "emitting state {state} is outside the {n} states"
            )));
        }
        if state == 0 || state + 1 == n {
            return Err(HmmError::InvalidModel(
                "symbol emission from the begin or the end state is forbidden".into(),
            ));
        }
        if symbol >= self.alphabet_size {
            return Err(HmmError::InvalidModel(format!(
                "symbol {symbol} is outside the alphabet of size {}",
                self.alphabet_size
            )));
        }
        self.emission[state][symbol] = check_probability(prob)?;
        Ok(())
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.state_names.len()
    }

    pub(crate) fn require_state(&self, name: &str) -> Result<usize> {
        resolve_state(&self.state_index, name)
    }

    pub fn build(self) -> Model {
        Model {
            state_names: self.state_names,
            state_index: self.state_index,
            alphabet_size: self.alphabet_size,
            transition: self.transition,
            emission: self.emission,
        }
    }
}

fn check_probability(prob: f64) -> Result<f64> {
    if prob.is_finite() && (0.0..=1.0).contains(&prob) {
        Ok(prob)
    } else {
        Err(HmmError::InvalidModel(format!(
            "probability {prob} is outside [0, 1]"
        )))
    }
}
