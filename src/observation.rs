//! Observed experiment data: emitted symbols paired with the true hidden
//! states that produced them.

use crate::error::{HmmError, Result};
use crate::model::Model;
use crate::utils::Tokens;
use std::io::Read;

/// One observed time step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub time: usize,
    /// Ground-truth hidden state.
    pub state: usize,
    /// Emitted symbol index.
    pub symbol: usize,
}

/// Non-empty, time-ordered observations resolved against a [`Model`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservationSequence {
    records: Vec<Observation>,
}

impl ObservationSequence {
    /// Validate `records` against `model`.
    ///
    /// Requirements: at least one record, `time` equal to the record's
    /// position, states within `0..N` and symbols within the alphabet.
    pub fn new(model: &Model, records: Vec<Observation>) -> Result<Self> {
        if records.is_empty() {
            return Err(HmmError::InvalidObservations(
                "at least one observation is required".into(),
            ));
        }
        for (position, rec) in records.iter().enumerate() {
            if rec.time != position {
                return Err(HmmError::InvalidObservations(format!(
                    "record {position} has time {}, expected {position}",
                    rec.time
                )));
            }
            if rec.state >= model.n_states() {
                return Err(HmmError::InvalidObservations(format!(
                    "record {position} has state {} outside the {} model states",
                    rec.state,
                    model.n_states()
                )));
            }
            if rec.symbol >= model.alphabet_size() {
                return Err(HmmError::InvalidObservations(format!(
                    "record {position} has symbol {} outside the alphabet of size {}",
                    rec.symbol,
                    model.alphabet_size()
                )));
            }
        }
        Ok(Self { records })
    }

    /// Build from `(true_state, symbol)` pairs, numbering time from 0.
    pub fn from_pairs<I>(model: &Model, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let records = pairs
            .into_iter()
            .enumerate()
            .map(|(time, (state, symbol))| Observation {
                time,
                state,
                symbol,
            })
            .collect();
        Self::new(model, records)
    }

    /// Parse experiment data: `<nsteps> (<time> <state name> <symbol>)...`.
    pub fn parse(model: &Model, text: &str) -> Result<Self> {
        let mut tokens = Tokens::new(text);
        let n_steps = tokens.next_usize("step count")?;
        // grows with the records actually read; the count is untrusted
        let mut records = Vec::new();
        for _ in 0..n_steps {
            let time = tokens.next_usize("step number")?;
            let state = model.require_state(tokens.next_str("state name")?)?;
            let symbol = model.require_symbol(tokens.next_str("emitted symbol")?)?;
            records.push(Observation {
                time,
                state,
                symbol,
            });
        }
        let sequence = Self::new(model, records)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(steps = sequence.len(), "experiment data loaded");
        Ok(sequence)
    }

    pub fn from_reader<R: Read>(model: &Model, mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(model, &text)
    }

    /// Number of time steps `T` (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    pub fn symbols(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.symbol).collect()
    }

    pub fn true_states(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.state).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ObservationSequence {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
