//! Run both inference algorithms over one experiment and estimate each.

use crate::estimation::{most_probable_states, ConfusionMatrix, PredictionEstimation};
use crate::model::Model;
use crate::observation::ObservationSequence;
use crate::problems::forward_backward::forward_backward;
use crate::problems::viterbi::decode;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Viterbi,
    ForwardBackward,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Viterbi => write!(f, "viterbi"),
            Algorithm::ForwardBackward => write!(f, "forward-backward"),
        }
    }
}

/// Predictions of one algorithm and their estimation.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmReport {
    pub algorithm: Algorithm,
    /// Predicted state per time step.
    pub predicted: Vec<usize>,
    pub confusion: ConfusionMatrix,
    /// Indexed by state.
    pub estimations: Vec<PredictionEstimation>,
}

impl AlgorithmReport {
    pub fn new(
        algorithm: Algorithm,
        model: &Model,
        observations: &ObservationSequence,
        predicted: Vec<usize>,
    ) -> Self {
        let confusion = ConfusionMatrix::combine(observations, &predicted, model);
        let estimations = confusion.estimations();
        Self {
            algorithm,
            predicted,
            confusion,
            estimations,
        }
    }

    /// Fraction of steps whose predicted state is the real one.
    pub fn accuracy(&self) -> f64 {
        let total = self.confusion.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.confusion.n_states())
            .map(|s| self.confusion.get(s, s))
            .sum();
        correct as f64 / total as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub viterbi: AlgorithmReport,
    pub forward_backward: AlgorithmReport,
}

impl Evaluation {
    pub fn reports(&self) -> [&AlgorithmReport; 2] {
        [&self.viterbi, &self.forward_backward]
    }
}

pub fn run_viterbi(model: &Model, observations: &ObservationSequence) -> AlgorithmReport {
    let predicted = decode(model, observations);
    AlgorithmReport::new(Algorithm::Viterbi, model, observations, predicted)
}

pub fn run_forward_backward(model: &Model, observations: &ObservationSequence) -> AlgorithmReport {
    let predicted = most_probable_states(&forward_backward(model, observations));
    AlgorithmReport::new(Algorithm::ForwardBackward, model, observations, predicted)
}

/// Decode with both algorithms and estimate each against the true states.
#[cfg(feature = "parallel")]
pub fn evaluate(model: &Model, observations: &ObservationSequence) -> Evaluation {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("evaluate", steps = observations.len(), parallel = true);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let (viterbi, forward_backward) = rayon::join(
        || run_viterbi(model, observations),
        || run_forward_backward(model, observations),
    );
    Evaluation {
        viterbi,
        forward_backward,
    }
}

/// Decode with both algorithms and estimate each against the true states.
#[cfg(not(feature = "parallel"))]
pub fn evaluate(model: &Model, observations: &ObservationSequence) -> Evaluation {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("evaluate", steps = observations.len(), parallel = false);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    Evaluation {
        viterbi: run_viterbi(model, observations),
        forward_backward: run_forward_backward(model, observations),
    }
}
