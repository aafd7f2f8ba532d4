//! Prediction estimation against ground truth.
//!
//! Provides the per-step state choice from forward/backward products, the
//! predicted-by-real confusion matrix and per-state TP/FP/TN/FN counts with
//! F-measure.

use crate::model::Model;
use crate::observation::ObservationSequence;
use crate::problems::forward_backward::AlphaBeta;
use crate::problems::viterbi::argmax_first;

/// Per-state estimation of a prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictionEstimation {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
    pub f_measure: f64,
}

/// Square confusion matrix over model states.
///
/// Entry `(i, j)` counts time steps whose **predicted** state is `i` and
/// whose **real** state is `j`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Row-major storage: `counts[predicted * n_states + real]`.
    counts: Vec<usize>,
    n_states: usize,
}

impl ConfusionMatrix {
    /// Count `(predicted, real)` pairs.
    ///
    /// # Panics
    /// Panics if the label slices differ in length or a label is not below
    /// `n_states`.
    pub fn from_labels(real: &[usize], predicted: &[usize], n_states: usize) -> Self {
        assert_eq!(
            real.len(),
            predicted.len(),
            "real and predicted labels must have equal length"
        );
        let mut counts = vec![0usize; n_states * n_states];
        for (&r, &p) in real.iter().zip(predicted) {
            assert!(r < n_states && p < n_states, "label outside 0..{n_states}");
            counts[p * n_states + r] += 1;
        }
        Self { counts, n_states }
    }

    /// Confusion of `predicted` against the true states of `observations`.
    pub fn combine(observations: &ObservationSequence, predicted: &[usize], model: &Model) -> Self {
        Self::from_labels(&observations.true_states(), predicted, model.n_states())
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Count for a `(predicted, real)` pair.
    #[inline]
    pub fn get(&self, predicted: usize, real: usize) -> usize {
        self.counts[predicted * self.n_states + real]
    }

    /// Row `predicted` of the matrix.
    pub fn row(&self, predicted: usize) -> &[usize] {
        let start = predicted * self.n_states;
        &self.counts[start..start + self.n_states]
    }

    /// Number of steps predicted as `state`.
    pub fn row_sum(&self, state: usize) -> usize {
        self.row(state).iter().sum()
    }

    /// Number of steps whose real state is `state`.
    pub fn col_sum(&self, state: usize) -> usize {
        (0..self.n_states).map(|i| self.get(i, state)).sum()
    }

    /// Total number of counted steps.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Estimation for a single state.
    ///
    /// Precision and recall fall back to 0 on an empty row/column and the
    /// F-measure is 0 when both are empty. When exactly one side is empty
    /// both precision and recall are 0 and the F-measure is `0/0`, i.e. NaN.
    pub fn estimation(&self, state: usize) -> PredictionEstimation {
        let row_sum = self.row_sum(state);
        let col_sum = self.col_sum(state);
        let tp = self.get(state, state);
        let total = self.total();

        let precision = if row_sum > 0 {
            tp as f64 / row_sum as f64
        } else {
            0.0
        };
        let recall = if col_sum > 0 {
            tp as f64 / col_sum as f64
        } else {
            0.0
        };
        let f_measure = if row_sum == 0 && col_sum == 0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        PredictionEstimation {
            true_positives: tp,
            false_positives: row_sum - tp,
            true_negatives: total + tp - row_sum - col_sum,
            false_negatives: col_sum - tp,
            f_measure,
        }
    }

    /// Estimations for every state, indexed by state.
    pub fn estimations(&self) -> Vec<PredictionEstimation> {
        (0..self.n_states).map(|s| self.estimation(s)).collect()
    }
}

/// Most probable state at each step: `argmax_s alpha[t][s] * beta[t][s]`,
/// ties resolved to the lowest state index.
pub fn most_probable_states(forward_backward: &[Vec<AlphaBeta>]) -> Vec<usize> {
    forward_backward
        .iter()
        .map(|row| {
            let products: Vec<f64> = row.iter().map(AlphaBeta::product).collect();
            argmax_first(&products)
        })
        .collect()
}

/// Confusion matrix of `predicted` against the true states.
pub fn confusion_matrix(
    observations: &ObservationSequence,
    predicted: &[usize],
    model: &Model,
) -> ConfusionMatrix {
    ConfusionMatrix::combine(observations, predicted, model)
}

/// Per-state estimations derived from a confusion matrix.
pub fn state_prediction_estimations(matrix: &ConfusionMatrix) -> Vec<PredictionEstimation> {
    matrix.estimations()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab(alpha: f64, beta: f64) -> AlphaBeta {
        AlphaBeta { alpha, beta }
    }

    #[test]
    fn cm_counts_predicted_by_real() {
        let cm = ConfusionMatrix::from_labels(&[1, 1, 2, 2], &[1, 2, 2, 2], 4);
        assert_eq!(cm.get(1, 1), 1);
        assert_eq!(cm.get(2, 1), 1);
        assert_eq!(cm.get(2, 2), 2);
        assert_eq!(cm.get(1, 2), 0);
        assert_eq!(cm.total(), 4);
        assert_eq!(cm.row_sum(2), 3);
        assert_eq!(cm.col_sum(1), 2);
        assert_eq!(cm.row(0), &[0, 0, 0, 0]);
    }

    #[test]
    fn cm_estimation_counts() {
        // predicted:  1 2 2 2, real: 1 1 2 2
        let cm = ConfusionMatrix::from_labels(&[1, 1, 2, 2], &[1, 2, 2, 2], 4);
        let a = cm.estimation(1);
        assert_eq!(
            (a.true_positives, a.false_positives, a.true_negatives, a.false_negatives),
            (1, 0, 2, 1)
        );
        // precision 1, recall 1/2
        assert!((a.f_measure - 2.0 / 3.0).abs() < 1e-12);
        let b = cm.estimation(2);
        assert_eq!(
            (b.true_positives, b.false_positives, b.true_negatives, b.false_negatives),
            (2, 1, 1, 0)
        );
        // precision 2/3, recall 1
        assert!((b.f_measure - 0.8).abs() < 1e-12);
    }

    #[test]
    fn absent_state_scores_zero() {
        let cm = ConfusionMatrix::from_labels(&[1, 2], &[1, 2], 4);
        let begin = cm.estimation(0);
        assert_eq!(begin.f_measure, 0.0);
        assert_eq!(begin.true_negatives, 2);
        assert_eq!(begin.true_positives + begin.false_positives + begin.false_negatives, 0);
    }

    #[test]
    fn one_sided_empty_state_is_nan() {
        // state 2 predicted once, never real: precision = recall = 0.
        let cm = ConfusionMatrix::from_labels(&[1, 1], &[1, 2], 4);
        assert!(cm.estimation(2).f_measure.is_nan());
        // state 1 real twice, predicted once correctly.
        assert!((cm.estimation(1).f_measure - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn counts_partition_every_step() {
        let real = [1, 2, 3, 1, 2, 2, 1];
        let predicted = [1, 1, 3, 2, 2, 0, 1];
        let cm = ConfusionMatrix::from_labels(&real, &predicted, 4);
        for e in cm.estimations() {
            assert_eq!(
                e.true_positives + e.false_positives + e.true_negatives + e.false_negatives,
                real.len()
            );
        }
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn mismatched_lengths_panic() {
        let _ = ConfusionMatrix::from_labels(&[1, 2], &[1], 3);
    }

    #[test]
    fn most_probable_picks_largest_product() {
        let fb = vec![
            vec![ab(0.0, 1.0), ab(0.2, 0.5), ab(0.3, 0.5), ab(0.0, 0.0)],
            vec![ab(0.0, 1.0), ab(0.4, 0.5), ab(0.1, 2.0), ab(0.0, 0.0)],
            vec![ab(0.0, 0.0), ab(0.0, 0.0), ab(0.0, 0.0), ab(0.0, 0.0)],
        ];
        // row 1 ties at 0.2: lowest index wins; row 2 is all zero.
        assert_eq!(most_probable_states(&fb), vec![2, 1, 0]);
    }
}
