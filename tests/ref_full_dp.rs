use hmm_eval::{
    decode, forward_backward, sequence_probability, viterbi, AlphaBeta, Model, ModelBuilder,
    ObservationSequence,
};
use proptest::prelude::*;

/// Random model honouring the begin/end rules: 2..=5 states, 1..=3 symbols.
fn model_strategy() -> impl Strategy<Value = Model> {
    (2usize..=5, 1usize..=3)
        .prop_flat_map(|(n, k)| {
            (
                Just(n),
                Just(k),
                prop::collection::vec(0.0f64..1.0, n * n),
                prop::collection::vec(0.0f64..1.0, n * k),
            )
        })
        .prop_map(|(n, k, trans, emit)| {
            let names: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
            let mut b = ModelBuilder::new(names, k).unwrap();
            for from in 0..n - 1 {
                for to in 1..n {
                    b.set_transition(from, to, trans[from * n + to]).unwrap();
                }
            }
            for s in 1..n - 1 {
                for sym in 0..k {
                    b.set_emission(s, sym, emit[s * k + sym]).unwrap();
                }
            }
            b.build()
        })
}

fn case_strategy() -> impl Strategy<Value = (Model, Vec<(usize, usize)>)> {
    model_strategy().prop_flat_map(|m| {
        let n = m.n_states();
        let k = m.alphabet_size();
        let pairs = prop::collection::vec((0..n, 0..k), 1..=6);
        (Just(m), pairs)
    })
}

/// Probability of one explicit path, multiplied in DP order.
fn path_probability(m: &Model, symbols: &[usize], path: &[usize]) -> f64 {
    let mut p = m.transition(0, path[0]) * m.emission(path[0], symbols[0]);
    for t in 1..path.len() {
        p = p * m.transition(path[t - 1], path[t]) * m.emission(path[t], symbols[t]);
    }
    p
}

/// Every state sequence of length `t` over `n` states.
fn all_paths(n: usize, t: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::with_capacity(n.pow(t as u32));
    let mut cur = vec![0usize; t];
    loop {
        out.push(cur.clone());
        let mut i = t;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            cur[i] += 1;
            if cur[i] < n {
                break;
            }
            cur[i] = 0;
        }
    }
}

fn rel_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()) + 1e-300
}

#[test]
fn all_paths_enumerates_every_sequence() {
    let paths = all_paths(3, 2);
    assert_eq!(paths.len(), 9);
    assert_eq!(paths.first(), Some(&vec![0, 0]));
    assert_eq!(paths.last(), Some(&vec![2, 2]));
}

proptest! {
    #[test]
    fn viterbi_matches_exhaustive_maximum((model, pairs) in case_strategy()) {
        let obs = ObservationSequence::from_pairs(&model, pairs).unwrap();
        let symbols = obs.symbols();
        let best = all_paths(model.n_states(), symbols.len())
            .iter()
            .map(|p| path_probability(&model, &symbols, p))
            .fold(0.0f64, f64::max);

        let decoded = viterbi(&model, &obs);
        prop_assert_eq!(decoded.states.len(), obs.len());
        prop_assert!(decoded.states.iter().all(|&s| s < model.n_states()));
        prop_assert!(rel_close(decoded.probability, best));
        prop_assert!(rel_close(path_probability(&model, &symbols, &decoded.states), best));
    }

    #[test]
    fn forward_matches_exhaustive_sum((model, pairs) in case_strategy()) {
        let obs = ObservationSequence::from_pairs(&model, pairs).unwrap();
        let symbols = obs.symbols();
        let total: f64 = all_paths(model.n_states(), symbols.len())
            .iter()
            .map(|p| path_probability(&model, &symbols, p))
            .sum();

        let fb = forward_backward(&model, &obs);
        let last: f64 = fb[fb.len() - 1].iter().map(|c| c.alpha).sum();
        prop_assert!(rel_close(last, total));
        prop_assert!(rel_close(sequence_probability(&model, &obs), total));
    }

    #[test]
    fn alpha_beta_product_sums_are_constant((model, pairs) in case_strategy()) {
        let obs = ObservationSequence::from_pairs(&model, pairs).unwrap();
        let fb = forward_backward(&model, &obs);
        prop_assert_eq!(fb.len(), obs.len());
        let total = sequence_probability(&model, &obs);
        for row in &fb {
            prop_assert_eq!(row.len(), model.n_states());
            let s: f64 = row.iter().map(AlphaBeta::product).sum();
            prop_assert!(rel_close(s, total));
        }
        prop_assert!(fb[fb.len() - 1].iter().all(|c| c.beta == 1.0));
    }

    #[test]
    fn decoding_is_deterministic((model, pairs) in case_strategy()) {
        let obs = ObservationSequence::from_pairs(&model, pairs).unwrap();
        prop_assert_eq!(decode(&model, &obs), decode(&model, &obs));
        let a = forward_backward(&model, &obs);
        let b = forward_backward(&model, &obs);
        for (ra, rb) in a.iter().zip(&b) {
            for (ca, cb) in ra.iter().zip(rb) {
                prop_assert_eq!(ca.alpha.to_bits(), cb.alpha.to_bits());
                prop_assert_eq!(ca.beta.to_bits(), cb.beta.to_bits());
            }
        }
    }

    #[test]
    fn single_step_is_best_start((model, pairs) in case_strategy()) {
        let pairs = vec![pairs[0]];
        let obs = ObservationSequence::from_pairs(&model, pairs).unwrap();
        let sym = obs.symbols()[0];
        let scores: Vec<f64> = (0..model.n_states())
            .map(|s| model.transition(0, s) * model.emission(s, sym))
            .collect();
        let mut expected = 0;
        for (s, &v) in scores.iter().enumerate() {
            if v > scores[expected] {
                expected = s;
            }
        }
        prop_assert_eq!(decode(&model, &obs), vec![expected]);
    }
}
