//! Example: decode a small weather HMM with both algorithms.
//!
//! Run with:
//! `cargo run --example viterbi`

use hmm_eval::{
    forward_backward, most_probable_states, viterbi, ConfusionMatrix, Model, ObservationSequence,
};

const MODEL: &str = include_str!("data/weather.model");
const DATA: &str = include_str!("data/weather.data");

fn main() -> Result<(), hmm_eval::HmmError> {
    // States: begin, Sunny, Rainy, end
    // Symbols: a = walk, b = shop, c = clean
    let model: Model = MODEL.parse()?;
    let obs = ObservationSequence::parse(&model, DATA)?;

    let best = viterbi(&model, &obs);
    println!("Best path probability: {:e}", best.probability);
    println!("State sequence:");
    for (rec, &s) in obs.iter().zip(&best.states) {
        println!(
            "  t = {:2}, predicted = {:<6} real = {}",
            rec.time,
            model.state_name(s).unwrap_or("?"),
            model.state_name(rec.state).unwrap_or("?")
        );
    }

    let marginal = most_probable_states(&forward_backward(&model, &obs));
    for (label, predicted) in [("viterbi", &best.states), ("forward-backward", &marginal)] {
        let cm = ConfusionMatrix::combine(&obs, predicted, &model);
        println!("{label}:");
        for (s, e) in cm.estimations().iter().enumerate() {
            println!(
                "  {:<6} TP={} FP={} TN={} FN={} F={:.3}",
                model.state_name(s).unwrap_or("?"),
                e.true_positives,
                e.false_positives,
                e.true_negatives,
                e.false_negatives,
                e.f_measure
            );
        }
    }
    Ok(())
}
