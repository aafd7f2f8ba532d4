//! Generic layered DP engine.
//!
//! The engine drives a [`LayeredProblem`] from its initial frontier through
//! every layer. Two modes are offered:
//! 1. [`DpEngine::run`] keeps the whole table, for algorithms that need to
//!    look back (backtracking, pairing forward with backward values).
//! 2. [`DpEngine::last_frontier`] keeps two frontiers live and returns only
//!    the final one.
//!
//! Each call allocates its own table; nothing is cached between calls.

use crate::traits::LayeredProblem;

/// Table-filling engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use hmm_eval::{DpEngine, LayeredProblem};
///
/// struct Powers(usize);
/// impl LayeredProblem for Powers {
///     type Frontier = u64;
///     fn num_layers(&self) -> usize {
///         self.0
///     }
///     fn init_frontier(&self) -> u64 {
///         1
///     }
///     fn forward_step(&self, _layer: usize, f: &u64) -> u64 {
///         f * 2
///     }
/// }
///
/// let table = DpEngine::new(Powers(4)).run();
/// assert_eq!(table, vec![1, 2, 4, 8]);
/// ```
pub struct DpEngine<P: LayeredProblem> {
    problem: P,
}

impl<P: LayeredProblem> DpEngine<P> {
    pub fn new(problem: P) -> Self {
        Self { problem }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn into_problem(self) -> P {
        self.problem
    }

    /// Fill the full table: entry `i` is the frontier at layer `i`.
    ///
    /// Returns an empty table when the problem has no layers.
    pub fn run(&self) -> Vec<P::Frontier> {
        let t = self.problem.num_layers();
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("dp_run", layers = t);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if t == 0 {
            return Vec::new();
        }

        let mut table = Vec::with_capacity(t);
        table.push(self.problem.init_frontier());
        for layer in 0..t - 1 {
            #[cfg(feature = "tracing")]
            tracing::trace!(layer, "forward_step");
            let next = self.problem.forward_step(layer, &table[layer]);
            table.push(next);
        }
        table
    }

    /// Run every layer keeping only the current frontier; returns layer
    /// `T-1`, or `None` when the problem has no layers.
    pub fn last_frontier(&self) -> Option<P::Frontier> {
        let t = self.problem.num_layers();
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("dp_last_frontier", layers = t);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if t == 0 {
            return None;
        }

        let mut frontier = self.problem.init_frontier();
        for layer in 0..t - 1 {
            frontier = self.problem.forward_step(layer, &frontier);
        }
        Some(frontier)
    }
}

#[cfg(test)]
mod tests {
    use super::DpEngine;
    use crate::traits::LayeredProblem;

    /// Fibonacci pairs: a two-wide frontier with a known closed form.
    struct Fib {
        layers: usize,
    }

    impl LayeredProblem for Fib {
        type Frontier = (u64, u64);

        fn num_layers(&self) -> usize {
            self.layers
        }

        fn init_frontier(&self) -> Self::Frontier {
            (0, 1)
        }

        fn forward_step(&self, _layer: usize, f: &Self::Frontier) -> Self::Frontier {
            (f.1, f.0 + f.1)
        }
    }

    /// Records the layer index it was called with.
    struct LayerEcho(usize);

    impl LayeredProblem for LayerEcho {
        type Frontier = Vec<usize>;

        fn num_layers(&self) -> usize {
            self.0
        }

        fn init_frontier(&self) -> Self::Frontier {
            Vec::new()
        }

        fn forward_step(&self, layer: usize, f: &Self::Frontier) -> Self::Frontier {
            let mut next = f.clone();
            next.push(layer);
            next
        }
    }

    #[test]
    fn zero_layers_is_empty() {
        let engine = DpEngine::new(Fib { layers: 0 });
        assert!(engine.run().is_empty());
        assert!(engine.last_frontier().is_none());
    }

    #[test]
    fn single_layer_is_init_frontier() {
        let engine = DpEngine::new(Fib { layers: 1 });
        assert_eq!(engine.run(), vec![(0, 1)]);
        assert_eq!(engine.last_frontier(), Some((0, 1)));
    }

    #[test]
    fn table_has_one_entry_per_layer() {
        let table = DpEngine::new(Fib { layers: 10 }).run();
        assert_eq!(table.len(), 10);
        assert_eq!(table[9], (34, 55));
    }

    #[test]
    fn last_frontier_matches_table_tail() {
        for layers in 1..20 {
            let engine = DpEngine::new(Fib { layers });
            let table = engine.run();
            assert_eq!(engine.last_frontier().as_ref(), table.last());
        }
    }

    #[test]
    fn steps_are_visited_in_order() {
        let table = DpEngine::new(LayerEcho(4)).run();
        assert_eq!(table[3], vec![0, 1, 2]);
        let engine = DpEngine::new(LayerEcho(4));
        assert_eq!(engine.problem().0, 4);
        assert_eq!(engine.into_problem().0, 4);
    }
}
