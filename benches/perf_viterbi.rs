use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hmm_eval::problems::viterbi::ViterbiProblem;
use hmm_eval::{Model, ModelBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_obs(rng: &mut StdRng, len: usize, vocab: usize) -> Vec<usize> {
    (0..len).map(|_| rng.gen_range(0..vocab)).collect()
}

fn demo_model() -> Model {
    ModelBuilder::new(["begin", "A", "B", "end"], 2)
        .and_then(|b| b.with_transition(0, 1, 0.5))
        .and_then(|b| b.with_transition(0, 2, 0.5))
        .and_then(|b| b.with_transition(1, 1, 0.9))
        .and_then(|b| b.with_transition(1, 2, 0.1))
        .and_then(|b| b.with_transition(2, 1, 0.2))
        .and_then(|b| b.with_transition(2, 2, 0.8))
        .and_then(|b| b.with_emission(1, 0, 0.8))
        .and_then(|b| b.with_emission(1, 1, 0.2))
        .and_then(|b| b.with_emission(2, 0, 0.3))
        .and_then(|b| b.with_emission(2, 1, 0.7))
        .unwrap()
        .build()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = sys.process(get_current_pid().unwrap()) {
        p.memory()
    } else {
        0
    }
}

fn bench_viterbi_perf(c: &mut Criterion) {
    let model = demo_model();
    let mut group = c.benchmark_group("viterbi_perf");
    // long inputs underflow to zero probability; the table work is unchanged
    for &len in &[1_000usize, 10_000, 50_000] {
        group.bench_function(format!("viterbi_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(44);
                    random_obs(&mut rng, len, 2)
                },
                |obs| {
                    let before = rss_kib();
                    let path = ViterbiProblem::from_symbols(&model, obs).solve();
                    let after = rss_kib();
                    criterion::black_box(path.probability);
                    eprintln!(
                        "RSS KiB delta (viterbi {len}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_viterbi_perf);
criterion_main!(benches);
