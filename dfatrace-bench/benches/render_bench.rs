//! Graph preparation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfatrace_core::load_str;
use dfatrace_render::{prepare, to_dot};

fn wide_definition(states: usize) -> String {
    let names: Vec<String> = (0..states).map(|i| format!("s{}", i)).collect();
    let mut text = format!(
        "ALPHABET: a-z 0-9\nSTATES: {}\nINITIAL_STATE: s0\nFINAL_STATES: s0\nTRANSITIONS:\n",
        names.join(" ")
    );
    for i in 0..states {
        text.push_str(&format!("s{} a-z s{}\n", i, (i + 1) % states));
        text.push_str(&format!("s{} 0-9 s{}\n", i, (i + 2) % states));
    }
    text
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");

    for states in [8, 64] {
        let automaton = load_str(&wide_definition(states)).unwrap();
        let input: String = "a0".chars().cycle().take(256).collect();
        let trace = automaton.validate(&input).unwrap().trace;

        group.bench_with_input(BenchmarkId::new("static", states), &automaton, |b, a| {
            b.iter(|| black_box(prepare(a, None)))
        });
        group.bench_with_input(BenchmarkId::new("traced", states), &automaton, |b, a| {
            b.iter(|| black_box(prepare(a, Some(&trace))))
        });
    }

    group.finish();
}

fn bench_to_dot(c: &mut Criterion) {
    let automaton = load_str(&wide_definition(64)).unwrap();
    let graph = prepare(&automaton, None);

    c.bench_function("to_dot_64", |b| b.iter(|| black_box(to_dot(&graph))));
}

criterion_group!(benches, bench_prepare, bench_to_dot);
criterion_main!(benches);
