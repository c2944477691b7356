//! Range expansion, loading and validation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dfatrace_core::{expand, load_str, Automaton};

fn identifier_definition() -> String {
    "\
ALPHABET: a-z A-Z 0-9 _
STATES: start ident number error
INITIAL_STATE: start
FINAL_STATES: ident number
TRANSITIONS:
start a-z,A-Z,_ ident
start 0-9 number
ident a-z,A-Z,0-9,_ ident
number 0-9 number
number a-z,A-Z,_ error
"
    .to_string()
}

/// A chain q0 -> q1 -> ... over the lowercase alphabet.
fn chain_definition(states: usize) -> String {
    let names: Vec<String> = (0..states).map(|i| format!("q{}", i)).collect();
    let mut text = format!(
        "ALPHABET: a-z\nSTATES: {}\nINITIAL_STATE: q0\nFINAL_STATES: q{}\nTRANSITIONS:\n",
        names.join(" "),
        states - 1
    );
    for i in 0..states {
        text.push_str(&format!("q{} a-z q{}\n", i, (i + 1) % states));
    }
    text
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_expand");

    group.bench_function("single_range", |b| {
        b.iter(|| black_box(expand(black_box("a-z")).unwrap()))
    });

    group.bench_function("mixed", |b| {
        b.iter(|| black_box(expand(black_box("a-z, A-Z 0-9 _ $ @ - +")).unwrap()))
    });

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("loader");

    let identifier = identifier_definition();
    group.bench_function("identifier", |b| {
        b.iter(|| black_box(load_str(black_box(&identifier)).unwrap()))
    });

    for states in [10, 100] {
        let text = chain_definition(states);
        group.bench_with_input(BenchmarkId::new("chain", states), &text, |b, text| {
            b.iter(|| black_box(load_str(text).unwrap()))
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let automaton: Automaton = load_str(&identifier_definition()).unwrap();

    for len in [16, 256, 4096] {
        let input: String = "a1_Z".chars().cycle().take(len).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("accepted", len), &input, |b, input| {
            b.iter(|| black_box(automaton.validate(input).unwrap()))
        });
    }

    // Dead state after the first symbol: cost is dominated by the alphabet check.
    let dead: String = std::iter::once('9')
        .chain("a".chars().cycle().take(4095))
        .collect();
    group.bench_function("dead_state_4096", |b| {
        b.iter(|| black_box(automaton.validate(&dead).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_expand, bench_load, bench_validate);
criterion_main!(benches);
