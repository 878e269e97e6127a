//! Benchmarks for program execution and the search loop.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use stack_evolve::{
    schema::{GenomeConfig, SearchConfig, TestCase},
    search::{Genome, GenomeRng, SearchEngine},
    vm::execute,
};

/// Alternating push/operator chain of exactly `length` genes (length odd,
/// at least 3).
fn chain_genes(length: usize) -> Vec<u8> {
    let mut genes = vec![1, 2, 4];
    while genes.len() < length {
        genes.extend_from_slice(&[3, 4]);
    }
    genes
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for length in [5usize, 17, 65] {
        let program = Genome::new(chain_genes(length)).decode().expect("in vocabulary");

        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, _| {
            b.iter(|| execute(black_box(&program), black_box([2.0, 3.0, 4.0])));
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for max_length in [8usize, 32, 128] {
        let config = GenomeConfig {
            max_length,
            ..GenomeConfig::default()
        };
        let mut rng = GenomeRng::new(42);

        group.bench_with_input(
            BenchmarkId::from_parameter(max_length),
            &max_length,
            |b, _| {
                b.iter(|| rng.generate(black_box(&config)));
            },
        );
    }

    group.finish();
}

fn bench_search_exhausted(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_exhausted");

    // Contradictory cases keep the loop running to its full budget.
    let suite = vec![
        TestCase::new(1.0, 1.0, 1.0, 1.0),
        TestCase::new(1.0, 1.0, 1.0, 2.0),
    ];

    for population in [20usize, 100] {
        let config = SearchConfig {
            population_size: population,
            generation_count: 50,
            random_seed: Some(42),
            ..SearchConfig::default()
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, _| {
                b.iter(|| {
                    let mut engine = SearchEngine::new(config.clone(), suite.clone())
                        .expect("valid config");
                    black_box(engine.run())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_execute,
    bench_generate,
    bench_search_exhausted
);
criterion_main!(benches);
