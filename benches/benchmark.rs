use criterion::BenchmarkId;
use criterion::Throughput;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, SamplingMode};
use dense_linear_assignment::{AssignmentProblem, DijkstraSP, SolverParams, WeightMatrix};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::Beta;

type UInt = u32;

fn gen_uniform_input(seed: u64, size: usize, min_value: f64, max_value: f64) -> WeightMatrix {
    let mut val_rng = ChaCha8Rng::seed_from_u64(seed);
    let between = Uniform::from(min_value..max_value);
    let values = (0..size * size)
        .map(|_| between.sample(&mut val_rng))
        .collect();
    WeightMatrix::from_flat(size, values).expect("uniform weights are finite")
}

fn gen_integer_input(seed: u64, size: usize, min_value: f64, range_width: f64) -> WeightMatrix {
    let mut val_rng = ChaCha8Rng::seed_from_u64(seed);
    let beta = Beta::new(3.0, 3.0).unwrap();
    let values = (0..size * size)
        .map(|_| (range_width * beta.sample(&mut val_rng) + min_value).floor())
        .collect();
    WeightMatrix::from_flat(size, values).expect("beta weights are finite")
}

fn bench_size(c: &mut Criterion, group_name: &str, max_size: usize, certify: bool) {
    let mut group = c.benchmark_group(group_name);
    group.sample_size(10);
    group.sampling_mode(SamplingMode::Flat);
    let params = SolverParams {
        tolerance: None,
        certify: Some(certify),
    };

    for size in (50..=max_size).step_by(50) {
        group.throughput(Throughput::Elements((size * size) as u64));

        let input = gen_uniform_input(size as u64, size, 500.0, 1000.0);
        let benchmark_id = BenchmarkId::new("uniform", format!("size {}", size));
        group.bench_with_input(benchmark_id, &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |matrix| {
                    AssignmentProblem::<UInt>::solve_with_params::<DijkstraSP>(
                        matrix, false, params,
                    )
                    .unwrap()
                },
                BatchSize::LargeInput,
            );
        });

        let input = gen_integer_input(size as u64, size, 300.0, 700.0);
        let benchmark_id = BenchmarkId::new("integer", format!("size {}", size));
        group.bench_with_input(benchmark_id, &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |matrix| {
                    AssignmentProblem::<UInt>::solve_with_params::<DijkstraSP>(
                        matrix, false, params,
                    )
                    .unwrap()
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_size_200(c: &mut Criterion) {
    bench_size(c, "dense", 200, false)
}

fn bench_size_100_certified(c: &mut Criterion) {
    bench_size(c, "dense_certified", 100, true)
}

criterion_group!(benches, bench_size_200, bench_size_100_certified);
criterion_main!(benches);
