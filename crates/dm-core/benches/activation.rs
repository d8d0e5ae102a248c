//! Benchmarks for activation computation
//!
//! Tests performance of:
//! - Base-level activation (power-law decay over encounter histories)
//! - Fan-weighted spreading activation from a goal
//! - Logistic noise draws

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dm_core::{
	compute_base_level, logistic_noise, slots, spreading_activation, Chunk, DeclarativeMemory,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate an encounter history spread over the last `span` time units
fn generate_encounters(rng: &mut StdRng, count: usize, current_time: f64, span: f64) -> Vec<f64> {
	let mut encounters: Vec<f64> = (0..count)
		.map(|_| rng.gen::<f64>().mul_add(-span, current_time))
		.collect();
	encounters.sort_by(f64::total_cmp);
	encounters
}

/// Fill memory with chunks sharing a small pool of slot values
fn generate_memory(rng: &mut StdRng, count: usize, pool: usize) -> DeclarativeMemory {
	let mut memory = DeclarativeMemory::new();
	for i in 0..count {
		let chunk = Chunk::new(
			format!("chunk{i}"),
			slots([
				("color", format!("color{}", rng.gen_range(0..pool))),
				("shape", format!("shape{}", rng.gen_range(0..pool))),
			]),
		);
		#[allow(clippy::cast_precision_loss)]
		let _ = memory.add_encounter(&chunk, i as f64);
	}
	memory
}

fn bench_base_level_activation(c: &mut Criterion) {
	let mut group = c.benchmark_group("base_level_activation");
	let current_time = 10_000.0;
	let mut rng = StdRng::seed_from_u64(1);

	for encounter_count in &[5, 10, 20, 50, 100, 1000] {
		let encounters = generate_encounters(&mut rng, *encounter_count, current_time, 5_000.0);

		let _ = group.bench_with_input(
			BenchmarkId::new("encounters", encounter_count),
			encounter_count,
			|bench, _| {
				bench.iter(|| {
					compute_base_level(black_box(&encounters), black_box(current_time), 0.5)
				});
			},
		);
	}

	group.finish();
}

fn bench_spreading_activation(c: &mut Criterion) {
	let mut group = c.benchmark_group("spreading_activation");
	let mut rng = StdRng::seed_from_u64(2);

	for count in &[100_usize, 500, 1000] {
		let memory = generate_memory(&mut rng, *count, 20);
		let goal = Chunk::new("goal", slots([("color", "color3"), ("shape", "shape7")]));
		let targets: Vec<&Chunk> = memory.iter().collect();

		let _ = group.throughput(Throughput::Elements(*count as u64));
		let _ = group.bench_with_input(BenchmarkId::new("chunks", count), count, |bench, _| {
			bench.iter(|| {
				targets
					.iter()
					.map(|target| {
						spreading_activation(black_box(&memory), target, Some(&goal), 1.0, 2.0)
					})
					.sum::<f64>()
			});
		});
	}

	group.finish();
}

fn bench_logistic_noise(c: &mut Criterion) {
	let mut rng = StdRng::seed_from_u64(3);

	let _ = c.bench_function("logistic_noise", |bench| {
		bench.iter(|| logistic_noise(&mut rng, black_box(0.25)));
	});
}

criterion_group!(
	benches,
	bench_base_level_activation,
	bench_spreading_activation,
	bench_logistic_noise,
);

criterion_main!(benches);
