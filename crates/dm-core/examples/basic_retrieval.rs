//! Basic Memory Retrieval Example
//!
//! This example demonstrates the core retrieval cycle:
//! 1. Encounter some facts at different simulated times
//! 2. Let time pass
//! 3. Retrieve by partial pattern and watch recency and frequency compete
//!
//! Run with: `cargo run --example basic_retrieval`
//! Set `RUST_LOG=dm_core=debug` to see encounters and retrievals as they happen.

use dm_core::{slots, Chunk, Model, ModelParams};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	println!("=== Basic Memory Retrieval ===\n");

	let params = ModelParams {
		rt: -1.5,
		..Default::default()
	};
	let mut model = Model::seeded(params, 2024)?;

	let capitals = [
		("paris", "france"),
		("berlin", "germany"),
		("madrid", "spain"),
	];

	// Study phase: every capital once, paris rehearsed twice more
	for (city, country) in capitals {
		model.add_encounter(&Chunk::new(city, slots([("capital-of", country)])))?;
		model.advance_time(2.0)?;
	}
	for _ in 0..2 {
		model.add_encounter(&Chunk::new("paris", slots([("capital-of", "france")])))?;
		model.advance_time(5.0)?;
	}

	// Test phase, one minute later
	model.advance_time(60.0)?;
	println!("Time: {} s\n", model.time());

	for (city, country) in capitals {
		let breakdown = model.activation_breakdown(city)?;
		let result = model.retrieve(&slots([("capital-of", country)]))?;

		println!(
			"Capital of {country:<8} B = {:>6.3}  ->  {:<10} ({:.3} s)",
			breakdown.base_level,
			result
				.chunk
				.as_ref()
				.map_or("(failure)", |chunk| chunk.name()),
			result.latency
		);
	}

	println!("\nHigher base-level activation means faster, more reliable recall.");
	Ok(())
}
