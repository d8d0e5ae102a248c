//! Blended Retrieval Example
//!
//! Instead of recalling one instance, blending averages a numeric slot over
//! every matching instance, weighted by retrieval probability. Recent and
//! frequent instances pull the estimate towards their value.
//!
//! Run with: `cargo run --example blending`

use dm_core::{slots, Chunk, Model, ModelParams, SlotValue};

fn main() -> anyhow::Result<()> {
	println!("=== Blended Retrieval ===\n");

	let params = ModelParams {
		s: 0.25,
		t: 0.5,
		..Default::default()
	};
	let mut model = Model::seeded(params, 99)?;

	// Observed commute durations in minutes
	let observations = [("mon", 30), ("tue", 45), ("wed", 35), ("thu", 50), ("fri", 40)];
	for (day, minutes) in observations {
		let chunk = Chunk::new(
			format!("commute-{day}"),
			slots([
				("kind", SlotValue::from("commute")),
				("minutes", SlotValue::from(minutes)),
			]),
		);
		model.add_encounter(&chunk)?;
		model.advance_time(24.0)?;
	}

	let pattern = slots([("kind", "commute")]);
	for candidate in model.retrieval_probabilities(&pattern)? {
		println!(
			"{:<12} activation {:>6.3}  probability {:.3}",
			candidate.name, candidate.activation, candidate.probability
		);
	}

	match model.retrieve_blended_trace(&pattern, "minutes")? {
		Some(estimate) => println!("\nBlended estimate: {estimate:.1} minutes"),
		None => println!("\nNothing to blend"),
	}
	Ok(())
}
