//! Spreading Activation Example
//!
//! The classic fan effect: facts about a person who appears in many facts
//! are recalled more slowly than facts about a person who appears in few.
//! Putting a concept in the goal spreads activation to every chunk that
//! mentions it, and the spread shrinks as the concept's fan grows.
//!
//! Run with: `cargo run --example spreading_activation`

use dm_core::{slots, Chunk, Model, ModelParams};

fn main() -> anyhow::Result<()> {
	println!("=== Spreading Activation (Fan Effect) ===\n");

	let params = ModelParams {
		mas: 2.0,
		ga: 1.0,
		rt: -5.0,
		..Default::default()
	};
	let mut model = Model::seeded(params, 7)?;

	// The hippie is in three places, the captain in one
	let facts = [
		("f1", "hippie", "park"),
		("f2", "hippie", "church"),
		("f3", "hippie", "bank"),
		("f4", "captain", "cave"),
	];
	for (name, person, place) in facts {
		model.add_encounter(&Chunk::new(
			name,
			slots([("person", person), ("location", place)]),
		))?;
	}
	model.advance_time(30.0)?;

	for person in ["hippie", "captain"] {
		let fan = model.dm().get(person).map_or(0, Chunk::fan);

		// The goal cues the person without itself matching the request
		let goal_name = format!("thinking-of-{person}");
		model.add_encounter(&Chunk::new(goal_name.as_str(), slots([("cue", person)])))?;
		model.set_goal(&goal_name)?;

		let result = model.retrieve(&slots([("person", person)]))?;
		let winner = result.chunk.as_ref().map_or("(failure)", Chunk::name);
		let breakdown = model.activation_breakdown(winner)?;

		println!(
			"{person:<8} fan = {fan}  spreading = {:.3}  retrieved {winner} in {:.3} s",
			breakdown.spreading, result.latency
		);
		model.clear_goal();
	}

	println!("\nLower fan → more spreading activation → faster recall.");
	Ok(())
}
