//! Declarative Memory Store
//!
//! Owns every chunk, keyed by name, in insertion order.
//!
//! Recording an encounter with a chunk also records an encounter with
//! every chunk its slots refer to, creating slot-less chunks for values
//! seen for the first time. Every value that can act as a source of
//! spreading activation is therefore itself a chunk with a history and
//! a fan.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::chunk::{Chunk, SlotValue, Slots};
use crate::error::{DmError, Result};

/// Name-indexed, insertion-ordered chunk store.
#[derive(Clone, Debug, Default)]
pub struct DeclarativeMemory {
	chunks: Vec<Chunk>,
	index: HashMap<String, usize>,
}

impl DeclarativeMemory {
	/// Create an empty store.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Record an encounter with `chunk` at `time`.
	///
	/// Creates the chunk if its name is new, then cascades an encounter to
	/// every chunk named by one of its slot values and refreshes all fans.
	///
	/// # Errors
	///
	/// Returns [`DmError::Conflict`] if a chunk with the same name but
	/// different slots is already stored. Nothing is modified in that case.
	pub fn add_encounter(&mut self, chunk: &Chunk, time: f64) -> Result<()> {
		if let Some(stored) = self.get(chunk.name()) {
			if stored.slots() != chunk.slots() {
				return Err(DmError::Conflict {
					name: chunk.name().to_string(),
				});
			}
		}

		self.record(chunk.name(), chunk.slots(), time);
		for value in chunk.slots().values() {
			// An already stored reference keeps its own slots.
			self.record(&value.chunk_name(), &Slots::new(), time);
		}

		self.recompute_fan();
		Ok(())
	}

	/// Look up a chunk by name.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Chunk> {
		self.index.get(name).map(|&pos| &self.chunks[pos])
	}

	/// Whether a chunk with this name is stored.
	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Chunks in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
		self.chunks.iter()
	}

	/// Chunk names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.chunks.iter().map(Chunk::name)
	}

	/// Number of stored chunks.
	#[must_use]
	pub fn len(&self) -> usize {
		self.chunks.len()
	}

	/// Whether the store is empty.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}

	/// Remove every chunk.
	pub fn clear(&mut self) {
		self.chunks.clear();
		self.index.clear();
	}

	/// Fan of `name` computed by scanning every other chunk's slots.
	///
	/// Stored fans always equal this value once [`Self::add_encounter`]
	/// returns.
	#[must_use]
	pub fn brute_force_fan(&self, name: &str) -> usize {
		self.chunks
			.iter()
			.filter(|other| other.name() != name && other.references(name))
			.count()
	}

	/// Add an encounter to `name`, inserting it with `slots` when absent.
	fn record(&mut self, name: &str, slots: &Slots, time: f64) {
		let pos = if let Some(&pos) = self.index.get(name) {
			pos
		} else {
			debug!(chunk = name, time, "new chunk");
			let pos = self.chunks.len();
			self.chunks.push(Chunk::new(name, slots.clone()));
			let _ = self.index.insert(name.to_string(), pos);
			pos
		};

		trace!(chunk = name, time, "encounter");
		self.chunks[pos].add_encounter(time);
	}

	/// Count, for every chunk, the distinct other chunks referencing it.
	fn recompute_fan(&mut self) {
		let mut fans = vec![0usize; self.chunks.len()];

		for chunk in &self.chunks {
			let referenced: HashSet<String> = chunk
				.slots()
				.values()
				.map(SlotValue::chunk_name)
				.filter(|name| name != chunk.name())
				.collect();

			for name in &referenced {
				if let Some(&pos) = self.index.get(name) {
					fans[pos] += 1;
				}
			}
		}

		for (chunk, fan) in self.chunks.iter_mut().zip(fans) {
			chunk.set_fan(fan);
		}
	}
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	use super::*;
	use crate::chunk::slots;

	fn animal(name: &str) -> Chunk {
		Chunk::new(name, slots([("category", "animal")]))
	}

	#[test]
	fn test_reencounter_same_slots() {
		let mut dm = DeclarativeMemory::new();
		dm.add_encounter(&animal("dog"), 0.0).unwrap();
		dm.add_encounter(&animal("dog"), 1.0).unwrap();
		dm.add_encounter(&animal("dog"), 1.0).unwrap();

		assert_eq!(dm.get("dog").unwrap().encounters(), &[0.0, 1.0]);
	}

	#[test]
	fn test_reencounter_different_slots_conflicts() {
		let mut dm = DeclarativeMemory::new();
		dm.add_encounter(&animal("dog"), 0.0).unwrap();

		let impostor = Chunk::new("dog", slots([("category", "plant")]));
		let err = dm.add_encounter(&impostor, 1.0).unwrap_err();
		assert_eq!(
			err,
			DmError::Conflict {
				name: "dog".to_string()
			}
		);

		// Committed slots and history are untouched
		let dog = dm.get("dog").unwrap();
		assert_eq!(dog.slot("category"), Some(&SlotValue::from("animal")));
		assert_eq!(dog.encounters(), &[0.0]);
		assert!(!dm.contains("plant"));
	}

	#[test]
	fn test_referenced_values_become_chunks() {
		let mut dm = DeclarativeMemory::new();
		dm.add_encounter(&animal("dog"), 2.0).unwrap();

		let category = dm.get("animal").unwrap();
		assert!(category.slots().is_empty());
		assert_eq!(category.encounters(), &[2.0]);
		assert_eq!(dm.names().collect::<Vec<_>>(), vec!["dog", "animal"]);
	}

	#[test]
	fn test_numeric_values_become_chunks() {
		let mut dm = DeclarativeMemory::new();
		let trial = Chunk::new("trial1", slots([("rt", 10)]));
		dm.add_encounter(&trial, 0.0).unwrap();

		assert_eq!(dm.get("10").unwrap().fan(), 1);
	}

	#[test]
	fn test_reference_to_existing_chunk_keeps_its_slots() {
		let mut dm = DeclarativeMemory::new();
		dm.add_encounter(&animal("dog"), 0.0).unwrap();

		let fido = Chunk::new("fido", slots([("isa", "dog")]));
		dm.add_encounter(&fido, 3.0).unwrap();

		let dog = dm.get("dog").unwrap();
		assert_eq!(dog.slot("category"), Some(&SlotValue::from("animal")));
		assert_eq!(dog.encounters(), &[0.0, 3.0]);
		assert_eq!(dog.fan(), 1);
	}

	#[test]
	fn test_fan_counts_referencing_chunks() {
		let mut dm = DeclarativeMemory::new();
		for name in ["dog", "cat", "cow"] {
			dm.add_encounter(&animal(name), 0.0).unwrap();
		}

		assert_eq!(dm.get("animal").unwrap().fan(), 3);
		assert_eq!(dm.get("dog").unwrap().fan(), 0);
	}

	#[test]
	fn test_fan_counts_chunk_once_per_referrer() {
		let mut dm = DeclarativeMemory::new();
		let pair = Chunk::new("pair", slots([("left", "x"), ("right", "x")]));
		dm.add_encounter(&pair, 0.0).unwrap();

		assert_eq!(dm.get("x").unwrap().fan(), 1);
	}

	#[test]
	fn test_self_reference_is_not_fan() {
		let mut dm = DeclarativeMemory::new();
		let ouroboros = Chunk::new("loop", slots([("next", "loop")]));
		dm.add_encounter(&ouroboros, 0.0).unwrap();

		assert_eq!(dm.len(), 1);
		assert_eq!(dm.get("loop").unwrap().fan(), 0);
	}

	#[test]
	fn test_fan_matches_brute_force() {
		let mut rng = StdRng::seed_from_u64(42);
		let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
		let mut dm = DeclarativeMemory::new();
		let mut defined: HashMap<String, Chunk> = HashMap::new();

		for step in 0..200_u32 {
			let name = format!("n{}", rng.gen_range(0..30));
			let chunk = defined
				.entry(name.clone())
				.or_insert_with(|| {
					// Already stored as a reference target: keep its empty slots
					if let Some(stored) = dm.get(&name) {
						return Chunk::new(name, stored.slots().clone());
					}
					let width = rng.gen_range(0..4);
					let pairs = (0..width).map(|i| {
						let target = if rng.gen_bool(0.3) {
							format!("n{}", rng.gen_range(0..30))
						} else {
							names[rng.gen_range(0..names.len())].to_string()
						};
						(format!("s{i}"), target)
					});
					Chunk::new(name, slots(pairs))
				})
				.clone();

			dm.add_encounter(&chunk, f64::from(step)).unwrap();

			for stored in dm.iter() {
				assert_eq!(stored.fan(), dm.brute_force_fan(stored.name()));
			}
		}
	}

	#[test]
	fn test_clear() {
		let mut dm = DeclarativeMemory::new();
		dm.add_encounter(&animal("dog"), 0.0).unwrap();
		dm.clear();
		assert!(dm.is_empty());
		assert!(dm.get("dog").is_none());
	}
}
