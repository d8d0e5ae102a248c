//! Chunks
//!
//! The atomic unit of declarative memory: a name, a set of slot values,
//! and the times at which the chunk was encountered.
//!
//! A chunk's name doubles as a value. When another chunk stores that name
//! in one of its slots, the two are associated, and the number of such
//! references is the chunk's *fan*.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single slot value.
///
/// Text values that name another chunk act as references to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
	/// Symbolic value or chunk reference
	Text(String),
	/// Numeric scalar (the only kind that can be blended)
	Number(f64),
}

impl SlotValue {
	/// Name of the chunk this value refers to.
	///
	/// Numbers use Rust's shortest round-trip formatting, so `10.0` names
	/// the chunk `"10"`.
	#[must_use]
	pub fn chunk_name(&self) -> String {
		self.to_string()
	}

	/// Numeric content, if any.
	#[must_use]
	pub const fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			Self::Text(_) => None,
		}
	}

	/// Non-empty text or non-zero number.
	#[must_use]
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Text(s) => !s.is_empty(),
			Self::Number(n) => *n != 0.0,
		}
	}

	/// Whether this value names the chunk `name`.
	#[must_use]
	pub fn refers_to(&self, name: &str) -> bool {
		match self {
			Self::Text(s) => s == name,
			Self::Number(_) => self.chunk_name() == name,
		}
	}
}

impl fmt::Display for SlotValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => f.write_str(s),
			Self::Number(n) => write!(f, "{n}"),
		}
	}
}

impl From<&str> for SlotValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for SlotValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<f64> for SlotValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for SlotValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

/// Slot name → value. Also used as a retrieval pattern.
pub type Slots = BTreeMap<String, SlotValue>;

/// Build a [`Slots`] map from `(name, value)` pairs.
///
/// ```
/// use dm_core::chunk::{slots, SlotValue};
///
/// let s = slots([("category", SlotValue::from("animal")), ("legs", SlotValue::from(4))]);
/// assert_eq!(s.len(), 2);
/// ```
pub fn slots<I, K, V>(pairs: I) -> Slots
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<SlotValue>,
{
	pairs
		.into_iter()
		.map(|(k, v)| (k.into(), v.into()))
		.collect()
}

/// A declarative memory chunk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
	name: String,
	slots: Slots,
	/// Strictly increasing encounter times
	encounters: Vec<f64>,
	/// Maintained by [`crate::memory::DeclarativeMemory`]
	fan: usize,
}

impl Chunk {
	/// Create a chunk with no encounters yet.
	pub fn new(name: impl Into<String>, slots: Slots) -> Self {
		Self {
			name: name.into(),
			slots,
			encounters: Vec::new(),
			fan: 0,
		}
	}

	/// Create a chunk without slots, as made for referenced values.
	pub fn singleton(name: impl Into<String>) -> Self {
		Self::new(name, Slots::new())
	}

	/// Record an encounter at `time`. Recording a time twice is a no-op.
	pub fn add_encounter(&mut self, time: f64) {
		if let Err(pos) = self
			.encounters
			.binary_search_by(|probe| probe.total_cmp(&time))
		{
			self.encounters.insert(pos, time);
		}
	}

	/// Chunk name.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// All slots.
	#[must_use]
	pub const fn slots(&self) -> &Slots {
		&self.slots
	}

	/// Value of a single slot.
	#[must_use]
	pub fn slot(&self, slot: &str) -> Option<&SlotValue> {
		self.slots.get(slot)
	}

	/// Encounter times in increasing order.
	#[must_use]
	pub fn encounters(&self) -> &[f64] {
		&self.encounters
	}

	/// Number of other chunks in memory that reference this one.
	#[must_use]
	pub const fn fan(&self) -> usize {
		self.fan
	}

	/// Whether any slot value names the chunk `name`.
	#[must_use]
	pub fn references(&self, name: &str) -> bool {
		self.slots.values().any(|v| v.refers_to(name))
	}

	pub(crate) fn set_fan(&mut self, fan: usize) {
		self.fan = fan;
	}
}

impl fmt::Display for Chunk {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Chunk {}", self.name)?;
		write!(f, "Slots: {{")?;
		for (i, (slot, value)) in self.slots.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{slot}: {value}")?;
		}
		writeln!(f, "}}")?;
		writeln!(f, "Encounters: {:?}", self.encounters)
	}
}
