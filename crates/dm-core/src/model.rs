//! Model
//!
//! A simulated session: a declarative memory, a caller-driven clock, an
//! optional goal, the session parameters and the random source for noise.
//!
//! Encounters are always recorded at the current clock value, and every
//! activation query is evaluated at the current clock value with the
//! current goal.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::activation::{
	compute_activation, latency_from_activation, ActivationBreakdown, ActivationInput,
};
use crate::chunk::{Chunk, Slots};
use crate::error::{DmError, Result};
use crate::memory::DeclarativeMemory;
use crate::params::ModelParams;
use crate::retrieval::{self, Retrieval, RetrievalCandidate};

/// A simulated mind with declarative memory.
#[derive(Clone, Debug)]
pub struct Model<R = StdRng> {
	time: f64,
	goal: Option<String>,
	params: ModelParams,
	dm: DeclarativeMemory,
	rng: R,
}

impl Model<StdRng> {
	/// Create a model with an entropy-seeded random source.
	///
	/// # Errors
	///
	/// Returns [`DmError::InvalidParameter`] if `params` fail validation.
	pub fn new(params: ModelParams) -> Result<Self> {
		Self::with_rng(params, StdRng::from_entropy())
	}

	/// Create a model whose noise is reproducible from `seed`.
	///
	/// # Errors
	///
	/// Returns [`DmError::InvalidParameter`] if `params` fail validation.
	pub fn seeded(params: ModelParams, seed: u64) -> Result<Self> {
		Self::with_rng(params, StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> Model<R> {
	/// Create a model drawing noise from `rng`.
	///
	/// # Errors
	///
	/// Returns [`DmError::InvalidParameter`] if `params` fail validation.
	pub fn with_rng(params: ModelParams, rng: R) -> Result<Self> {
		params.validate()?;
		debug!(?params, "model created");

		Ok(Self {
			time: 0.0,
			goal: None,
			params,
			dm: DeclarativeMemory::new(),
			rng,
		})
	}

	// ------------------------------------------------------------------------
	// Clock
	// ------------------------------------------------------------------------

	/// Current simulated time.
	#[must_use]
	pub const fn time(&self) -> f64 {
		self.time
	}

	/// Move the clock to `time`.
	///
	/// # Errors
	///
	/// Returns [`DmError::TimeReversal`] if `time` is earlier than the
	/// current time or NaN.
	pub fn set_time(&mut self, time: f64) -> Result<()> {
		if time.is_nan() || time < self.time {
			return Err(DmError::TimeReversal {
				current: self.time,
				requested: time,
			});
		}
		self.time = time;
		Ok(())
	}

	/// Move the clock forward by `dt`.
	///
	/// # Errors
	///
	/// Returns [`DmError::TimeReversal`] if `dt` is negative or NaN.
	pub fn advance_time(&mut self, dt: f64) -> Result<()> {
		self.set_time(self.time + dt)
	}

	// ------------------------------------------------------------------------
	// Goal
	// ------------------------------------------------------------------------

	/// The current goal chunk, if any.
	#[must_use]
	pub fn goal(&self) -> Option<&Chunk> {
		self.goal.as_deref().and_then(|name| self.dm.get(name))
	}

	/// Make the stored chunk `name` the goal.
	///
	/// # Errors
	///
	/// Returns [`DmError::UnknownChunk`] if `name` is not in memory.
	pub fn set_goal(&mut self, name: &str) -> Result<()> {
		if !self.dm.contains(name) {
			return Err(DmError::UnknownChunk(name.to_string()));
		}
		self.goal = Some(name.to_string());
		Ok(())
	}

	/// Remove the goal.
	pub fn clear_goal(&mut self) {
		self.goal = None;
	}

	// ------------------------------------------------------------------------
	// Memory
	// ------------------------------------------------------------------------

	/// Session parameters.
	#[must_use]
	pub const fn params(&self) -> &ModelParams {
		&self.params
	}

	/// Declarative memory.
	#[must_use]
	pub const fn dm(&self) -> &DeclarativeMemory {
		&self.dm
	}

	/// Record an encounter with `chunk` at the current time.
	///
	/// # Errors
	///
	/// Returns [`DmError::Conflict`] if a chunk of the same name with
	/// different slots is already stored.
	pub fn add_encounter(&mut self, chunk: &Chunk) -> Result<()> {
		self.dm.add_encounter(chunk, self.time)
	}

	/// Forget every chunk and the goal. The clock keeps running.
	pub fn clear_memory(&mut self) {
		self.dm.clear();
		self.goal = None;
	}

	// ------------------------------------------------------------------------
	// Activation
	// ------------------------------------------------------------------------

	/// Activation of `name` now, split into its components.
	///
	/// # Errors
	///
	/// - [`DmError::UnknownChunk`] if `name` is not in memory
	/// - [`DmError::ActivationUndefined`] if it has no earlier encounter
	pub fn activation_breakdown(&mut self, name: &str) -> Result<ActivationBreakdown> {
		let (input, rng) = self.split();
		compute_activation(&input, name, rng)
	}

	/// Activation of `name` now, with fresh noise.
	///
	/// # Errors
	///
	/// Same as [`Self::activation_breakdown`].
	pub fn get_activation(&mut self, name: &str) -> Result<f64> {
		self.activation_breakdown(name).map(|a| a.total)
	}

	/// Retrieval latency of `name` now, with fresh noise.
	///
	/// # Errors
	///
	/// Same as [`Self::activation_breakdown`].
	pub fn get_latency(&mut self, name: &str) -> Result<f64> {
		let activation = self.get_activation(name)?;
		Ok(latency_from_activation(activation, &self.params))
	}

	// ------------------------------------------------------------------------
	// Retrieval
	// ------------------------------------------------------------------------

	/// Retrieve the most active chunk matching `pattern`.
	///
	/// # Errors
	///
	/// Returns [`DmError::ActivationUndefined`] if a matching chunk has no
	/// earlier encounter.
	pub fn retrieve(&mut self, pattern: &Slots) -> Result<Retrieval> {
		let (input, rng) = self.split();
		retrieval::retrieve(&input, pattern, rng)
	}

	/// Probability that `name` is the one retrieved for `pattern`.
	///
	/// # Errors
	///
	/// - [`DmError::UnknownChunk`] if `name` is not in memory
	/// - [`DmError::PatternMismatch`] if it does not match `pattern`
	/// - [`DmError::ActivationUndefined`] if a matching chunk has no earlier
	///   encounter
	pub fn get_retrieval_probability(&mut self, name: &str, pattern: &Slots) -> Result<f64> {
		let (input, rng) = self.split();
		retrieval::retrieval_probability(&input, name, pattern, rng)
	}

	/// Retrieval probabilities of every chunk matching `pattern`.
	///
	/// # Errors
	///
	/// Returns [`DmError::ActivationUndefined`] if a matching chunk has no
	/// earlier encounter.
	pub fn retrieval_probabilities(&mut self, pattern: &Slots) -> Result<Vec<RetrievalCandidate>> {
		let (input, rng) = self.split();
		retrieval::retrieval_probabilities(&input, pattern, rng)
	}

	/// Probability-weighted sum of the numeric `slot` over chunks matching
	/// `pattern`.
	///
	/// # Errors
	///
	/// - [`DmError::BlendInput`] if a truthy `slot` value is not numeric
	/// - [`DmError::ActivationUndefined`] if a matching chunk has no earlier
	///   encounter
	pub fn retrieve_blended_trace(&mut self, pattern: &Slots, slot: &str) -> Result<Option<f64>> {
		let (input, rng) = self.split();
		retrieval::retrieve_blended_trace(&input, pattern, slot, rng)
	}

	/// Borrow the activation inputs and the random source separately.
	fn split(&mut self) -> (ActivationInput<'_>, &mut R) {
		let goal = self.goal.as_deref().and_then(|name| self.dm.get(name));
		let input = ActivationInput {
			memory: &self.dm,
			goal,
			params: &self.params,
			at_time: self.time,
		};
		(input, &mut self.rng)
	}
}

impl<R> fmt::Display for Model<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "=== Model ===")?;
		writeln!(f, "Time: {} s", self.time)?;
		writeln!(f, "Goal: {}", self.goal.as_deref().unwrap_or("None"))?;
		writeln!(f, "DM:")?;
		for chunk in self.dm.iter() {
			write!(f, "{chunk}")?;
		}
		Ok(())
	}
}
