//! Activation Calculation
//!
//! What makes a chunk easy to remember at a given moment.
//!
//! Three components add up to a chunk's activation:
//! 1. **Base-level activation** (recency/frequency): `B = ln[Σ(t - t_k)^(-d)]`
//! 2. **Spreading activation** (goal context): `S = ga/n × Σ max(0, mas - ln fan_j)`
//! 3. **Noise**: a logistic draw with scale `s`
//!
//! Activation in turn determines how long a retrieval takes:
//! `latency = lf × e^(-le × A)`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, SlotValue};
use crate::error::{DmError, Result};
use crate::memory::DeclarativeMemory;
use crate::noise::logistic_noise;
use crate::params::ModelParams;

/// Everything activation depends on apart from the chunk itself.
#[derive(Clone, Copy, Debug)]
pub struct ActivationInput<'a> {
	/// Declarative memory holding the chunks
	pub memory: &'a DeclarativeMemory,
	/// Current goal, source of spreading activation
	pub goal: Option<&'a Chunk>,
	/// Session parameters
	pub params: &'a ModelParams,
	/// Time at which activation is evaluated
	pub at_time: f64,
}

/// Breakdown of activation components for a single chunk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationBreakdown {
	/// From encounter history: `B = ln[Σ(t - t_k)^(-d)]`
	pub base_level: f64,
	/// From the goal's slot values
	pub spreading: f64,
	/// Logistic noise drawn for this evaluation
	pub noise: f64,
	/// Combined total
	pub total: f64,
}

// ============================================================================
// Base-Level Activation
// ============================================================================

/// Compute base-level activation from encounter history.
///
/// `B = ln[Σ(t - t_k)^(-d)]`
///
/// Only encounters strictly before `at_time` count.
///
/// # Returns
///
/// `None` if no encounter precedes `at_time`.
///
/// ```
/// use dm_core::activation::compute_base_level;
///
/// // One encounter 4 time units ago: ln(4^-0.5) = ln 0.5
/// let b = compute_base_level(&[1.0], 5.0, 0.5).unwrap();
/// assert!((b - 0.5_f64.ln()).abs() < 1e-12);
/// assert!(compute_base_level(&[5.0], 5.0, 0.5).is_none());
/// ```
#[must_use]
pub fn compute_base_level(encounters: &[f64], at_time: f64, decay: f64) -> Option<f64> {
	if !encounters.iter().any(|&t| t < at_time) {
		return None;
	}

	let sum: f64 = encounters
		.iter()
		.filter(|&&t| t < at_time)
		.map(|&t| (at_time - t).powf(-decay))
		.sum();
	Some(sum.ln())
}

/// Base-level activation of a stored chunk.
///
/// # Errors
///
/// Returns [`DmError::ActivationUndefined`] if the chunk has no encounter
/// before `at_time`.
pub fn base_level_activation(chunk: &Chunk, at_time: f64, decay: f64) -> Result<f64> {
	compute_base_level(chunk.encounters(), at_time, decay).ok_or_else(|| {
		DmError::ActivationUndefined {
			name: chunk.name().to_string(),
			time: at_time,
		}
	})
}

// ============================================================================
// Spreading Activation
// ============================================================================

/// Associative strength of a source with the given fan.
///
/// `S = max(0, mas - ln(fan))`
///
/// Distinctive sources (low fan) pass on close to `mas`; sources shared by
/// many chunks pass on little or nothing.
#[inline]
#[must_use]
pub fn fan_strength(fan: usize, mas: f64) -> f64 {
	#[allow(clippy::cast_precision_loss)]
	let fan = fan as f64;
	(mas - fan.ln()).max(0.0)
}

/// Spreading activation from `goal` to `target`.
///
/// Every goal slot value that names a chunk with a non-zero fan, and that
/// `target` also refers to, contributes
/// [`fan_strength`]. The sum is divided by the goal's slot count and scaled
/// by `ga`. No goal, or a goal without slots, spreads nothing.
#[must_use]
pub fn spreading_activation(
	memory: &DeclarativeMemory,
	target: &Chunk,
	goal: Option<&Chunk>,
	ga: f64,
	mas: f64,
) -> f64 {
	let Some(goal) = goal else {
		return 0.0;
	};

	let slot_count = goal.slots().len();
	if slot_count == 0 {
		return 0.0;
	}

	let total: f64 = goal
		.slots()
		.values()
		.map(SlotValue::chunk_name)
		.filter(|source| target.references(source))
		.filter_map(|source| memory.get(&source))
		.filter(|source| source.fan() > 0)
		.map(|source| fan_strength(source.fan(), mas))
		.sum();

	#[allow(clippy::cast_precision_loss)]
	let slot_count = slot_count as f64;
	total / slot_count * ga
}

// ============================================================================
// Combined Activation
// ============================================================================

/// Compute the activation of the chunk named `name`, drawing fresh noise.
///
/// # Errors
///
/// - [`DmError::UnknownChunk`] if `name` is not in memory
/// - [`DmError::ActivationUndefined`] if it has no encounter before
///   `input.at_time`
pub fn compute_activation<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	name: &str,
	rng: &mut R,
) -> Result<ActivationBreakdown> {
	let chunk = input
		.memory
		.get(name)
		.ok_or_else(|| DmError::UnknownChunk(name.to_string()))?;

	chunk_activation(input, chunk, rng)
}

/// Activation of a chunk already borrowed from `input.memory`.
pub(crate) fn chunk_activation<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	chunk: &Chunk,
	rng: &mut R,
) -> Result<ActivationBreakdown> {
	let params = input.params;
	let base_level = base_level_activation(chunk, input.at_time, params.d)?;
	let spreading = spreading_activation(input.memory, chunk, input.goal, params.ga, params.mas);
	let noise = logistic_noise(rng, params.s);

	Ok(ActivationBreakdown {
		base_level,
		spreading,
		noise,
		total: base_level + spreading + noise,
	})
}

// ============================================================================
// Latency
// ============================================================================

/// Retrieval latency for a given activation.
///
/// `latency = lf × e^(-le × A)`
///
/// Higher activation = faster retrieval.
#[inline]
#[must_use]
pub fn latency_from_activation(activation: f64, params: &ModelParams) -> f64 {
	params.lf * (-params.le * activation).exp()
}

/// Latency of retrieving the chunk named `name`, drawing fresh noise.
///
/// # Errors
///
/// Same as [`compute_activation`].
pub fn compute_latency<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	name: &str,
	rng: &mut R,
) -> Result<f64> {
	let activation = compute_activation(input, name, rng)?;
	Ok(latency_from_activation(activation.total, input.params))
}
