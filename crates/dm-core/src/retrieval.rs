//! Retrieval
//!
//! Chunks matching a pattern compete on activation:
//!
//! 1. Keep chunks whose slots contain every slot of the pattern
//! 2. Draw one activation (with noise) per candidate
//! 3. The best candidate above the threshold `rt` wins
//!
//! The same activations give each candidate a retrieval probability via a
//! softmax at temperature `t`, and blending averages a numeric slot over
//! the candidates, weighted by those probabilities.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::activation::{chunk_activation, latency_from_activation, ActivationInput};
use crate::chunk::{Chunk, SlotValue, Slots};
use crate::error::{DmError, Result};

/// Candidate buffer: chunk and its drawn activation.
type Candidates<'a> = SmallVec<[(&'a Chunk, f64); 16]>;

/// Outcome of a single retrieval attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Retrieval {
	/// Retrieved chunk, or `None` on retrieval failure
	pub chunk: Option<Chunk>,
	/// Winning activation, or the threshold `rt` on failure
	pub activation: f64,
	/// Time the retrieval (or the failure) takes
	pub latency: f64,
}

impl Retrieval {
	/// Whether a chunk was retrieved.
	#[must_use]
	pub const fn is_success(&self) -> bool {
		self.chunk.is_some()
	}
}

/// A matching chunk with its share of the retrieval probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetrievalCandidate {
	/// Chunk name
	pub name: String,
	/// Activation drawn for this evaluation
	pub activation: f64,
	/// Softmax probability (0-1)
	pub probability: f64,
}

// ============================================================================
// Matching
// ============================================================================

/// Whether `candidate` has every slot of `pattern` with an equal value.
///
/// Extra slots on the candidate are ignored; an empty pattern matches
/// everything.
#[must_use]
pub fn matches(candidate: &Chunk, pattern: &Slots) -> bool {
	pattern
		.iter()
		.all(|(slot, value)| candidate.slot(slot) == Some(value))
}

/// Draw an activation for every matching chunk, in memory order.
///
/// Only matching chunks consume noise. The first chunk whose activation is
/// undefined aborts the whole draw.
fn candidate_activations<'a, R: Rng + ?Sized>(
	input: &ActivationInput<'a>,
	pattern: &Slots,
	rng: &mut R,
) -> Result<Candidates<'a>> {
	let mut candidates = Candidates::new();
	for chunk in input.memory.iter().filter(|chunk| matches(chunk, pattern)) {
		let activation = chunk_activation(input, chunk, rng)?;
		candidates.push((chunk, activation.total));
	}
	Ok(candidates)
}

// ============================================================================
// Retrieval
// ============================================================================

/// Retrieve the most active chunk matching `pattern`.
///
/// Starts from the threshold `rt` and keeps a candidate only if its
/// activation is strictly higher than the best so far, so ties go to the
/// chunk stored first. The reported latency uses the winning activation as
/// drawn, or `rt` when nothing beats the threshold.
///
/// # Errors
///
/// Returns [`DmError::ActivationUndefined`] if a matching chunk has no
/// encounter before `input.at_time`.
#[instrument(skip_all, fields(pattern = ?pattern, at_time = input.at_time))]
pub fn retrieve<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	pattern: &Slots,
	rng: &mut R,
) -> Result<Retrieval> {
	let params = input.params;
	let candidates = candidate_activations(input, pattern, rng)?;

	let mut best: Option<&Chunk> = None;
	let mut best_activation = params.rt;
	for (chunk, activation) in candidates {
		if activation > best_activation {
			best = Some(chunk);
			best_activation = activation;
		}
	}

	let latency = latency_from_activation(best_activation, params);
	match best {
		Some(chunk) => debug!(
			chunk = chunk.name(),
			activation = best_activation,
			latency,
			"retrieved"
		),
		None => debug!(latency, "retrieval failure"),
	}

	Ok(Retrieval {
		chunk: best.cloned(),
		activation: best_activation,
		latency,
	})
}

// ============================================================================
// Retrieval Probability
// ============================================================================

/// Softmax of activations at temperature `t`.
///
/// `P(i) = e^(A_i/t) / Σ e^(A_j/t)`
///
/// Shifted by the maximum activation before exponentiating so large
/// activations cannot overflow.
///
/// ```
/// use dm_core::retrieval::softmax;
///
/// let p = softmax(&[1.0, 1.0], 0.5);
/// assert!((p[0] - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn softmax(activations: &[f64], temperature: f64) -> Vec<f64> {
	let max = activations
		.iter()
		.copied()
		.fold(f64::NEG_INFINITY, f64::max);

	let weights: Vec<f64> = activations
		.iter()
		.map(|a| ((a - max) / temperature).exp())
		.collect();
	let total: f64 = weights.iter().sum();

	weights.into_iter().map(|w| w / total).collect()
}

/// Retrieval probability of every chunk matching `pattern`, in memory order.
///
/// Draws one fresh activation per matching chunk. The probabilities sum to 1
/// whenever at least one chunk matches.
///
/// # Errors
///
/// Returns [`DmError::ActivationUndefined`] if a matching chunk has no
/// encounter before `input.at_time`.
pub fn retrieval_probabilities<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	pattern: &Slots,
	rng: &mut R,
) -> Result<Vec<RetrievalCandidate>> {
	let candidates = candidate_activations(input, pattern, rng)?;
	let activations: SmallVec<[f64; 16]> = candidates.iter().map(|&(_, a)| a).collect();
	let probabilities = softmax(&activations, input.params.t);

	Ok(candidates
		.into_iter()
		.zip(probabilities)
		.map(|((chunk, activation), probability)| RetrievalCandidate {
			name: chunk.name().to_string(),
			activation,
			probability,
		})
		.collect())
}

/// Retrieval probability of the chunk named `name` among chunks matching
/// `pattern`.
///
/// Activations are drawn fresh, independent of any earlier [`retrieve`].
///
/// # Errors
///
/// - [`DmError::UnknownChunk`] if `name` is not in memory
/// - [`DmError::PatternMismatch`] if the chunk does not match `pattern`
/// - [`DmError::ActivationUndefined`] if it, or any other matching chunk,
///   has no encounter before `input.at_time`
pub fn retrieval_probability<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	name: &str,
	pattern: &Slots,
	rng: &mut R,
) -> Result<f64> {
	let chunk = input
		.memory
		.get(name)
		.ok_or_else(|| DmError::UnknownChunk(name.to_string()))?;
	if !matches(chunk, pattern) {
		return Err(DmError::PatternMismatch {
			name: name.to_string(),
		});
	}

	retrieval_probabilities(input, pattern, rng)?
		.into_iter()
		.find(|candidate| candidate.name == name)
		.map(|candidate| candidate.probability)
		.ok_or_else(|| DmError::ActivationUndefined {
			name: name.to_string(),
			time: input.at_time,
		})
}

// ============================================================================
// Blending
// ============================================================================

/// Value of `slot` if it takes part in blending.
fn blend_value<'c>(chunk: &'c Chunk, slot: &str) -> Option<&'c SlotValue> {
	chunk.slot(slot).filter(|value| value.is_truthy())
}

/// Blend the numeric value of `slot` across chunks matching `pattern`.
///
/// `Σ P(i) · v_i` over matching chunks with a truthy value `v_i` in `slot`,
/// where `P(i)` is the retrieval probability of chunk `i` among *all*
/// chunks matching `pattern`. A matching chunk without a usable value still
/// takes its share of probability, pulling the result towards 0.
///
/// # Returns
///
/// `None` when no matching chunk has a truthy value in `slot`.
///
/// # Errors
///
/// - [`DmError::BlendInput`] if a truthy value in `slot` is not numeric. No
///   noise is drawn in that case.
/// - [`DmError::ActivationUndefined`] if a matching chunk has no encounter
///   before `input.at_time`
#[instrument(skip_all, fields(pattern = ?pattern, slot, at_time = input.at_time))]
pub fn retrieve_blended_trace<R: Rng + ?Sized>(
	input: &ActivationInput<'_>,
	pattern: &Slots,
	slot: &str,
	rng: &mut R,
) -> Result<Option<f64>> {
	let mut eligible = 0_usize;
	for chunk in input.memory.iter().filter(|chunk| matches(chunk, pattern)) {
		let Some(value) = blend_value(chunk, slot) else {
			continue;
		};
		if value.as_number().is_none() {
			return Err(DmError::BlendInput {
				chunk: chunk.name().to_string(),
				slot: slot.to_string(),
			});
		}
		eligible += 1;
	}

	if eligible == 0 {
		debug!("nothing to blend");
		return Ok(None);
	}

	let candidates = candidate_activations(input, pattern, rng)?;
	let activations: SmallVec<[f64; 16]> = candidates.iter().map(|&(_, a)| a).collect();
	let probabilities = softmax(&activations, input.params.t);

	let blended: f64 = candidates
		.iter()
		.zip(probabilities)
		.filter_map(|(&(chunk, _), p)| {
			blend_value(chunk, slot)
				.and_then(SlotValue::as_number)
				.map(|value| p * value)
		})
		.sum();

	debug!(blended, eligible, candidates = candidates.len(), "blended trace");
	Ok(Some(blended))
}
