//! Error types for declarative memory operations.

/// Errors that can occur while recording encounters or computing activation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DmError {
	/// A chunk name was re-encountered with different slot content.
	#[error("chunk `{name}` already exists with different slots")]
	Conflict {
		/// Name of the conflicting chunk
		name: String,
	},

	/// The named chunk is not in declarative memory.
	#[error("chunk `{0}` does not exist in declarative memory")]
	UnknownChunk(String),

	/// The chunk has no encounter strictly before the query time.
	#[error("chunk `{name}` has no encounter before time {time}")]
	ActivationUndefined {
		/// Name of the chunk
		name: String,
		/// Query time
		time: f64,
	},

	/// A blended slot holds a non-numeric value.
	#[error("slot `{slot}` of chunk `{chunk}` is not numeric and cannot be blended")]
	BlendInput {
		/// Chunk holding the offending value
		chunk: String,
		/// Slot being blended
		slot: String,
	},

	/// Retrieval probability was asked for a chunk outside the matching set.
	#[error("chunk `{name}` does not match the retrieval pattern")]
	PatternMismatch {
		/// Name of the chunk
		name: String,
	},

	/// The simulated clock would move backwards.
	#[error("cannot move simulated time from {current} to {requested}")]
	TimeReversal {
		/// Clock value before the request
		current: f64,
		/// Requested clock value
		requested: f64,
	},

	/// A model parameter is outside its valid range.
	#[error("invalid value {value} for parameter `{name}`")]
	InvalidParameter {
		/// Parameter name (`d`, `s`, `lf`, ...)
		name: &'static str,
		/// Rejected value
		value: f64,
	},
}

impl DmError {
	/// Check if this error comes from inconsistent chunk definitions.
	#[must_use]
	pub const fn is_input_conflict(&self) -> bool {
		matches!(self, Self::Conflict { .. })
	}

	/// Check if this error is a failed lookup (missing chunk or no usable history).
	#[must_use]
	pub const fn is_lookup_failure(&self) -> bool {
		matches!(
			self,
			Self::UnknownChunk(_) | Self::ActivationUndefined { .. } | Self::PatternMismatch { .. }
		)
	}
}

/// Result type alias for declarative memory operations.
pub type Result<T> = std::result::Result<T, DmError>;
