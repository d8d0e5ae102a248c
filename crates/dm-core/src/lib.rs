//! # DM Core
//!
//! Simulated human declarative memory after ACT-R: what a mind recalls,
//! and how quickly, given what it has encountered and what it is currently
//! thinking about.
//!
//! ## Core Concepts
//!
//! ### Chunks and Encounters
//!
//! Memory holds *chunks*: a name plus named slot values. A slot value that
//! names another chunk links the two. Every time a chunk is encountered the
//! current simulated time is added to its history, and every chunk it links
//! to is encountered along with it.
//!
//! ### Activation
//!
//! A chunk's activation at time `t` has three parts:
//!
//! 1. **Base-level activation** - recency and frequency of encounters
//!    ```text
//!    B = ln[Σ(t - t_k)^(-d)]
//!    ```
//!
//! 2. **Spreading activation** - association with the current goal, weighted
//!    by how distinctive each goal value is (its *fan*)
//!    ```text
//!    S = ga/n × Σ max(0, mas - ln fan_j)
//!    ```
//!
//! 3. **Noise** - a logistic draw with scale `s`
//!
//! ### Retrieval
//!
//! Chunks matching a retrieval pattern compete on activation. The winner must
//! beat the threshold `rt`; retrieval time is `lf × e^(-le × A)`. The same
//! activations yield softmax retrieval probabilities and *blended* values:
//! probability-weighted averages of a numeric slot.
//!
//! ## Example
//!
//! ```rust
//! use dm_core::{slots, Chunk, Model, ModelParams};
//!
//! # fn main() -> dm_core::Result<()> {
//! let mut model = Model::seeded(ModelParams::default(), 42)?;
//!
//! model.add_encounter(&Chunk::new("dog", slots([("category", "animal")])))?;
//! model.add_encounter(&Chunk::new("cat", slots([("category", "animal")])))?;
//! model.advance_time(10.0)?;
//! model.add_encounter(&Chunk::new("cat", slots([("category", "animal")])))?;
//! model.advance_time(1.0)?;
//!
//! let result = model.retrieve(&slots([("category", "animal")]))?;
//! assert_eq!(result.chunk.map(|c| c.name().to_string()).as_deref(), Some("cat"));
//! # Ok(())
//! # }
//! ```
//!
//! ## References
//!
//! - Anderson, J. R., & Lebiere, C. (1998). *The Atomic Components of Thought*
//! - Anderson, J. R. (2007). *How Can the Human Mind Occur in the Physical
//!   Universe?*
//! - Lebiere, C. (1999). *Blending: An ACT-R mechanism for aggregate
//!   retrievals*

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activation;
pub mod chunk;
pub mod error;
pub mod memory;
pub mod model;
pub mod noise;
pub mod params;
pub mod retrieval;

pub use activation::{
	base_level_activation, compute_activation, compute_base_level, compute_latency, fan_strength,
	latency_from_activation, spreading_activation, ActivationBreakdown, ActivationInput,
};
pub use chunk::{slots, Chunk, SlotValue, Slots};
pub use error::{DmError, Result};
pub use memory::DeclarativeMemory;
pub use model::Model;
pub use noise::logistic_noise;
pub use params::ModelParams;
pub use retrieval::{
	matches, retrieval_probabilities, retrieval_probability, retrieve, retrieve_blended_trace,
	softmax, Retrieval, RetrievalCandidate,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
