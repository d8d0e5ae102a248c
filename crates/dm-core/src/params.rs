//! Model Parameters
//!
//! Each [`crate::model::Model`] holds its own copy, so sessions never see
//! each other's settings. Names follow the ACT-R parameter names.

use serde::{Deserialize, Serialize};

use crate::error::{DmError, Result};

/// Per-session declarative memory parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
	/// `d` - base-level decay (`:bll`, default 0.5)
	pub d: f64,
	/// `s` - activation noise scale (`:ans`, default 0 = no noise)
	pub s: f64,
	/// `lf` - latency factor (`:lf`, default 1.0)
	pub lf: f64,
	/// `le` - latency exponent (`:le`, default 1.0)
	pub le: f64,
	/// `rt` - retrieval threshold (`:rt`, default 0.0)
	pub rt: f64,
	/// `ga` - spreading activation from the goal (`:ga`, default 1.0)
	pub ga: f64,
	/// `mas` - maximum associative strength (`:mas`, default 1.6)
	pub mas: f64,
	/// `t` - softmax temperature for retrieval probability and blending (default 1.0)
	pub t: f64,
}

impl Default for ModelParams {
	fn default() -> Self {
		Self {
			d: 0.5,
			s: 0.0,
			lf: 1.0,
			le: 1.0,
			rt: 0.0,
			ga: 1.0,
			mas: 1.6,
			t: 1.0,
		}
	}
}

impl ModelParams {
	/// Check every parameter against its valid range.
	///
	/// # Errors
	///
	/// Returns [`DmError::InvalidParameter`] for the first offending value:
	/// negative or non-finite `d`, `s`, `lf`, `le`, `ga`; non-positive or
	/// non-finite `t`; NaN `rt` or `mas`.
	pub fn validate(&self) -> Result<()> {
		let non_negative = [
			("d", self.d),
			("s", self.s),
			("lf", self.lf),
			("le", self.le),
			("ga", self.ga),
		];
		for (name, value) in non_negative {
			if !value.is_finite() || value < 0.0 {
				return Err(DmError::InvalidParameter { name, value });
			}
		}

		if !self.t.is_finite() || self.t <= 0.0 {
			return Err(DmError::InvalidParameter {
				name: "t",
				value: self.t,
			});
		}

		for (name, value) in [("rt", self.rt), ("mas", self.mas)] {
			if value.is_nan() {
				return Err(DmError::InvalidParameter { name, value });
			}
		}

		Ok(())
	}
}
