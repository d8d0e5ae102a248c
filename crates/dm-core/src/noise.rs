//! Activation Noise
//!
//! Transient noise drawn from a logistic distribution with location 0 and
//! scale `s`:
//!
//! ```text
//! ε = s · ln((1 - u) / u),   u ~ U(0, 1) open
//! ```

use rand::distributions::Open01;
use rand::Rng;

/// Draw one noise value.
///
/// With `s == 0` this returns exactly 0 and leaves `rng` untouched, so a
/// noiseless model consumes no random numbers.
///
/// ```
/// use dm_core::noise::logistic_noise;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// assert_eq!(logistic_noise(&mut rng, 0.0), 0.0);
/// ```
pub fn logistic_noise<R: Rng + ?Sized>(rng: &mut R, s: f64) -> f64 {
	if s == 0.0 {
		return 0.0;
	}

	let u: f64 = rng.sample(Open01);
	s * ((1.0 - u) / u).ln()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	use super::*;

	#[test]
	fn test_zero_scale_consumes_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut untouched = StdRng::seed_from_u64(1);

		for _ in 0..10 {
			assert_eq!(logistic_noise(&mut rng, 0.0), 0.0);
		}
		assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
	}

	#[test]
	fn test_seeded_draws_reproduce() {
		let mut a = StdRng::seed_from_u64(99);
		let mut b = StdRng::seed_from_u64(99);

		for _ in 0..100 {
			assert_eq!(logistic_noise(&mut a, 0.25), logistic_noise(&mut b, 0.25));
		}
	}

	#[test]
	fn test_noise_is_centered() {
		let mut rng = StdRng::seed_from_u64(5);
		let n = 20_000;
		let draws: Vec<f64> = (0..n).map(|_| logistic_noise(&mut rng, 0.5)).collect();

		#[allow(clippy::cast_precision_loss)]
		let mean = draws.iter().sum::<f64>() / n as f64;
		assert!(mean.abs() < 0.05, "mean should be near 0, got {mean}");
		assert!(draws.iter().all(|x| x.is_finite()));
		assert!(draws.iter().any(|&x| x > 0.0));
		assert!(draws.iter().any(|&x| x < 0.0));
	}

	#[test]
	fn test_noise_variance_matches_logistic() {
		// Var = s²π²/3
		let mut rng = StdRng::seed_from_u64(11);
		let s = 0.3;
		let n = 50_000;
		let draws: Vec<f64> = (0..n).map(|_| logistic_noise(&mut rng, s)).collect();

		#[allow(clippy::cast_precision_loss)]
		let var = draws.iter().map(|x| x * x).sum::<f64>() / n as f64;
		let expected = s * s * std::f64::consts::PI.powi(2) / 3.0;
		assert!((var - expected).abs() / expected < 0.05);
	}
}
