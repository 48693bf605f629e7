use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Largest length drawn or requested for a sentence (in words) or a
/// paragraph (in sentences). Longer requests are clamped.
pub const MAX_LENGTH: usize = 1 << 16;

/// Population mean of a sequence of counts.
///
/// Returns `0.0` for an empty sequence.
pub fn mean(values: &[usize]) -> f64 {
	if values.is_empty() {
		return 0.0;
	}
	values.iter().sum::<usize>() as f64 / values.len() as f64
}

/// Population standard deviation of a sequence of counts.
///
/// Computed as `sqrt(mean(x²) - mean(x)²)`. Rounding can push the
/// difference slightly below zero for constant sequences, so it is clamped.
pub fn sigma(values: &[usize]) -> f64 {
	if values.is_empty() {
		return 0.0;
	}
	let squares: Vec<usize> = values.iter().map(|v| v * v).collect();
	let m = mean(values);
	(mean(&squares) - m * m).max(0.0).sqrt()
}

/// Draws one value from a normal distribution.
///
/// A negative `sigma` draws as its absolute value. Returns `None` when
/// `sigma` is not finite.
pub fn normal_variate<R: Rng + ?Sized>(mean: f64, sigma: f64, rng: &mut R) -> Option<f64> {
	if !sigma.is_finite() {
		return None;
	}
	let normal = Normal::new(mean, sigma.abs()).ok()?;
	Some(normal.sample(rng))
}

/// Draws a strictly positive length: `1 + ceil(|normal(mean, sigma)|)`,
/// at most `MAX_LENGTH`.
///
/// Non-finite parameters or draws collapse to the minimal length of 1.
pub fn positive_length<R: Rng + ?Sized>(mean: f64, sigma: f64, rng: &mut R) -> usize {
	match normal_variate(mean, sigma, rng).map(|value| value.abs().ceil()) {
		Some(value) if value.is_finite() => {
			let drawn = value.min(MAX_LENGTH as f64) as usize;
			clamp_length(1usize.saturating_add(drawn))
		}
		_ => 1,
	}
}

/// Clamps a requested length to `MAX_LENGTH`.
pub fn clamp_length(length: usize) -> usize {
	length.min(MAX_LENGTH)
}

/// Builds the random source threaded through generation.
///
/// - `Some(seed)` gives a reproducible `StdRng`
/// - `None` seeds from the operating system
pub fn make_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	}
}
