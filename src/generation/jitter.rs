//! Approximately normal jitter from summed uniform draws
//!
//! The sum of twelve uniform `[0, 1)` values has mean 6 and variance 1, so
//! subtracting 6 gives a cheap stand-in for a standard normal sample that is
//! bounded to `[-6, 6)`.

use rand::Rng;

/// Number of uniform draws summed per sample
const DRAWS: usize = 12;

/// Draw one jitter offset scaled by `scale`
///
/// Call once per axis; never reuse a single draw for both x and y.
pub fn sample_jitter<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    let sum: f64 = (0..DRAWS).map(|_| rng.gen::<f64>()).sum();
    (sum - DRAWS as f64 / 2.0) * scale
}
