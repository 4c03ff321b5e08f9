//! Browser randomness for star and marker placement.

use shared::random::RandomSource;

/// Draws from `Math.random()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
