//! Injectable randomness for star and marker placement.

use rand::Rng;

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }
}

/// Adapter over any [`rand::Rng`], e.g. a seeded `StdRng` in tests.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Cycles through a fixed list of values. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sequence_cycles() {
        let mut source = SequenceSource::new(vec![0.0, 0.5]);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_unit(), 0.5);
        assert_eq!(source.next_unit(), 0.0);
    }

    #[test]
    fn test_sequence_clamps_to_half_open() {
        let mut source = SequenceSource::new(vec![1.0, -3.0]);
        assert!(source.next_unit() < 1.0);
        assert_eq!(source.next_unit(), 0.0);
    }

    #[test]
    fn test_range_bounds() {
        let mut source = RngSource(StdRng::seed_from_u64(7));
        for _ in 0..1_000 {
            let value = source.range(3.0, 8.0);
            assert!((3.0..8.0).contains(&value));
        }
    }
}
