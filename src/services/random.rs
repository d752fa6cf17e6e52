use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

/// Source of randomness for the matcher
///
/// Injected rather than pulled from a global generator so ranking is
/// reproducible under a seeded or fixed source.
pub trait RandomSource {
    /// A uniform draw from `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// `amount` distinct indices drawn uniformly from `0..len`
    ///
    /// `amount` is clamped to `len`.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;
}

/// Random source backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}

/// Random source that always returns the same jitter and samples in order
///
/// Useful wherever ranking must be exactly repeatable, e.g. tests asserting
/// on composite scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSource {
    value: f64,
}

impl FixedSource {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Jitter of exactly zero
    pub fn zero() -> Self {
        Self::default()
    }
}

impl RandomSource for FixedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.value.clamp(low, high.max(low))
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }
}
