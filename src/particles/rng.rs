//! Injectable random source for emission.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seedable PRNG used for angles, speeds, sizes and colors.
pub struct ParticleRng {
    inner: StdRng,
    seed: u64,
}

impl ParticleRng {
    /// Deterministic sequence for tests and offline renders.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the wall clock.
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::seeded(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Returns a float in [min, max); `min` when the range is empty.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }
}

impl std::fmt::Debug for ParticleRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleRng").field("seed", &self.seed).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/rng.rs"]
mod tests;
