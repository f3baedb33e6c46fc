//! Configuration for the generation pipeline.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for a [`Generator`](crate::generate::Generator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// RNG seed for reproducible output. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Largest number of instances generated in one batch.
    pub max_batch: u32,
    /// Deepest allowed nesting of spirits and cults.
    pub max_depth: u32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_batch: 40,
            max_depth: 8,
        }
    }
}

impl GenerateConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the batch cap (at least 1).
    pub fn with_max_batch(mut self, max_batch: u32) -> Self {
        self.max_batch = max_batch.max(1);
        self
    }

    /// Set the nesting limit for spirits and cults.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the RNG this configuration asks for.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
