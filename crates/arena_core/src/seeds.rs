//! Seed generation for duplicate matches.
//!
//! A match plays the same seed sequence in every seating, so all the
//! randomness a participant faces is shared with the other three; only
//! the seat it faces it from changes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::types::{Seed, SeedSequence};

/// Lowest nonce/key value drawn by default
pub const DEFAULT_SEED_LOW: u64 = 1;

/// Highest nonce/key value drawn by default
pub const DEFAULT_SEED_HIGH: u64 = 100_000;

/// Inclusive range both seed components are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRange {
    pub low: u64,
    pub high: u64,
}

impl Default for SeedRange {
    fn default() -> Self {
        Self {
            low: DEFAULT_SEED_LOW,
            high: DEFAULT_SEED_HIGH,
        }
    }
}

impl SeedRange {
    pub fn new(low: u64, high: u64) -> Result<Self> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    /// Seeds are positive, and the range must not be empty.
    pub fn validate(&self) -> Result<()> {
        if self.low == 0 {
            return Err(MatchError::Config(
                "seed range must start at 1 or above".to_string(),
            ));
        }
        if self.low > self.high {
            return Err(MatchError::Config(format!(
                "seed range is empty ({} > {})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Draws reproducible seed sequences from its own random source.
///
/// Kept separate from the fairness selector's RNG so that fixing one does
/// not constrain the other.
#[derive(Debug, Clone)]
pub struct SeedSequenceGenerator {
    range: SeedRange,
    rng: StdRng,
}

impl SeedSequenceGenerator {
    pub fn new(range: SeedRange, rng: StdRng) -> Result<Self> {
        range.validate()?;
        Ok(Self { range, rng })
    }

    /// Seeded generator, or an entropy-seeded one when `seed` is `None`
    pub fn with_seed(range: SeedRange, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(range, rng)
    }

    /// Draw `count` seeds. Duplicates are possible and kept.
    pub fn generate(&mut self, count: usize) -> SeedSequence {
        let SeedRange { low, high } = self.range;
        (0..count)
            .map(|_| {
                let nonce = self.rng.gen_range(low..=high);
                let key = self.rng.gen_range(low..=high);
                Seed::new(nonce, key)
            })
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
#[path = "seeds_tests.rs"]
mod tests;
