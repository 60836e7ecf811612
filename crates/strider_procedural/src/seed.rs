//! # Level Seeds
//!
//! Every random draw made while generating a level comes from one
//! `ChaCha8Rng` owned by the sequencer. Seeding it explicitly makes a whole
//! run reproducible.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every pass draws from.
pub type LevelRng = ChaCha8Rng;

/// Seed for deterministic level generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelSeed(u64);

impl LevelSeed {
    /// Creates a new level seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Seeds from the wall clock. Runs started this way are not reproducible
    /// unless the value is logged.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        #[allow(clippy::cast_possible_truncation)]
        let folded = (nanos ^ (nanos >> 64)) as u64;
        Self(folded)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives the seed of an independent stream, one per `stream` index.
    ///
    /// Nearby indices give unrelated seeds (SplitMix64 finalizer).
    #[must_use]
    pub const fn derive(self, stream: u64) -> Self {
        let mut z = self
            .0
            .wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self(z ^ (z >> 31))
    }

    /// Builds the generator for this seed.
    #[must_use]
    pub fn rng(self) -> LevelRng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for LevelSeed {
    fn default() -> Self {
        Self(0x5712_1DE5_0000_0070)
    }
}
