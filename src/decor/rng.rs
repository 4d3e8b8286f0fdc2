// src/decor/rng.rs
//! Seeded random source for decoration passes.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::core::RandomSource;

/// Global world seed; changing this reshuffles every decoration pass.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldSeed(pub u64);

/// ChaCha8 stream implementing [`RandomSource`]. Same seed, same placements.
#[derive(Clone, Debug)]
pub struct SeededRandom(ChaCha8Rng);

impl SeededRandom {
    /// Stable per (seed, pass). Pass 0 is the first generation on a map.
    pub fn for_pass(seed: WorldSeed, pass: u32) -> Self {
        let mix = seed.0 ^ ((pass as u64) << 40) ^ 0xDEC0_4A71_0B5E_ED00u64;
        Self(ChaCha8Rng::seed_from_u64(mix))
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn uniform01(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    #[inline]
    fn uniform_index(&mut self, n: usize) -> usize {
        self.0.random_range(0..n)
    }
}
