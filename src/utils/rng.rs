//! Seeding and random scalar utilities
//!
//! This module provides:
//! - SeedSequence: expands a root u64 seed into deterministic sub-seeds
//! - RngStream: a reproducible PRNG stream (ChaCha8)
//! - Randomizer: bounded uniform/gaussian sampling used by snowflakes

use rand::Rng;
use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Type alias for the default RNG stream used across the crate.
pub type RngStream = ChaCha8Rng;

/// SplitMix64 mixer used to expand a 64-bit seed into a sequence of pseudo-random u64 values.
/// Each snowflake of a `Snowfall` gets its own stream from one of these sub-seeds.
#[derive(Clone, Debug)]
pub struct SeedSequence {
    state: u128,
}

impl SeedSequence {
    /// Create a new seed sequence from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        // SplitMix64 golden-ratio increment as the initial mix.
        let init = (seed as u128) ^ 0x9E3779B97F4A7C15u128;
        Self { state: init }
    }

    /// Generate the next sub-seed deterministically.
    pub fn next_subseed(&mut self) -> u64 {
        let mut z = (self.state as u64).wrapping_add(0x9E3779B97F4A7C15);
        self.state = (self.state ^ (z as u128)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Create a Randomizer seeded from the next subseed.
    pub fn next_randomizer(&mut self) -> Randomizer {
        Randomizer::new(self.next_subseed())
    }
}

/// Create a new RNG stream from a root seed (convenience).
pub fn rng_from_seed(seed: u64) -> RngStream {
    RngStream::seed_from_u64(seed)
}

/// Bounded random scalars for particle initialisation.
///
/// Every call is self-contained; the only state carried between calls is the
/// underlying random stream.
#[derive(Clone, Debug)]
pub struct Randomizer {
    rng: RngStream,
}

impl Default for Randomizer {
    fn default() -> Self { Self::from_entropy() }
}

impl Randomizer {
    /// Reproducible randomizer for a given seed.
    pub fn new(seed: u64) -> Self {
        Self { rng: rng_from_seed(seed) }
    }

    /// Randomizer seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: RngStream::from_entropy() }
    }

    /// Integer in `[min, max]`.
    ///
    /// With `gaussian` set, values cluster around the midpoint of the range but
    /// the full range stays reachable; the result is clamped to the bounds.
    pub fn random_int(&mut self, min: i32, max: i32, gaussian: bool) -> i32 {
        debug_assert!(min <= max, "random_int requires min <= max");
        if min >= max { return min; }
        if !gaussian {
            return Uniform::new_inclusive(min, max).sample(&mut self.rng);
        }
        let half = (max as f64 - min as f64) / 2.0;
        let mid = min as f64 + half;
        let value = (mid + self.random_gaussian() * half).round();
        (value as i64).clamp(min as i64, max as i64) as i32
    }

    /// Float uniform in `[0, max)`. Non-positive `max` yields `0.0`.
    pub fn random_double(&mut self, max: f64) -> f64 {
        if max <= 0.0 { return 0.0; }
        self.rng.gen_range(0.0..max)
    }

    /// `-1` or `1` with equal probability.
    pub fn random_signum(&mut self) -> i32 {
        if self.rng.gen_bool(0.5) { 1 } else { -1 }
    }

    /// Standard normal halved and rejected outside `(-1, 1)`: roughly 95% of
    /// draws are accepted, so the loop terminates quickly.
    fn random_gaussian(&mut self) -> f64 {
        loop {
            let g = self.rng.sample::<f64, _>(StandardNormal) / 2.0;
            if g > -1.0 && g < 1.0 { return g; }
        }
    }
}
