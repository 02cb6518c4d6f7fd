// src/core/static_random.rs

use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use crate::core::big_integer::BigInteger;
use crate::core::error::Result;
use crate::integer_math::sampling;

/// Random bit source for the number-theory layer.
///
/// Wraps a ChaCha20 stream seeded from the operating system, or from a fixed
/// seed when runs must be reproducible. Anything implementing `RngCore` can be
/// used in its place.
pub struct StaticRandom {
    rng: ChaCha20Rng,
}

impl StaticRandom {
    /// Seeds from operating-system entropy.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StaticRandom::from_seed(seed)
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        StaticRandom {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Deterministic stream for tests and reproducible runs. Not for real keys.
    pub fn from_seed_u64(seed: u64) -> Self {
        StaticRandom {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[lower, upper]`.
    pub fn next_bigint(&mut self, lower: &BigInteger, upper: &BigInteger) -> Result<BigInteger> {
        sampling::sample_uniform(lower, upper, self)
    }

    /// Value with exactly `bits` bits.
    pub fn next_bits(&mut self, bits: usize) -> BigInteger {
        sampling::random_bits(bits, self)
    }
}

impl Default for StaticRandom {
    fn default() -> Self {
        StaticRandom::new()
    }
}

impl RngCore for StaticRandom {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }
}

impl CryptoRng for StaticRandom {}
