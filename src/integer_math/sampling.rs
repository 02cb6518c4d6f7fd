// src/integer_math/sampling.rs
//
// Random integers drawn from any `RngCore` bit source.

use rand::RngCore;
use crate::core::big_integer::BigInteger;
use crate::core::error::{ArithmeticError, Result};

/// Uniform value in `[0, 2^bits)`.
pub fn random_below_bits<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigInteger {
    if bits == 0 {
        return BigInteger::from(0);
    }
    let word_count = (bits + 31) / 32;
    let mut words: Vec<u32> = (0..word_count).map(|_| rng.next_u32()).collect();
    let spare = word_count * 32 - bits;
    if let Some(top) = words.last_mut() {
        *top &= u32::MAX >> spare;
    }
    BigInteger::from_words_le(&words)
}

/// Random value with exactly `bits` bits: the top bit is forced on.
pub fn random_bits<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigInteger {
    if bits == 0 {
        return BigInteger::from(0);
    }
    let word_count = (bits + 31) / 32;
    let mut words: Vec<u32> = (0..word_count).map(|_| rng.next_u32()).collect();
    let top_bit = (bits - 1) % 32;
    if let Some(top) = words.last_mut() {
        *top &= u32::MAX >> (31 - top_bit);
        *top |= 1 << top_bit;
    }
    BigInteger::from_words_le(&words)
}

/// Uniform value in the inclusive range `[lo, hi]`.
///
/// Uses exact rejection sampling: candidates are drawn with as many bits as
/// `hi - lo` needs and redrawn when they overshoot, so no value is favoured.
/// The expected number of draws is below two.
pub fn sample_uniform<R: RngCore + ?Sized>(lo: &BigInteger, hi: &BigInteger, rng: &mut R) -> Result<BigInteger> {
    if lo > hi {
        return Err(ArithmeticError::InvalidRange {
            lo: lo.to_string(),
            hi: hi.to_string(),
        });
    }
    if lo == hi {
        return Ok(lo.clone());
    }

    let span = hi - lo;
    let bits = span.bit_length();
    loop {
        let candidate = random_below_bits(bits, rng);
        if candidate <= span {
            return Ok(candidate + lo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn big(text: &str) -> BigInteger {
        text.parse().unwrap()
    }

    #[test]
    fn test_random_bits_has_exact_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for bits in [1usize, 2, 31, 32, 33, 63, 64, 65, 127, 512] {
            for _ in 0..10 {
                assert_eq!(random_bits(bits, &mut rng).bit_length(), bits);
            }
        }
        assert_eq!(random_bits(0, &mut rng), BigInteger::from(0));
    }

    #[test]
    fn test_random_below_bits_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let bound = big("2").pow(70);
        for _ in 0..200 {
            let value = random_below_bits(70, &mut rng);
            assert!(value < bound);
            assert!(!value.is_negative());
        }
    }

    #[test]
    fn test_sample_uniform_rejects_inverted_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = sample_uniform(&big("10"), &big("9"), &mut rng);
        assert_eq!(
            result,
            Err(ArithmeticError::InvalidRange { lo: "10".to_string(), hi: "9".to_string() })
        );
    }

    #[test]
    fn test_sample_uniform_single_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(sample_uniform(&big("-5"), &big("-5"), &mut rng).unwrap(), big("-5"));
    }

    #[test]
    fn test_sample_uniform_covers_small_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = [0usize; 5];
        for _ in 0..1000 {
            let value = sample_uniform(&big("-2"), &big("2"), &mut rng).unwrap();
            let index = (value.to_i64().unwrap() + 2) as usize;
            seen[index] += 1;
        }
        // Each of the five values should land roughly 200 times
        for count in seen.iter() {
            assert!(*count > 120 && *count < 280, "skewed counts {:?}", seen);
        }
    }

    #[test]
    fn test_sample_uniform_large_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let lo = big("2");
        let hi = big("340282366920938463463374607431768211453");
        for _ in 0..50 {
            let value = sample_uniform(&lo, &hi, &mut rng).unwrap();
            assert!(value >= lo && value <= hi);
        }
    }
}
