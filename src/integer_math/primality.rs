// src/integer_math/primality.rs

use log::trace;
use rand::RngCore;
use crate::core::big_integer::BigInteger;
use crate::core::error::Result;
use crate::integer_math::modular::{mod_mul, mod_pow};
use crate::integer_math::sampling::sample_uniform;

/// Default number of Miller-Rabin rounds; a composite survives with probability <= 4^-20.
pub const DEFAULT_ROUNDS: usize = 20;

/// Primes used to discard candidates before any witness round.
pub const SMALL_PRIMES: [i64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Result of checking a candidate against [`SMALL_PRIMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallPrimeCheck {
    /// The candidate is one of the small primes.
    Prime,
    /// The candidate has a small prime factor.
    Composite,
    /// No small factor; witness rounds are needed.
    Unknown,
}

/// Trial division by the small prime table. `n` must be at least 2.
pub fn small_prime_check(n: &BigInteger) -> SmallPrimeCheck {
    for &p in SMALL_PRIMES.iter() {
        if *n == p {
            return SmallPrimeCheck::Prime;
        }
        if n % p == 0 {
            return SmallPrimeCheck::Composite;
        }
    }
    SmallPrimeCheck::Unknown
}

/// Miller-Rabin probabilistic primality test.
///
/// 2 and 3 are prime; values below 2 and even values are composite. Otherwise
/// `rounds` witnesses are drawn uniformly from `[2, n-2]`. A `false` answer is
/// always correct; a `true` answer is wrong with probability at most `4^-rounds`.
pub fn is_probably_prime<R: RngCore + ?Sized>(n: &BigInteger, rounds: usize, rng: &mut R) -> Result<bool> {
    if *n == 2 || *n == 3 {
        return Ok(true);
    }
    if *n < 2 || n.is_even() {
        return Ok(false);
    }
    match small_prime_check(n) {
        SmallPrimeCheck::Prime => return Ok(true),
        SmallPrimeCheck::Composite => return Ok(false),
        SmallPrimeCheck::Unknown => {}
    }

    // n - 1 = 2^r * d with d odd
    let n_minus_one = n - 1;
    let mut d = n_minus_one.clone();
    let mut r = 0usize;
    while d.is_even() {
        d /= 2;
        r += 1;
    }

    let two = BigInteger::from(2);
    let witness_max = n - 2;

    'witness: for round in 0..rounds {
        let a = sample_uniform(&two, &witness_max, rng)?;
        let mut x = mod_pow(&a, &d, n)?;

        if x == 1 || x == n_minus_one {
            continue 'witness;
        }

        for _ in 1..r {
            x = mod_mul(&x, &x, n)?;
            if x == n_minus_one {
                continue 'witness;
            }
            if x == 1 {
                // Nontrivial square root of 1
                break;
            }
        }

        trace!("Miller-Rabin: witness {} proves {} composite in round {}", a, n, round);
        return Ok(false);
    }

    Ok(true)
}
