// src/integer_math/prime_factory.rs
//
// Random prime and safe-prime generation.
//
// A safe prime p = 2q + 1 has a Sophie Germain cofactor q that is prime too.
// The search loop has no provable bound; `SearchLimits` lets the caller cap
// the attempt count or cancel from another thread.

use log::{debug, info};
use rand::RngCore;
use crate::core::big_integer::BigInteger;
use crate::core::cancellation_token::CancellationToken;
use crate::core::error::{ArithmeticError, Result};
use crate::integer_math::primality::{is_probably_prime, SMALL_PRIMES};
use crate::integer_math::sampling::random_bits;

/// How often the search reports progress.
const PROGRESS_INTERVAL: u64 = 100;

/// Bounds applied to a safe-prime search. The default is unbounded.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    /// Give up with `SearchExhausted` after this many candidates.
    pub max_attempts: Option<u64>,
    /// Checked before every candidate; cancelling yields `SearchCancelled`.
    pub cancel_token: CancellationToken,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        SearchLimits::default()
    }

    pub fn with_max_attempts(max_attempts: u64) -> Self {
        SearchLimits {
            max_attempts: Some(max_attempts),
            ..SearchLimits::default()
        }
    }

    pub fn with_cancel_token(mut self, cancel_token: CancellationToken) -> Self {
        self.cancel_token = cancel_token;
        self
    }

    fn check(&self, attempts: u64) -> Result<()> {
        if self.cancel_token.is_cancellation_requested() {
            return Err(ArithmeticError::SearchCancelled { attempts });
        }
        match self.max_attempts {
            Some(max) if attempts >= max => Err(ArithmeticError::SearchExhausted { attempts }),
            _ => Ok(()),
        }
    }
}

/// Random probable prime with exactly `bits` bits (`bits >= 2`).
pub fn generate_probable_prime<R: RngCore + ?Sized>(bits: usize, rounds: usize, rng: &mut R) -> Result<BigInteger> {
    if bits < 2 {
        return Err(ArithmeticError::InvalidParameter(format!(
            "a prime needs at least 2 bits, got {}",
            bits
        )));
    }
    loop {
        let mut candidate = random_bits(bits, rng);
        if candidate.is_even() {
            candidate += 1;
        }
        if is_probably_prime(&candidate, rounds, rng)? {
            return Ok(candidate);
        }
    }
}

/// Safe prime with exactly `bits` bits. Runs until one is found.
pub fn generate_safe_prime<R: RngCore + ?Sized>(bits: usize, rounds: usize, rng: &mut R) -> Result<BigInteger> {
    generate_safe_prime_with(bits, rounds, rng, &SearchLimits::unbounded())
}

/// Safe prime with exactly `bits` bits (`bits >= 3`), honouring `limits`.
///
/// Each attempt draws an odd `q` with `bits - 1` bits. If `q` and then
/// `p = 2q + 1` pass the primality test, `p` is returned.
pub fn generate_safe_prime_with<R: RngCore + ?Sized>(
    bits: usize,
    rounds: usize,
    rng: &mut R,
    limits: &SearchLimits,
) -> Result<BigInteger> {
    if bits < 3 {
        return Err(ArithmeticError::InvalidParameter(format!(
            "a safe prime needs at least 3 bits, got {}",
            bits
        )));
    }
    debug!("Searching for a {}-bit safe prime ({} Miller-Rabin rounds)", bits, rounds);

    let mut attempts = 0u64;
    loop {
        limits.check(attempts)?;
        attempts += 1;
        if attempts % PROGRESS_INTERVAL == 0 {
            debug!("Safe prime search: attempt {}", attempts);
        }

        let mut q = random_bits(bits - 1, rng);
        if q.is_even() {
            q += 1;
        }
        if !passes_safe_prime_sieve(&q) {
            continue;
        }
        if !is_probably_prime(&q, rounds, rng)? {
            continue;
        }

        let p = &q * 2 + 1;
        if is_probably_prime(&p, rounds, rng)? {
            info!("Safe prime found after {} attempts", attempts);
            return Ok(p);
        }
    }
}

/// Rejects `q` when `q` or `2q + 1` has a small prime factor.
///
/// Only applied once `q` exceeds the table, so tiny safe primes such as
/// 7 = 2*3 + 1 are still reachable.
fn passes_safe_prime_sieve(q: &BigInteger) -> bool {
    let largest = SMALL_PRIMES[SMALL_PRIMES.len() - 1];
    if *q <= largest {
        return true;
    }
    SMALL_PRIMES.iter().all(|&prime| {
        let residue = q % prime;
        // 2q + 1 = 0 (mod prime) exactly when q = (prime - 1) / 2
        residue != 0 && residue != (prime - 1) / 2
    })
}

/// Smallest probable prime strictly greater than `from`.
pub fn next_prime<R: RngCore + ?Sized>(from: &BigInteger, rounds: usize, rng: &mut R) -> Result<BigInteger> {
    if *from < 2 {
        return Ok(BigInteger::from(2));
    }
    let mut candidate = from + 1;
    if candidate.is_even() {
        if candidate == 2 {
            return Ok(candidate);
        }
        candidate += 1;
    }
    while !is_probably_prime(&candidate, rounds, rng)? {
        candidate += 2;
    }
    Ok(candidate)
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
    fn test_tiny_safe_primes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 3-bit safe prime is 7; 4-bit is 11; 5-bit is 23
        assert_eq!(generate_safe_prime(3, 20, &mut rng).unwrap(), big("7"));
        assert_eq!(generate_safe_prime(4, 20, &mut rng).unwrap(), big("11"));
        assert_eq!(generate_safe_prime(5, 20, &mut rng).unwrap(), big("23"));
    }

    #[test]
    fn test_safe_prime_properties() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for bits in [16usize, 32, 64] {
            let p = generate_safe_prime(bits, 20, &mut rng).unwrap();
            assert_eq!(p.bit_length(), bits);
            assert!(p.is_odd());
            assert!(is_probably_prime(&p, 20, &mut rng).unwrap());
            let q = (&p - 1) / 2;
            assert!(is_probably_prime(&q, 20, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_rejects_too_few_bits() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(generate_safe_prime(2, 20, &mut rng).is_err());
        assert!(generate_probable_prime(1, 20, &mut rng).is_err());
    }

    #[test]
    fn test_attempt_cap_exhausts() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let limits = SearchLimits::with_max_attempts(0);
        assert_eq!(
            generate_safe_prime_with(64, 20, &mut rng, &limits),
            Err(ArithmeticError::SearchExhausted { attempts: 0 })
        );
    }

    #[test]
    fn test_cancelled_search_stops() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let token = CancellationToken::new();
        token.cancel();
        let limits = SearchLimits::unbounded().with_cancel_token(token);
        assert_eq!(
            generate_safe_prime_with(512, 20, &mut rng, &limits),
            Err(ArithmeticError::SearchCancelled { attempts: 0 })
        );
    }

    #[test]
    fn test_probable_prime_bit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let p = generate_probable_prime(96, 20, &mut rng).unwrap();
        assert_eq!(p.bit_length(), 96);
        assert!(is_probably_prime(&p, 20, &mut rng).unwrap());
    }

    #[test]
    fn test_safe_prime_sieve() {
        // 1019 = 2*509 + 1, both prime
        assert!(passes_safe_prime_sieve(&big("509")));
        // 113 and 227 are both prime
        assert!(passes_safe_prime_sieve(&big("113")));
        // q = 111 = 3*37
        assert!(!passes_safe_prime_sieve(&big("111")));
        // q = 101 gives 2q + 1 = 203 = 7*29
        assert!(!passes_safe_prime_sieve(&big("101")));
    }

    #[test]
    fn test_next_prime() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(next_prime(&big("-10"), 20, &mut rng).unwrap(), big("2"));
        assert_eq!(next_prime(&big("1"), 20, &mut rng).unwrap(), big("2"));
        assert_eq!(next_prime(&big("2"), 20, &mut rng).unwrap(), big("3"));
        assert_eq!(next_prime(&big("13"), 20, &mut rng).unwrap(), big("17"));
        assert_eq!(next_prime(&big("7919"), 20, &mut rng).unwrap(), big("7927"));
    }
}
