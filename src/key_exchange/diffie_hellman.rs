// src/key_exchange/diffie_hellman.rs
//
// Finite-field Diffie-Hellman over a safe prime.

use log::{debug, info};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use crate::core::big_integer::BigInteger;
use crate::core::error::{ArithmeticError, Result};
use crate::integer_math::modular::mod_pow;
use crate::integer_math::prime_factory::{generate_safe_prime_with, SearchLimits};
use crate::integer_math::sampling::sample_uniform;

/// Private keys drawn before `KeyPair::generate` gives up on a generator
/// whose powers keep landing on 0, 1 or p-1.
const KEY_DRAW_LIMIT: usize = 64;

/// Group parameters: a prime modulus and a generator.
///
/// Deserialization goes through [`DhParameters::new`], so decoded parameters
/// are always validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDhParameters")]
pub struct DhParameters {
    pub prime: BigInteger,
    pub generator: BigInteger,
}

#[derive(Deserialize)]
struct RawDhParameters {
    prime: BigInteger,
    generator: BigInteger,
}

impl TryFrom<RawDhParameters> for DhParameters {
    type Error = ArithmeticError;

    fn try_from(raw: RawDhParameters) -> Result<Self> {
        DhParameters::new(raw.prime, raw.generator)
    }
}

impl DhParameters {
    /// Wraps existing parameters after validating them.
    pub fn new(prime: BigInteger, generator: BigInteger) -> Result<Self> {
        let params = DhParameters { prime, generator };
        params.validate()?;
        Ok(params)
    }

    /// Generates a fresh `bits`-bit safe prime and pairs it with `generator`.
    pub fn generate<R: RngCore + ?Sized>(
        bits: usize,
        generator: i64,
        rounds: usize,
        rng: &mut R,
        limits: &SearchLimits,
    ) -> Result<Self> {
        info!("Generating {}-bit safe prime", bits);
        let prime = generate_safe_prime_with(bits, rounds, rng, limits)?;
        DhParameters::new(prime, BigInteger::from(generator))
    }

    /// The prime must be odd and at least 5 so that `[2, p-2]` is non-empty;
    /// the generator must lie in `[2, p-2]`.
    pub fn validate(&self) -> Result<()> {
        if self.prime < 5 || self.prime.is_even() {
            return Err(ArithmeticError::InvalidParameter(format!(
                "prime must be odd and at least 5, got {}",
                self.prime
            )));
        }
        let (lo, hi) = self.key_range();
        if self.generator < lo || self.generator > hi {
            return Err(ArithmeticError::InvalidParameter(format!(
                "generator {} outside [2, p-2]",
                self.generator
            )));
        }
        Ok(())
    }

    /// Inclusive range `[2, p-2]` for private keys and acceptable public keys.
    pub fn key_range(&self) -> (BigInteger, BigInteger) {
        (BigInteger::from(2), &self.prime - 2)
    }

    fn in_key_range(&self, value: &BigInteger) -> bool {
        let (lo, hi) = self.key_range();
        *value >= lo && *value <= hi
    }
}

/// One party's private exponent and the matching public value.
#[derive(Debug, Clone)]
pub struct KeyPair {
    params: DhParameters,
    private_key: BigInteger,
    public_key: BigInteger,
}

impl KeyPair {
    /// Draws a private key uniformly from `[2, p-2]`, redrawing while the
    /// public key falls outside `[2, p-2]` (for a safe prime this happens
    /// when the private key is a multiple of the generator's order).
    pub fn generate<R: RngCore + ?Sized>(params: &DhParameters, rng: &mut R) -> Result<Self> {
        let (lo, hi) = params.key_range();
        for _ in 0..KEY_DRAW_LIMIT {
            let private_key = sample_uniform(&lo, &hi, rng)?;
            let public_key = mod_pow(&params.generator, &private_key, &params.prime)?;
            if params.in_key_range(&public_key) {
                return Ok(KeyPair {
                    params: params.clone(),
                    private_key,
                    public_key,
                });
            }
            debug!("Private key {} gives degenerate public key {}, redrawing", private_key, public_key);
        }
        Err(ArithmeticError::InvalidParameter(format!(
            "generator {} gave no public key in [2, p-2] after {} draws",
            params.generator, KEY_DRAW_LIMIT
        )))
    }

    /// Both the private key and the derived public key must lie in `[2, p-2]`.
    pub fn from_private_key(params: &DhParameters, private_key: BigInteger) -> Result<Self> {
        if !params.in_key_range(&private_key) {
            return Err(ArithmeticError::InvalidParameter(format!(
                "private key {} outside [2, p-2]",
                private_key
            )));
        }
        let public_key = mod_pow(&params.generator, &private_key, &params.prime)?;
        if !params.in_key_range(&public_key) {
            return Err(ArithmeticError::InvalidParameter(format!(
                "private key {} gives public key {} outside [2, p-2]",
                private_key, public_key
            )));
        }
        Ok(KeyPair {
            params: params.clone(),
            private_key,
            public_key,
        })
    }

    pub fn private_key(&self) -> &BigInteger {
        &self.private_key
    }

    pub fn public_key(&self) -> &BigInteger {
        &self.public_key
    }

    /// `peer_public^private mod p`. Peer values outside `[2, p-2]` are rejected.
    pub fn shared_secret(&self, peer_public: &BigInteger) -> Result<BigInteger> {
        if !self.params.in_key_range(peer_public) {
            return Err(ArithmeticError::InvalidParameter(format!(
                "peer public key {} outside [2, p-2]",
                peer_public
            )));
        }
        mod_pow(peer_public, &self.private_key, &self.params.prime)
    }
}

/// Public record of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTranscript {
    pub prime: BigInteger,
    pub generator: BigInteger,
    pub alice_public: BigInteger,
    pub bob_public: BigInteger,
    pub shared_secret: BigInteger,
}

/// Runs a full two-party exchange and checks both sides agree.
pub fn run_exchange<R: RngCore + ?Sized>(params: &DhParameters, rng: &mut R) -> Result<ExchangeTranscript> {
    let alice = KeyPair::generate(params, rng)?;
    let bob = KeyPair::generate(params, rng)?;
    debug!("Alice public key: {}", alice.public_key());
    debug!("Bob public key: {}", bob.public_key());

    let alice_secret = alice.shared_secret(bob.public_key())?;
    let bob_secret = bob.shared_secret(alice.public_key())?;
    if alice_secret != bob_secret {
        return Err(ArithmeticError::InvalidParameter(
            "shared secrets do not match".to_string(),
        ));
    }
    info!("Shared secrets match");

    Ok(ExchangeTranscript {
        prime: params.prime.clone(),
        generator: params.generator.clone(),
        alice_public: alice.public_key().clone(),
        bob_public: bob.public_key().clone(),
        shared_secret: alice_secret,
    })
}
