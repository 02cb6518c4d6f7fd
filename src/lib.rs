// src/lib.rs

pub mod config;
pub mod core;
pub mod integer_math;
pub mod key_exchange;

pub use crate::core::big_integer::{BigInteger, Sign};
pub use crate::core::cancellation_token::CancellationToken;
pub use crate::core::error::{ArithmeticError, Result};
pub use crate::core::static_random::StaticRandom;
pub use crate::integer_math::division::divmod;
pub use crate::integer_math::modular::mod_pow;
pub use crate::integer_math::primality::is_probably_prime;
pub use crate::integer_math::prime_factory::{generate_safe_prime, generate_safe_prime_with, SearchLimits};
pub use crate::integer_math::sampling::sample_uniform;
