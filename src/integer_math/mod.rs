// src/integer_math/mod.rs

pub mod division;
pub mod fft;
pub mod modular;
pub mod multiplication;
pub mod primality;
pub mod prime_factory;
pub mod sampling;
