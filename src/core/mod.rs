// src/core/mod.rs

pub mod big_integer;
pub mod cancellation_token;
pub mod error;
pub mod radix;
pub mod static_random;
