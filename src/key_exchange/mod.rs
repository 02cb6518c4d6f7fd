// src/key_exchange/mod.rs

pub mod diffie_hellman;

pub use diffie_hellman::{run_exchange, DhParameters, ExchangeTranscript, KeyPair};
