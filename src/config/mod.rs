// src/config/mod.rs

pub mod dh_config;

pub use dh_config::DhConfig;
