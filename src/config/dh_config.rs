// src/config/dh_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;

/// Settings for a Diffie-Hellman demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DhConfig {
    /// Bit length of the generated safe prime
    pub bit_length: usize,

    /// Group generator
    pub generator: i64,

    /// Miller-Rabin rounds per primality test
    pub miller_rabin_rounds: usize,

    /// Give up on the safe-prime search after this many candidates
    #[serde(default)]
    pub max_attempts: Option<u64>,

    /// Fixed seed for reproducible runs (never for real keys)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Print the transcript as JSON instead of text
    pub json_output: bool,
}

impl Default for DhConfig {
    fn default() -> Self {
        DhConfig {
            bit_length: 512,
            generator: 2,
            miller_rabin_rounds: 20,
            max_attempts: None,
            seed: None,
            log_level: "info".to_string(),
            json_output: false,
        }
    }
}

impl DhConfig {
    /// Load configuration with precedence: env vars → config file → defaults.
    /// Call [`DhConfig::validate`] once any overrides are applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // TOML preferred, YAML fallback
        if Path::new("safeprime.toml").exists() {
            builder = builder.add_source(File::with_name("safeprime.toml"));
        } else if Path::new("safeprime.yaml").exists() {
            builder = builder.add_source(File::with_name("safeprime.yaml"));
        }

        Self::finish(builder)
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        } else {
            return Err(ConfigError::NotFound(path.as_ref().display().to_string()));
        }

        Self::finish(builder)
    }

    /// Rejects settings no search can satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bit_length < 3 {
            return Err(ConfigError::Message(format!(
                "bit_length must be at least 3, got {}",
                self.bit_length
            )));
        }
        if self.miller_rabin_rounds == 0 {
            return Err(ConfigError::Message("miller_rabin_rounds must be positive".to_string()));
        }
        if self.generator < 2 {
            return Err(ConfigError::Message(format!(
                "generator must be at least 2, got {}",
                self.generator
            )));
        }
        Ok(())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("bit_length", 512)?
            .set_default("generator", 2)?
            .set_default("miller_rabin_rounds", 20)?
            .set_default("log_level", "info")?
            .set_default("json_output", false)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        // Flat keys, so no nesting separator: SAFEPRIME_BIT_LENGTH -> bit_length
        let config = builder
            .add_source(Environment::with_prefix("SAFEPRIME").try_parsing(true))
            .build()?;
        // Not validated here: command-line overrides are applied first
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = DhConfig::default();
        assert_eq!(config.bit_length, 512);
        assert_eq!(config.generator, 2);
        assert_eq!(config.miller_rabin_rounds, 20);
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("safeprime-test-{}.toml", std::process::id()));
        fs::write(&path, "bit_length = 128\nseed = 42\nmax_attempts = 5000\n").unwrap();
        let config = DhConfig::load_from_file(&path);
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.bit_length, 128);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_attempts, Some(5000));
        assert_eq!(config.generator, 2);
    }

    #[test]
    fn test_invalid_file_values_can_be_overridden() {
        let path = std::env::temp_dir().join(format!("safeprime-rounds-{}.toml", std::process::id()));
        fs::write(&path, "miller_rabin_rounds = 0\n").unwrap();
        let config = DhConfig::load_from_file(&path);
        fs::remove_file(&path).unwrap();

        let mut config = config.unwrap();
        assert!(config.validate().is_err());
        config.miller_rabin_rounds = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(DhConfig::load_from_file("/nonexistent/safeprime.toml").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DhConfig::default();
        config.bit_length = 2;
        assert!(config.validate().is_err());

        let mut config = DhConfig::default();
        config.miller_rabin_rounds = 0;
        assert!(config.validate().is_err());

        let mut config = DhConfig::default();
        config.generator = 1;
        assert!(config.validate().is_err());
    }
}
