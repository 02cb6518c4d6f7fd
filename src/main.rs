// src/main.rs

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use safeprime::config::DhConfig;
use safeprime::key_exchange::{run_exchange, DhParameters, ExchangeTranscript};
use safeprime::{CancellationToken, SearchLimits, StaticRandom};
use std::process;

/// Generate a safe prime and run a Diffie-Hellman exchange over it.
#[derive(Parser, Debug)]
#[command(name = "safeprime", about = "Safe-prime Diffie-Hellman demo")]
struct Args {
    /// Bit length of the safe prime
    #[arg(short = 'b', long = "bits")]
    bits: Option<usize>,

    /// Miller-Rabin rounds per primality test
    #[arg(long = "rounds")]
    rounds: Option<usize>,

    /// Seed for a reproducible run (not for real keys)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Give up after this many safe-prime candidates
    #[arg(long = "max-attempts")]
    max_attempts: Option<u64>,

    /// Configuration file (defaults to safeprime.toml / safeprime.yaml)
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Print the transcript as JSON
    #[arg(long = "json")]
    json: bool,
}

fn load_config(args: &Args) -> Result<DhConfig, config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => DhConfig::load_from_file(path)?,
        None => DhConfig::load()?,
    };
    if let Some(bits) = args.bits {
        config.bit_length = bits;
    }
    if let Some(rounds) = args.rounds {
        config.miller_rabin_rounds = rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.max_attempts.is_some() {
        config.max_attempts = args.max_attempts;
    }
    if args.json {
        config.json_output = true;
    }
    config.validate()?;
    Ok(config)
}

fn print_transcript(transcript: &ExchangeTranscript, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(transcript)?);
    } else {
        println!("p = {}", transcript.prime);
        println!("g = {}", transcript.generator);
        println!("A = {}", transcript.alice_public);
        println!("B = {}", transcript.bob_public);
        println!("shared secret = {}", transcript.shared_secret);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(2);
        }
    };

    let env = Env::default()
        .filter_or("SAFEPRIME_LOG", config.log_level.as_str())
        .write_style_or("SAFEPRIME_LOG_STYLE", "auto");
    env_logger::Builder::from_env(env).init();

    let cancel_token = CancellationToken::new();
    let handler_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    let mut limits = SearchLimits::unbounded().with_cancel_token(cancel_token);
    limits.max_attempts = config.max_attempts;

    let mut rng = match config.seed {
        Some(seed) => {
            warn!("Using fixed seed {}; keys are reproducible", seed);
            StaticRandom::from_seed_u64(seed)
        }
        None => StaticRandom::new(),
    };

    info!(
        "bits={} generator={} rounds={}",
        config.bit_length, config.generator, config.miller_rabin_rounds
    );

    let params = match DhParameters::generate(
        config.bit_length,
        config.generator,
        config.miller_rabin_rounds,
        &mut rng,
        &limits,
    ) {
        Ok(params) => params,
        Err(e) => {
            error!("Parameter generation failed: {}", e);
            process::exit(1);
        }
    };

    let transcript = match run_exchange(&params, &mut rng) {
        Ok(transcript) => transcript,
        Err(e) => {
            error!("Key exchange failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_transcript(&transcript, config.json_output) {
        error!("Could not print transcript: {}", e);
        process::exit(1);
    }
}
