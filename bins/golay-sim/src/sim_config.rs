use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

/// Resolved simulation parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Bit error rate of the binary symmetric channel
    pub bit_error_rate: f64,
    /// Number of Monte-Carlo transmissions
    pub trials: usize,
    /// Seed for reproducible runs; None draws from the OS
    pub seed: Option<u64>,
    /// Optional UTF-8 payload pushed through the block codec
    pub payload: Option<String>,
    /// Optional verbose logfile path
    pub debug_log: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            bit_error_rate: 0.05,
            trials: 1000,
            seed: None,
            payload: None,
            debug_log: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    bit_error_rate: Option<f64>,
    trials: Option<usize>,
    seed: Option<u64>,
    payload: Option<String>,
    debug_log: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

/// Build a `SimConfig` from a TOML string
pub fn from_toml_str(toml_str: &str) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }

    let mut cfg = SimConfig::default();
    if let Some(ber) = root.bit_error_rate {
        if !(0.0..=1.0).contains(&ber) {
            return Err(format!("bit_error_rate {} outside [0, 1]", ber).into());
        }
        cfg.bit_error_rate = ber;
    }
    if let Some(trials) = root.trials {
        cfg.trials = trials;
    }
    cfg.seed = root.seed;
    cfg.payload = root.payload;
    cfg.debug_log = root.debug_log;

    Ok(cfg)
}

/// Build a `SimConfig` from a TOML configuration file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys
}
