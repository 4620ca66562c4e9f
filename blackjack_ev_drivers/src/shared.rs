use std::fs;

use blackjack_ev::{AdvisorConfig, CountingSystem, PayoutTables, SimulationConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub shoe: ConfigShoe,
    pub simulator: ConfigSimulator,
    #[serde(default)]
    pub payouts: Option<PayoutTables>,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl Config {
    /// Aggregator settings, with the built-in payout tables unless the file
    /// overrides them.
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            workers: self.simulator.number_of_threads,
            rounds_per_worker: self.simulator.rounds_per_thread,
            payouts: self.payouts.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigShoe {
    pub number_of_decks: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSimulator {
    pub number_of_threads: usize,
    pub rounds_per_thread: u64,
    /// Dealer-outcome samples per request. 0 turns the sampler off.
    #[serde(default)]
    pub dealer_samples: u64,
    pub counting_system: String,
}

impl TryInto<CountingSystem> for &ConfigSimulator {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<CountingSystem, Self::Error> {
        self.counting_system.parse()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}
