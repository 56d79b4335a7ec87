use anyhow::Context;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::multicall::{MulticallConfig, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT};
use crate::{abis::MULTICALL3_ADDRESS, multicall::ProviderCaller};

/// JSON-RPC endpoint configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct RpcSettings {
    pub url: String,
}

/// Multicall batching configuration.
///
/// - `address`: Multicall3 deployment, the canonical address by default
/// - `batch_size`: maximum calls per aggregate3 call, must be at least 1
/// - `timeout_secs`: deadline shared by all batches of one invocation
/// - `partial_results`: keep results of completed batches when a later batch fails
#[derive(Debug, Deserialize, Clone)]
pub struct MulticallSettings {
    #[serde(default = "default_multicall_address")]
    pub address: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub partial_results: bool,
}

impl Default for MulticallSettings {
    fn default() -> Self {
        Self {
            address: default_multicall_address(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            partial_results: false,
        }
    }
}

fn default_multicall_address() -> String {
    MULTICALL3_ADDRESS.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub rpc: RpcSettings,
    #[serde(default)]
    pub multicall: MulticallSettings,
    /// Token contracts queried by the CLI.
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_path("config")
    }

    /// Load settings from `path`; the extension may be omitted.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }

    /// Build a provider-backed multicall config from these settings.
    pub fn multicall_config(&self) -> anyhow::Result<MulticallConfig<ProviderCaller>> {
        let caller = ProviderCaller::connect_http(&self.rpc.url)?;
        let address = self
            .multicall
            .address
            .parse()
            .context("Invalid multicall address")?;

        MulticallConfig::new(
            caller,
            address,
            self.multicall.batch_size,
            std::time::Duration::from_secs(self.multicall.timeout_secs),
        )
        .context("Invalid multicall settings")
    }
}
