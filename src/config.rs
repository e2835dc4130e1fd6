use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::model::Chain;
use crate::yield_calc::formula::{FEE_DIVISOR, MULTIPLIER_WINDOW_BLOCKS};

/// Runtime configuration, loaded from a JSON file.
///
/// Every field has a default, so an empty `{}` targets the NEAR/WETH farm
/// on Aurora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chain: Chain,
    /// CoinGecko id of the first pool token; also its key in the registry.
    pub token_1: String,
    /// CoinGecko id of the second pool token; also its key in the registry.
    pub token_2: String,
    /// CoinGecko id of the reward token.
    pub reward_token: String,
    /// Path of the contract registry (addresses + ABIs).
    pub registry: PathBuf,
    /// Registry address key of the pair factory.
    pub factory_role: String,
    /// Registry address key of the staking controller.
    pub staking_role: String,
    pub rpc_timeout_secs: u64,
    pub reward: RewardConfig,
    pub oracle: OracleConfig,
    pub server: ServerConfig,
}

/// Protocol-specific constants of the reward formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Divides gross weekly emissions to account for the protocol's dev/fee
    /// cut. Must match the deployment or every figure is off.
    pub fee_divisor: f64,
    /// Width of the block range passed to `getMultiplier`, starting at the
    /// current height.
    pub multiplier_window_blocks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub base_url: String,
    pub vs_currency: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            chain: Chain::aurora(),
            token_1: "near".into(),
            token_2: "weth".into(),
            reward_token: "borealis".into(),
            registry: PathBuf::from("contracts.json"),
            factory_role: "auroraswap_factory".into(),
            staking_role: "auroraswap_masterchef".into(),
            rpc_timeout_secs: 15,
            reward: RewardConfig::default(),
            oracle: OracleConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            fee_divisor: FEE_DIVISOR,
            multiplier_window_blocks: MULTIPLIER_WINDOW_BLOCKS,
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            base_url: "https://api.coingecko.com/api/v3".into(),
            vs_currency: "usd".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<AppConfig>(&content)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => AppConfig::default(),
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.reward.fee_divisor <= 0.0 || !self.reward.fee_divisor.is_finite() {
            bail!(
                "reward.fee_divisor must be a positive number, got {}",
                self.reward.fee_divisor
            );
        }
        if self.reward.multiplier_window_blocks == 0 {
            bail!("reward.multiplier_window_blocks must be at least 1");
        }
        if self.token_1 == self.token_2 {
            bail!("token_1 and token_2 are both `{}`", self.token_1);
        }
        Ok(())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Pool-selection part of the config, as consumed by the calculator.
    pub fn target(&self) -> PoolTarget {
        PoolTarget {
            chain: self.chain.name.clone(),
            token_1: self.token_1.clone(),
            token_2: self.token_2.clone(),
            reward_token: self.reward_token.clone(),
            factory_role: self.factory_role.clone(),
            staking_role: self.staking_role.clone(),
            fee_divisor: self.reward.fee_divisor,
            multiplier_window_blocks: self.reward.multiplier_window_blocks,
        }
    }
}

/// Which farm to evaluate and with which protocol constants.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolTarget {
    /// Chain display name, for logs.
    pub chain: String,
    pub token_1: String,
    pub token_2: String,
    pub reward_token: String,
    pub factory_role: String,
    pub staking_role: String,
    pub fee_divisor: f64,
    pub multiplier_window_blocks: u64,
}
