//! Local contract registry.
//!
//! The registry is a JSON document maintained alongside the deployment:
//!
//! ```json
//! {
//!   "address": { "auroraswap_factory": "0x...", "near": "0x...", ... },
//!   "abi":     { "factory": [...], "masterchef": [...], "erc20": [...], "pair": [...] }
//! }
//! ```
//!
//! Addresses are keyed by contract role or token id. ABIs are keyed by
//! interface role and must declare every function the chain reader calls.

use std::collections::HashMap;
use std::path::Path;

use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use serde::Deserialize;

use crate::config::PoolTarget;
use crate::error::{Result, YieldError};

/// Interface roles and the functions each must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiRole {
    Factory,
    Masterchef,
    Erc20,
    Pair,
}

impl AbiRole {
    pub const ALL: [AbiRole; 4] = [
        AbiRole::Factory,
        AbiRole::Masterchef,
        AbiRole::Erc20,
        AbiRole::Pair,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AbiRole::Factory => "factory",
            AbiRole::Masterchef => "masterchef",
            AbiRole::Erc20 => "erc20",
            AbiRole::Pair => "pair",
        }
    }

    pub fn required_functions(self) -> &'static [&'static str] {
        match self {
            AbiRole::Factory => &["getPair"],
            AbiRole::Masterchef => &[
                "poolLength",
                "poolInfo",
                "totalAllocPoint",
                "getMultiplier",
                "BRL",
                "BRLPerBlock",
            ],
            AbiRole::Erc20 => &["symbol", "decimals", "balanceOf"],
            AbiRole::Pair => &["decimals", "totalSupply", "balanceOf"],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    address: HashMap<String, String>,
    abi: HashMap<String, serde_json::Value>,
}

/// Parsed and checked registry.
#[derive(Debug, Clone)]
pub struct ContractRegistry {
    addresses: HashMap<String, Address>,
}

impl ContractRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| YieldError::Registry(format!("reading {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(content)
            .map_err(|e| YieldError::Registry(format!("malformed registry: {e}")))?;

        let mut addresses = HashMap::with_capacity(file.address.len());
        for (key, raw) in &file.address {
            let address: Address = raw
                .parse()
                .map_err(|e| YieldError::Registry(format!("address `{key}` = {raw}: {e}")))?;
            if address == Address::ZERO {
                return Err(YieldError::Registry(format!(
                    "address `{key}` is the zero address"
                )));
            }
            addresses.insert(key.clone(), address);
        }

        for role in AbiRole::ALL {
            let raw = file
                .abi
                .get(role.key())
                .ok_or_else(|| YieldError::Registry(format!("missing abi `{}`", role.key())))?;
            let abi: JsonAbi = serde_json::from_value(raw.clone())
                .map_err(|e| YieldError::Registry(format!("abi `{}`: {e}", role.key())))?;
            for function in role.required_functions() {
                if abi.function(function).is_none() {
                    return Err(YieldError::Registry(format!(
                        "abi `{}` does not declare `{function}`",
                        role.key()
                    )));
                }
            }
        }

        Ok(ContractRegistry { addresses })
    }

    pub fn address(&self, key: &str) -> Result<Address> {
        self.addresses
            .get(key)
            .copied()
            .ok_or_else(|| YieldError::Registry(format!("no address for `{key}`")))
    }

    /// Fail early if the registry cannot serve `target`.
    pub fn check_target(&self, target: &PoolTarget) -> Result<()> {
        for key in [
            &target.factory_role,
            &target.staking_role,
            &target.token_1,
            &target.token_2,
        ] {
            self.address(key)?;
        }
        Ok(())
    }
}
