#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use fast_apr::chain::{ChainReader, StakingPoolEntry, bounded};
use fast_apr::config::{AppConfig, PoolTarget};
use fast_apr::error::{Result, YieldError};
use fast_apr::oracle::PriceOracle;
use fast_apr::registry::{AbiRole, ContractRegistry};
use fast_apr::yield_calc::YieldCalculator;

// ── Addresses ────────────────────────────────────────────────────────

pub fn factory() -> Address {
    Address::repeat_byte(0x01)
}
pub fn masterchef() -> Address {
    Address::repeat_byte(0x02)
}
pub fn token_1() -> Address {
    Address::repeat_byte(0x11)
}
pub fn token_2() -> Address {
    Address::repeat_byte(0x12)
}
pub fn reward_token() -> Address {
    Address::repeat_byte(0x13)
}
pub fn pair() -> Address {
    Address::repeat_byte(0x21)
}

/// `whole × 10^decimals`.
pub fn units(whole: u64, decimals: u8) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(decimals))
}

// ── Mock price index ────────────────────────────────────────────────

pub struct MockOracle {
    prices: HashMap<String, f64>,
    pub calls: AtomicU64,
}

impl MockOracle {
    pub fn new(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: prices.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            calls: AtomicU64::new(0),
        }
    }

    /// near $5, weth $1, borealis $0.5.
    pub fn scenario() -> Self {
        Self::new(&[("near", 5.0), ("weth", 1.0), ("borealis", 0.5)])
    }
}

#[async_trait]
impl PriceOracle for MockOracle {
    async fn get_price(&self, token_id: &str) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .get(token_id)
            .copied()
            .ok_or_else(|| YieldError::UnknownToken(token_id.to_string()))
    }
}

// ── Mock chain ──────────────────────────────────────────────────────

pub struct MockChain {
    pub connected: bool,
    /// When set, `block_number` never answers and is cut off after this long.
    pub hang: Option<Duration>,
    pub block: u64,
    pub symbols: HashMap<Address, String>,
    pub decimals: HashMap<Address, u8>,
    pub supplies: HashMap<Address, U256>,
    pub balances: HashMap<(Address, Address), U256>,
    pub pair: Address,
    pub pools: Vec<StakingPoolEntry>,
    pub total_alloc: U256,
    pub reward_per_block: U256,
    pub multiplier: U256,
    pub pool_info_calls: AtomicU64,
    pub multiplier_args: Mutex<Option<(u64, u64)>>,
}

impl MockChain {
    /// Reserves 100 WNEAR / 500 USDC, 50 LP minted, 25 LP staked, pool #2
    /// with weight 10 of 100, 0.002 reward tokens per block, multiplier 1.
    pub fn scenario() -> Self {
        let symbols = HashMap::from([
            (token_1(), "WNEAR".to_string()),
            (token_2(), "USDC".to_string()),
            (reward_token(), "BRL".to_string()),
            (pair(), "UNI-V2".to_string()),
        ]);
        let decimals = HashMap::from([
            (token_1(), 24u8),
            (token_2(), 6u8),
            (reward_token(), 18u8),
            (pair(), 18u8),
        ]);
        let supplies = HashMap::from([(pair(), units(50, 18))]);
        let balances = HashMap::from([
            ((pair(), masterchef()), units(25, 18)),
            ((token_1(), pair()), units(100, 24)),
            ((token_2(), pair()), units(500, 6)),
        ]);
        let pools = vec![
            StakingPoolEntry {
                lp_token: Address::repeat_byte(0x31),
                alloc_point: U256::from(60u64),
            },
            StakingPoolEntry {
                lp_token: Address::repeat_byte(0x32),
                alloc_point: U256::from(30u64),
            },
            StakingPoolEntry {
                lp_token: pair(),
                alloc_point: U256::from(10u64),
            },
        ];

        MockChain {
            connected: true,
            hang: None,
            block: 60_000_000,
            symbols,
            decimals,
            supplies,
            balances,
            pair: pair(),
            pools,
            total_alloc: U256::from(100u64),
            reward_per_block: units(2, 15),
            multiplier: U256::from(1u64),
            pool_info_calls: AtomicU64::new(0),
            multiplier_args: Mutex::new(None),
        }
    }

    pub fn set_supply(&mut self, total: U256, staked: U256) {
        self.supplies.insert(pair(), total);
        self.balances.insert((pair(), masterchef()), staked);
    }
}

fn missing(what: &str, key: impl std::fmt::Display) -> YieldError {
    YieldError::Connection(format!("mock has no {what} for {key}"))
}

#[async_trait]
impl ChainReader for MockChain {
    async fn is_connected(&self) -> bool {
        self.connected
    }

    async fn block_number(&self) -> Result<u64> {
        if let Some(timeout) = self.hang {
            let silent = std::future::pending::<std::result::Result<u64, String>>();
            return bounded(timeout, "eth_blockNumber", silent).await;
        }
        Ok(self.block)
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        self.symbols
            .get(&token)
            .cloned()
            .ok_or_else(|| missing("symbol", token))
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| missing("decimals", token))
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        self.supplies
            .get(&token)
            .copied()
            .ok_or_else(|| missing("totalSupply", token))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        Ok(self
            .balances
            .get(&(token, owner))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn get_pair(&self, factory_address: Address, a: Address, b: Address) -> Result<Address> {
        if factory_address != factory() {
            return Err(missing("factory", factory_address));
        }
        let known = [token_1(), token_2()];
        if known.contains(&a) && known.contains(&b) {
            Ok(self.pair)
        } else {
            Ok(Address::ZERO)
        }
    }

    async fn pool_length(&self, _masterchef: Address) -> Result<u64> {
        Ok(self.pools.len() as u64)
    }

    async fn pool_info(&self, _masterchef: Address, index: u64) -> Result<StakingPoolEntry> {
        self.pool_info_calls.fetch_add(1, Ordering::SeqCst);
        self.pools
            .get(index as usize)
            .cloned()
            .ok_or_else(|| missing("poolInfo", index))
    }

    async fn total_alloc_point(&self, _masterchef: Address) -> Result<U256> {
        Ok(self.total_alloc)
    }

    async fn reward_token(&self, _masterchef: Address) -> Result<Address> {
        Ok(reward_token())
    }

    async fn reward_per_block(&self, _masterchef: Address) -> Result<U256> {
        Ok(self.reward_per_block)
    }

    async fn multiplier(&self, _masterchef: Address, from: u64, to: u64) -> Result<U256> {
        *self.multiplier_args.lock().unwrap() = Some((from, to));
        Ok(self.multiplier)
    }
}

// ── Registry + calculator ───────────────────────────────────────────

fn abi(functions: &[&str]) -> serde_json::Value {
    functions
        .iter()
        .map(|name| {
            serde_json::json!({
                "type": "function",
                "name": name,
                "inputs": [],
                "outputs": [],
                "stateMutability": "view"
            })
        })
        .collect()
}

pub fn registry() -> ContractRegistry {
    let json = serde_json::json!({
        "address": {
            "auroraswap_factory": factory().to_string(),
            "auroraswap_masterchef": masterchef().to_string(),
            "near": token_1().to_string(),
            "weth": token_2().to_string(),
        },
        "abi": {
            "factory": abi(AbiRole::Factory.required_functions()),
            "masterchef": abi(AbiRole::Masterchef.required_functions()),
            "erc20": abi(AbiRole::Erc20.required_functions()),
            "pair": abi(AbiRole::Pair.required_functions()),
        }
    });
    ContractRegistry::from_json(&json.to_string()).expect("test registry is valid")
}

pub fn target() -> PoolTarget {
    AppConfig::default().target()
}

pub fn calculator_with(
    oracle: MockOracle,
    chain: MockChain,
    target: PoolTarget,
) -> (YieldCalculator, Arc<MockOracle>, Arc<MockChain>) {
    let oracle = Arc::new(oracle);
    let chain = Arc::new(chain);
    let calculator = YieldCalculator::new(
        oracle.clone(),
        chain.clone(),
        Arc::new(registry()),
        target,
    )
    .expect("registry covers target");
    (calculator, oracle, chain)
}

pub fn calculator(
    oracle: MockOracle,
    chain: MockChain,
) -> (YieldCalculator, Arc<MockOracle>, Arc<MockChain>) {
    calculator_with(oracle, chain, target())
}
