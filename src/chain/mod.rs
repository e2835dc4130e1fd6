pub mod evm;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::error::Result;

pub use evm::{EvmChain, bounded};

/// One entry of the staking controller's pool list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingPoolEntry {
    /// LP token staked in this pool.
    pub lp_token: Address,
    /// Allocation points of this pool.
    pub alloc_point: U256,
}

// ── Read-only chain access ──────────────────────────────────────────

/// Every contract read the yield calculator needs.
///
/// All methods are simulated calls: nothing here sends a transaction.
/// Amounts are returned raw (unscaled); scaling is the caller's job.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Cheap liveness probe of the node.
    async fn is_connected(&self) -> bool;

    async fn block_number(&self) -> Result<u64>;

    // ERC20 / pair
    async fn symbol(&self, token: Address) -> Result<String>;
    async fn decimals(&self, token: Address) -> Result<u8>;
    async fn total_supply(&self, token: Address) -> Result<U256>;
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    // Factory
    async fn get_pair(&self, factory: Address, token_a: Address, token_b: Address)
    -> Result<Address>;

    // Staking controller
    async fn pool_length(&self, masterchef: Address) -> Result<u64>;
    async fn pool_info(&self, masterchef: Address, index: u64) -> Result<StakingPoolEntry>;
    async fn total_alloc_point(&self, masterchef: Address) -> Result<U256>;
    async fn reward_token(&self, masterchef: Address) -> Result<Address>;
    async fn reward_per_block(&self, masterchef: Address) -> Result<U256>;
    async fn multiplier(&self, masterchef: Address, from: u64, to: u64) -> Result<U256>;
}
