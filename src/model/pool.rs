use alloy::primitives::Address;

use crate::error::{Result, YieldError};

use super::token::Token;

/// A Uniswap-V2 pair, with every amount already scaled to whole units.
///
/// Supply and reserves come from separate `eth_call`s, so they may straddle
/// a block boundary under heavy on-chain activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub address: Address,
    /// Total LP units in existence.
    pub total_supply: f64,
    /// LP units held by the staking controller.
    pub staked_supply: f64,
    /// Balance of `token_1` held by the pair.
    pub reserve_1: f64,
    /// Balance of `token_2` held by the pair.
    pub reserve_2: f64,
}

impl Pool {
    /// Σ(reserve × price) over both underlying tokens.
    pub fn tvl_usd(&self, token_1: &Token, token_2: &Token) -> f64 {
        token_1.value_usd(self.reserve_1) + token_2.value_usd(self.reserve_2)
    }

    /// USD value of a single LP unit.
    pub fn lp_price_usd(&self, tvl_usd: f64) -> Result<f64> {
        if self.total_supply <= 0.0 || !self.total_supply.is_finite() {
            return Err(YieldError::LiquidityZero("pool total supply"));
        }
        Ok(tvl_usd / self.total_supply)
    }

    pub fn staked_tvl_usd(&self, lp_price_usd: f64) -> f64 {
        self.staked_supply * lp_price_usd
    }
}

/// Emission parameters of the staking controller relevant to one pool.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardSchedule {
    /// Allocation points of the matched staking pool.
    pub pool_weight: f64,
    /// Sum of allocation points over all staking pools.
    pub total_weight: f64,
    /// Reward tokens emitted per block, already divided by 1e18.
    pub reward_per_block: f64,
    /// Block-range multiplier sampled at the current height.
    pub multiplier: f64,
}

impl RewardSchedule {
    /// Fraction of total emissions routed to this pool.
    pub fn pool_share(&self) -> Result<f64> {
        if self.total_weight <= 0.0 {
            return Err(YieldError::InvalidSchedule(
                "total allocation weight is zero".to_string(),
            ));
        }
        Ok(self.pool_weight / self.total_weight)
    }
}
