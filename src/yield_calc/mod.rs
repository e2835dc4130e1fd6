pub mod formula;
pub mod staking;

use std::sync::Arc;

use alloy::primitives::Address;

use crate::chain::ChainReader;
use crate::config::PoolTarget;
use crate::error::{Result, YieldError};
use crate::model::{MetricsResult, Pool, RewardSchedule, Token};
use crate::oracle::PriceOracle;
use crate::registry::ContractRegistry;

use formula::{AprFigures, REWARD_DECIMALS, scale, weekly_pool_rewards};
use staking::find_staking_pool;

/// Computes the yield of one staked LP position from live chain and price
/// data. Holds no state between computations.
pub struct YieldCalculator {
    oracle: Arc<dyn PriceOracle>,
    chain: Arc<dyn ChainReader>,
    registry: Arc<ContractRegistry>,
    target: PoolTarget,
}

impl YieldCalculator {
    pub fn new(
        oracle: Arc<dyn PriceOracle>,
        chain: Arc<dyn ChainReader>,
        registry: Arc<ContractRegistry>,
        target: PoolTarget,
    ) -> Result<Self> {
        registry.check_target(&target)?;
        Ok(YieldCalculator {
            oracle,
            chain,
            registry,
            target,
        })
    }

    pub fn target(&self) -> &PoolTarget {
        &self.target
    }

    pub async fn compute_pool_yield(&self) -> Result<MetricsResult> {
        let chain = self.chain.as_ref();
        let oracle = self.oracle.as_ref();
        let target = &self.target;

        // 1. Prices
        let (price_1, price_2, reward_price) = tokio::try_join!(
            oracle.get_price(&target.token_1),
            oracle.get_price(&target.token_2),
            oracle.get_price(&target.reward_token),
        )?;

        // 2. Connectivity is reported, never enforced
        if chain.is_connected().await {
            tracing::info!("Connected to {}: OK", target.chain);
        } else {
            tracing::warn!("Connected to {}: KO", target.chain);
        }

        // 3. Contracts
        let factory = self.registry.address(&target.factory_role)?;
        let masterchef = self.registry.address(&target.staking_role)?;
        let address_1 = self.registry.address(&target.token_1)?;
        let address_2 = self.registry.address(&target.token_2)?;
        let reward_address = chain.reward_token(masterchef).await?;

        let ((symbol_1, decimals_1), (symbol_2, decimals_2), reward_symbol) = tokio::try_join!(
            token_metadata(chain, address_1),
            token_metadata(chain, address_2),
            chain.symbol(reward_address),
        )?;

        let token_1 = Token {
            address: address_1,
            symbol: symbol_1,
            decimals: decimals_1,
            price: price_1,
        };
        let token_2 = Token {
            address: address_2,
            symbol: symbol_2,
            decimals: decimals_2,
            price: price_2,
        };
        let reward = Token {
            address: reward_address,
            symbol: reward_symbol,
            decimals: REWARD_DECIMALS,
            price: reward_price,
        };

        // 4-6. Pool
        let pool = self
            .read_pool(factory, masterchef, &token_1, &token_2)
            .await?;

        // 7-8. TVL
        let tvl_pool_usd = pool.tvl_usd(&token_1, &token_2);
        let lp_price_usd = pool.lp_price_usd(tvl_pool_usd)?;
        let tvl_staked_usd = pool.staked_tvl_usd(lp_price_usd);

        // 9-11. Emission schedule
        let found = find_staking_pool(chain, masterchef, pool.address).await?;
        let total_alloc = chain.total_alloc_point(masterchef).await?;
        let height = chain.block_number().await?;
        let multiplier = chain
            .multiplier(
                masterchef,
                height,
                height.saturating_add(target.multiplier_window_blocks),
            )
            .await?;
        let reward_per_block = chain.reward_per_block(masterchef).await?;

        let schedule = RewardSchedule {
            pool_weight: scale(found.entry.alloc_point, 0)?,
            total_weight: scale(total_alloc, 0)?,
            reward_per_block: scale(reward_per_block, REWARD_DECIMALS)?,
            multiplier: scale(multiplier, 0)?,
        };
        tracing::debug!(?schedule, height, "reward schedule");

        // 12-14. Yield
        let rewards_per_week = weekly_pool_rewards(&schedule, target.fee_divisor)?;
        let rewards_per_week_usd = reward.value_usd(rewards_per_week);
        let apr = AprFigures::from_weekly_rewards(rewards_per_week_usd, tvl_staked_usd)?;

        let metrics = MetricsResult {
            pool_index_in_masterchef: found.index,
            pool_name: format!("{}-{} LP Uni V2", token_1.symbol, token_2.symbol),
            tvl_pool: pool.total_supply,
            tvl_pool_usd,
            tvl_staked: pool.staked_supply,
            tvl_staked_usd,
            lp_price_usd,
            token_1: token_1.info(),
            token_2: token_2.info(),
            token_reward: reward.info(),
            rewards_per_week,
            rewards_per_week_used: rewards_per_week_usd,
            daily_apr: apr.daily,
            weekly_apr: apr.weekly,
            apr: apr.annual,
            apy: apr.apy,
        };

        for line in metrics.summary_lines() {
            tracing::info!("{line}");
        }

        Ok(metrics)
    }

    /// Resolve the pair and read its supply, staked supply and reserves.
    async fn read_pool(
        &self,
        factory: Address,
        masterchef: Address,
        token_1: &Token,
        token_2: &Token,
    ) -> Result<Pool> {
        let chain = self.chain.as_ref();

        let address = chain
            .get_pair(factory, token_1.address, token_2.address)
            .await?;
        if address == Address::ZERO {
            return Err(YieldError::PairNotFound {
                token_1: token_1.symbol.clone(),
                token_2: token_2.symbol.clone(),
            });
        }

        let decimals = chain.decimals(address).await?;
        tracing::debug!(pair = %address, decimals, "pair resolved");
        let (total_supply, staked_supply, reserve_1, reserve_2) = tokio::try_join!(
            chain.total_supply(address),
            chain.balance_of(address, masterchef),
            chain.balance_of(token_1.address, address),
            chain.balance_of(token_2.address, address),
        )?;

        Ok(Pool {
            address,
            total_supply: scale(total_supply, decimals)?,
            staked_supply: scale(staked_supply, decimals)?,
            reserve_1: scale(reserve_1, token_1.decimals)?,
            reserve_2: scale(reserve_2, token_2.decimals)?,
        })
    }
}

async fn token_metadata(chain: &dyn ChainReader, token: Address) -> Result<(String, u8)> {
    tokio::try_join!(chain.symbol(token), chain.decimals(token))
}
