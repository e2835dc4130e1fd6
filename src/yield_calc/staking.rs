use alloy::primitives::Address;

use crate::chain::{ChainReader, StakingPoolEntry};
use crate::error::{Result, YieldError};

/// A staking-controller pool matched to an LP token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingPoolMatch {
    pub index: u64,
    pub entry: StakingPoolEntry,
}

/// Find the staking pool that holds `lp_token`.
///
/// The controller has no lookup by address, so this walks `poolInfo(0..len)`
/// in order and stops at the first match. Each entry is read at most once.
pub async fn find_staking_pool(
    chain: &dyn ChainReader,
    masterchef: Address,
    lp_token: Address,
) -> Result<StakingPoolMatch> {
    let length = chain.pool_length(masterchef).await?;

    for index in 0..length {
        let entry = chain.pool_info(masterchef, index).await?;
        if entry.lp_token == lp_token {
            tracing::debug!(index, %lp_token, "found pool in staking controller");
            return Ok(StakingPoolMatch { index, entry });
        }
    }

    Err(YieldError::PoolNotFound {
        pool: lp_token.to_string(),
        scanned: length,
    })
}
