use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;

use crate::error::{Result, YieldError};

use super::{ChainReader, StakingPoolEntry};

// ── Contract interfaces ──────────────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IERC20 {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IUniswapV2Factory {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }
}

// Only the leading `lpToken, allocPoint` words of `poolInfo` are declared;
// the remaining struct fields are ignored by the decoder.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IMasterChef {
        function poolLength() external view returns (uint256);
        function poolInfo(uint256 pid) external view returns (address lpToken, uint256 allocPoint);
        function totalAllocPoint() external view returns (uint256);
        function getMultiplier(uint256 from, uint256 to) external view returns (uint256);
        function BRL() external view returns (address);
        function BRLPerBlock() external view returns (uint256);
    }
}

// ── Provider factory ───────────────────────────────────────────────

/// Create an HTTP-backed chain reader; every call is bounded by `timeout`.
pub fn connect_http(
    rpc_url: &str,
    timeout: Duration,
) -> anyhow::Result<EvmChain<impl Provider + Clone + use<>>> {
    let provider = ProviderBuilder::new().connect_http(
        rpc_url
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid RPC URL {rpc_url}: {e}"))?,
    );
    Ok(EvmChain::new(provider, timeout))
}

// ── EVM chain reader ────────────────────────────────────────────────

pub struct EvmChain<P> {
    provider: P,
    timeout: Duration,
}

impl<P: Provider> EvmChain<P> {
    pub fn new(provider: P, timeout: Duration) -> Self {
        EvmChain { provider, timeout }
    }

    async fn bounded<F, T, E>(&self, what: &str, call: F) -> Result<T>
    where
        F: IntoFuture<Output = std::result::Result<T, E>>,
        E: std::fmt::Display,
    {
        bounded(self.timeout, what, call).await
    }
}

/// Await `call` for at most `timeout`, labelling failures with `what`.
pub async fn bounded<F, T, E>(timeout: Duration, what: &str, call: F) -> Result<T>
where
    F: IntoFuture<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(YieldError::Connection(format!("{what}: {e}"))),
        Err(_) => Err(YieldError::Timeout(what.to_string())),
    }
}

fn to_u64(value: U256, what: &str) -> Result<u64> {
    value
        .try_into()
        .map_err(|_| YieldError::Connection(format!("{what} returned {value}, out of range")))
}

#[async_trait]
impl<P: Provider + 'static> ChainReader for EvmChain<P> {
    async fn is_connected(&self) -> bool {
        matches!(
            tokio::time::timeout(self.timeout, self.provider.get_chain_id()).await,
            Ok(Ok(_))
        )
    }

    async fn block_number(&self) -> Result<u64> {
        self.bounded("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        let erc20 = IERC20::new(token, &self.provider);
        self.bounded("erc20.symbol", erc20.symbol().call()).await
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        let erc20 = IERC20::new(token, &self.provider);
        self.bounded("erc20.decimals", erc20.decimals().call()).await
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        let erc20 = IERC20::new(token, &self.provider);
        self.bounded("erc20.totalSupply", erc20.totalSupply().call())
            .await
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let erc20 = IERC20::new(token, &self.provider);
        self.bounded("erc20.balanceOf", erc20.balanceOf(owner).call())
            .await
    }

    async fn get_pair(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address> {
        let factory = IUniswapV2Factory::new(factory, &self.provider);
        self.bounded("factory.getPair", factory.getPair(token_a, token_b).call())
            .await
    }

    async fn pool_length(&self, masterchef: Address) -> Result<u64> {
        let chef = IMasterChef::new(masterchef, &self.provider);
        let length = self
            .bounded("masterchef.poolLength", chef.poolLength().call())
            .await?;
        to_u64(length, "masterchef.poolLength")
    }

    async fn pool_info(&self, masterchef: Address, index: u64) -> Result<StakingPoolEntry> {
        let chef = IMasterChef::new(masterchef, &self.provider);
        let info = self
            .bounded("masterchef.poolInfo", chef.poolInfo(U256::from(index)).call())
            .await?;
        Ok(StakingPoolEntry {
            lp_token: info.lpToken,
            alloc_point: info.allocPoint,
        })
    }

    async fn total_alloc_point(&self, masterchef: Address) -> Result<U256> {
        let chef = IMasterChef::new(masterchef, &self.provider);
        self.bounded("masterchef.totalAllocPoint", chef.totalAllocPoint().call())
            .await
    }

    async fn reward_token(&self, masterchef: Address) -> Result<Address> {
        let chef = IMasterChef::new(masterchef, &self.provider);
        self.bounded("masterchef.BRL", chef.BRL().call()).await
    }

    async fn reward_per_block(&self, masterchef: Address) -> Result<U256> {
        let chef = IMasterChef::new(masterchef, &self.provider);
        self.bounded("masterchef.BRLPerBlock", chef.BRLPerBlock().call())
            .await
    }

    async fn multiplier(&self, masterchef: Address, from: u64, to: u64) -> Result<U256> {
        let chef = IMasterChef::new(masterchef, &self.provider);
        self.bounded(
            "masterchef.getMultiplier",
            chef.getMultiplier(U256::from(from), U256::from(to)).call(),
        )
        .await
    }
}
