use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Token as reported in the metrics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TokenInfo {
    /// EIP-55 checksummed contract address.
    pub address: String,
    pub symbol: String,
    /// USD price from the price index.
    pub price: f64,
}

/// Result of one yield computation, served by `GET /fast_apr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricsResult {
    /// Index of the pool in the staking controller's pool list.
    pub pool_index_in_masterchef: u64,
    /// e.g. `"WNEAR-WETH LP Uni V2"`.
    pub pool_name: String,
    /// Total LP units.
    pub tvl_pool: f64,
    pub tvl_pool_usd: f64,
    /// LP units staked in the controller.
    pub tvl_staked: f64,
    pub tvl_staked_usd: f64,
    pub lp_price_usd: f64,
    pub token_1: TokenInfo,
    pub token_2: TokenInfo,
    pub token_reward: TokenInfo,
    /// Reward tokens emitted to this pool per week.
    pub rewards_per_week: f64,
    /// USD value of `rewards_per_week`.
    pub rewards_per_week_used: f64,
    /// Percent.
    pub daily_apr: f64,
    /// Percent.
    pub weekly_apr: f64,
    /// Simple annualized return (weekly × 52), percent.
    pub apr: f64,
    /// Daily-compounded annual return, percent.
    pub apy: f64,
}

impl MetricsResult {
    /// Human-readable report of the computation.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "{} - [{}]-[{}] Uni LP:",
                self.pool_index_in_masterchef, self.token_1.symbol, self.token_2.symbol
            ),
            format!(
                "TVL Pool: {:.4} LP (${:.2})",
                self.tvl_pool, self.tvl_pool_usd
            ),
            format!(
                "TVL Staked: {:.4} LP (${:.2})",
                self.tvl_staked, self.tvl_staked_usd
            ),
            format!("LP Price: ${:.2}", self.lp_price_usd),
            format!("{} Price: ${:.2}", self.token_1.symbol, self.token_1.price),
            format!("{} Price: ${:.2}", self.token_2.symbol, self.token_2.price),
            format!(
                "{} per Week: {:.2} (${:.2})",
                self.token_reward.symbol, self.rewards_per_week, self.rewards_per_week_used
            ),
            format!(
                "APR: Day {:.2}% Week {:.2}% Year {:.2}%",
                self.daily_apr, self.weekly_apr, self.apr
            ),
            format!("APY: {:.2}% (with daily compounding)", self.apy),
        ]
    }
}
