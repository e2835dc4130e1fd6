//! Pure arithmetic of the yield calculation. Nothing here touches the network.

use alloy::primitives::U256;

use crate::error::{Result, YieldError};
use crate::model::RewardSchedule;

/// Seconds in a week. Rewards are emitted per block and the formula assumes
/// one block per second.
pub const SECONDS_PER_WEEK: f64 = 60.0 * 60.0 * 24.0 * 7.0;

/// Default correction applied to gross weekly emissions for the protocol's
/// fee split.
pub const FEE_DIVISOR: f64 = 1.1;

/// Default width of the `getMultiplier` block range, starting at the current
/// height. Sampling a single block assumes the multiplier stays constant.
pub const MULTIPLIER_WINDOW_BLOCKS: u64 = 1;

/// Fixed-point scale of the reward-per-block value.
pub const REWARD_DECIMALS: u8 = 18;

/// Scale a raw on-chain integer by `10^decimals`.
pub fn scale(raw: U256, decimals: u8) -> Result<f64> {
    let whole: f64 = raw
        .to_string()
        .parse()
        .map_err(|e| YieldError::Connection(format!("cannot represent {raw} as f64: {e}")))?;
    Ok(whole / 10f64.powi(decimals as i32))
}

/// Reward tokens emitted to the pool per week:
/// `reward_per_block × multiplier × SECONDS_PER_WEEK / fee_divisor × share`.
pub fn weekly_pool_rewards(schedule: &RewardSchedule, fee_divisor: f64) -> Result<f64> {
    if fee_divisor <= 0.0 || !fee_divisor.is_finite() {
        return Err(YieldError::InvalidSchedule(format!(
            "fee divisor must be positive, got {fee_divisor}"
        )));
    }
    let gross = schedule.reward_per_block * schedule.multiplier * SECONDS_PER_WEEK / fee_divisor;
    Ok(schedule.pool_share()? * gross)
}

/// Yield figures in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AprFigures {
    pub daily: f64,
    pub weekly: f64,
    /// Simple annualization, weekly × 52.
    pub annual: f64,
    /// Daily compounding over a 365-day year.
    pub apy: f64,
}

impl AprFigures {
    pub fn from_weekly_rewards(usd_per_week: f64, staked_tvl_usd: f64) -> Result<Self> {
        if staked_tvl_usd <= 0.0 || !staked_tvl_usd.is_finite() {
            return Err(YieldError::LiquidityZero("staked TVL"));
        }
        let weekly = usd_per_week / staked_tvl_usd * 100.0;
        let daily = weekly / 7.0;
        let figures = AprFigures {
            daily,
            weekly,
            annual: weekly * 52.0,
            apy: compound_daily(daily),
        };
        figures.ensure_finite()?;
        Ok(figures)
    }

    fn ensure_finite(&self) -> Result<()> {
        for (name, value) in [
            ("daily_apr", self.daily),
            ("weekly_apr", self.weekly),
            ("apr", self.annual),
            ("apy", self.apy),
        ] {
            if !value.is_finite() {
                return Err(YieldError::YieldOverflow(name));
            }
        }
        Ok(())
    }
}

/// `((1 + daily/100)^365 − 1) × 100`.
pub fn compound_daily(daily_pct: f64) -> f64 {
    ((1.0 + daily_pct / 100.0).powi(365) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn schedule(pool_weight: f64, total_weight: f64) -> RewardSchedule {
        RewardSchedule {
            pool_weight,
            total_weight,
            reward_per_block: 2.0,
            multiplier: 1.0,
        }
    }

    #[test]
    fn scale_by_decimals() {
        let raw = U256::from(1_500_000u64);
        assert_eq!(scale(raw, 6).unwrap(), 1.5);
        let one_ether = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(scale(one_ether, 18).unwrap(), 1.0);
        assert_eq!(scale(U256::ZERO, 18).unwrap(), 0.0);
    }

    #[test]
    fn weekly_rewards_follow_formula() {
        let weekly = weekly_pool_rewards(&schedule(10.0, 100.0), 1.1).unwrap();
        let expected = 2.0 * 1.0 * 604_800.0 / 1.1 * 0.1;
        assert!(close(weekly, expected));
    }

    #[test]
    fn weekly_rewards_reject_bad_divisor() {
        assert!(weekly_pool_rewards(&schedule(10.0, 100.0), 0.0).is_err());
    }

    #[test]
    fn apr_identities() {
        let apr = AprFigures::from_weekly_rewards(12.5, 500.0).unwrap();
        assert!(close(apr.weekly, 2.5));
        assert!(close(apr.daily * 7.0, apr.weekly));
        assert!(close(apr.annual, apr.weekly * 52.0));
    }

    #[test]
    fn compounding_dominates_simple_annualization() {
        for usd in [0.01, 1.0, 10.0, 100.0, 1_000.0] {
            let apr = AprFigures::from_weekly_rewards(usd, 500.0).unwrap();
            assert!(apr.daily > 0.0);
            assert!(apr.apy >= apr.annual, "apy {} < apr {}", apr.apy, apr.annual);
        }
    }

    #[test]
    fn zero_stake_is_no_liquidity() {
        let err = AprFigures::from_weekly_rewards(100.0, 0.0).unwrap_err();
        assert!(matches!(err, YieldError::LiquidityZero(_)));
        assert!(AprFigures::from_weekly_rewards(100.0, f64::NAN).is_err());
    }

    #[test]
    fn dust_stake_overflows_compounding() {
        // ~1000% a day: simple APR is finite, (1 + 10)^365 is not
        let err = AprFigures::from_weekly_rewards(70.0, 1.0).unwrap_err();
        assert!(matches!(err, YieldError::YieldOverflow("apy")), "got {err}");
    }

    #[test]
    fn zero_rewards_give_zero_yield() {
        let apr = AprFigures::from_weekly_rewards(0.0, 500.0).unwrap();
        assert_eq!(apr.apy, 0.0);
        assert_eq!(apr.annual, 0.0);
    }
}
