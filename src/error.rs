use thiserror::Error;

/// Every way a yield computation can fail.
///
/// There are no partial results: the first error aborts the computation and
/// is handed to the caller unchanged.
#[derive(Debug, Error)]
pub enum YieldError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("timed out waiting for {0}")]
    Timeout(String),

    #[error("price index does not know token `{0}`")]
    UnknownToken(String),

    #[error("factory has no pair for {token_1} / {token_2}")]
    PairNotFound { token_1: String, token_2: String },

    #[error("pool {pool} not registered in staking controller ({scanned} entries scanned)")]
    PoolNotFound { pool: String, scanned: u64 },

    #[error("no liquidity: {0} is zero")]
    LiquidityZero(&'static str),

    #[error("{0} is not finite; staked liquidity is too small to quote a yield")]
    YieldOverflow(&'static str),

    #[error("invalid reward schedule: {0}")]
    InvalidSchedule(String),

    #[error("contract registry: {0}")]
    Registry(String),
}

impl YieldError {
    /// Stable machine-readable name, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            YieldError::Connection(_) => "connection_error",
            YieldError::Timeout(_) => "timeout",
            YieldError::UnknownToken(_) => "unknown_token",
            YieldError::PairNotFound { .. } => "pair_not_found",
            YieldError::PoolNotFound { .. } => "pool_not_found",
            YieldError::LiquidityZero(_) => "liquidity_zero",
            YieldError::YieldOverflow(_) => "yield_overflow",
            YieldError::InvalidSchedule(_) => "invalid_schedule",
            YieldError::Registry(_) => "registry_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, YieldError>;
