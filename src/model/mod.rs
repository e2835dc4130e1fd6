pub mod chain;
pub mod metrics;
pub mod pool;
pub mod token;

pub use chain::Chain;
pub use metrics::{MetricsResult, TokenInfo};
pub use pool::{Pool, RewardSchedule};
pub use token::Token;
