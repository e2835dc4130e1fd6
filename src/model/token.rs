use alloy::primitives::Address;

use super::metrics::TokenInfo;

/// An ERC20 token as seen during one computation: on-chain metadata plus
/// its current USD price.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub price: f64,
}

impl Token {
    /// USD value of `amount` whole tokens.
    pub fn value_usd(&self, amount: f64) -> f64 {
        amount * self.price
    }

    pub fn info(&self) -> TokenInfo {
        TokenInfo {
            address: self.address.to_string(),
            symbol: self.symbol.clone(),
            price: self.price,
        }
    }
}
