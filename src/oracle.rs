use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::config::OracleConfig;
use crate::error::{Result, YieldError};

/// Optional CoinGecko demo-tier key, sent as `x-cg-demo-api-key`.
const API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// Looks up the current price of a token by its price-index id
/// (e.g. `"near"`), which is unrelated to its contract address.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn get_price(&self, token_id: &str) -> Result<f64>;
}

/// `/simple/price` response: `{"near": {"usd": 2.31}}`.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

// ── CoinGecko ───────────────────────────────────────────────────────

pub struct CoinGecko {
    client: reqwest::Client,
    base_url: String,
    vs_currency: String,
    api_key: Option<String>,
}

impl CoinGecko {
    pub fn new(config: &OracleConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("fast-apr/0.1")
            .build()
            .context("building CoinGecko HTTP client")?;

        Ok(CoinGecko {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.to_lowercase(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait]
impl PriceOracle for CoinGecko {
    async fn get_price(&self, token_id: &str) -> Result<f64> {
        let url = format!("{}/simple/price", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("ids", token_id), ("vs_currencies", self.vs_currency.as_str())])
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let body = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| request_error(token_id, e))?
            .json::<SimplePriceResponse>()
            .await
            .map_err(|e| request_error(token_id, e))?;

        let price = select_price(&body, token_id, &self.vs_currency)?;
        tracing::debug!(token = token_id, price, "price lookup");
        Ok(price)
    }
}

fn request_error(token_id: &str, err: reqwest::Error) -> YieldError {
    if err.is_timeout() {
        YieldError::Timeout(format!("price of `{token_id}`"))
    } else {
        YieldError::Connection(format!("price index ({token_id}): {err}"))
    }
}

/// Pick `body[token_id][vs_currency]`. CoinGecko answers unknown ids with
/// an empty object rather than an HTTP error.
fn select_price(body: &SimplePriceResponse, token_id: &str, vs_currency: &str) -> Result<f64> {
    body.get(token_id)
        .and_then(|quotes| quotes.get(vs_currency))
        .copied()
        .ok_or_else(|| YieldError::UnknownToken(token_id.to_string()))
}
