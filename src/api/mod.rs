pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::chain::evm;
use crate::config::AppConfig;
use crate::oracle::CoinGecko;
use crate::registry::ContractRegistry;
use crate::yield_calc::YieldCalculator;

use state::AppState;

/// Wire the live price index, chain reader and registry into a calculator.
pub fn build_calculator(config: &AppConfig) -> Result<YieldCalculator> {
    let registry = ContractRegistry::load(&config.registry)
        .with_context(|| format!("loading registry {}", config.registry.display()))?;
    let oracle = CoinGecko::new(&config.oracle)?;
    let chain = evm::connect_http(&config.chain.rpc_url, config.rpc_timeout())?;

    YieldCalculator::new(
        Arc::new(oracle),
        Arc::new(chain),
        Arc::new(registry),
        config.target(),
    )
    .context("registry does not cover the configured pool")
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::page::index))
        .route("/fast_apr", get(handlers::apr::fast_apr))
        .route("/health", get(|| async { "ok" }))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = AppState::new(build_calculator(config)?);
    let target = state.calculator.target();
    let pair = format!("{}-{}", target.token_1, target.token_2);
    tracing::info!(chain = %config.chain, %pair, "calculator ready");

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    println!("fast-apr listening on {addr}");
    println!("  Page:     GET  http://{addr}/");
    println!("  APR:      GET  http://{addr}/fast_apr");
    println!("  Health:   GET  http://{addr}/health");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    axum::serve(listener, app).await.context("running server")?;

    Ok(())
}
