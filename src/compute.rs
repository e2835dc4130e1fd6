use anyhow::{Context, Result};

use crate::config::AppConfig;

/// Entry point for the `compute` command: one computation, printed to stdout.
pub async fn run(config: &AppConfig, json: bool) -> Result<()> {
    let calculator = crate::api::build_calculator(config)?;
    let metrics = calculator
        .compute_pool_yield()
        .await
        .context("computing pool yield")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        for line in metrics.summary_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
