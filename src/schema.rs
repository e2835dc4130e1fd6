use schemars::schema_for;

use crate::model::MetricsResult;

/// JSON Schema of `MetricsResult`, pretty-printed.
pub fn get_schema_json() -> anyhow::Result<String> {
    let schema = schema_for!(MetricsResult);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// Generate and print the JSON Schema for `MetricsResult`.
pub fn run() -> anyhow::Result<()> {
    println!("{}", get_schema_json()?);
    Ok(())
}
