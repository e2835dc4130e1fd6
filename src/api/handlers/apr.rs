use axum::Json;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::model::MetricsResult;

/// `GET /fast_apr`: run one full computation and return it.
pub async fn fast_apr(State(state): State<AppState>) -> Result<Json<MetricsResult>, ApiError> {
    match state.calculator.compute_pool_yield().await {
        Ok(metrics) => Ok(Json(metrics)),
        Err(err) => {
            tracing::error!(kind = err.kind(), "yield computation failed: {err}");
            Err(err.into())
        }
    }
}
