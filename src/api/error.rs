use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::YieldError;

#[derive(Debug)]
pub enum ApiError {
    /// A remote dependency (node or price index) failed or timed out.
    BadGateway { kind: &'static str, message: String },
    /// The pool exists but has nothing to compute a yield on.
    Unavailable { kind: &'static str, message: String },
    Internal { kind: &'static str, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, message) = match self {
            ApiError::BadGateway { kind, message }
            | ApiError::Unavailable { kind, message }
            | ApiError::Internal { kind, message } => (kind, message),
        };

        (status, axum::Json(json!({ "error": message, "kind": kind }))).into_response()
    }
}

impl From<YieldError> for ApiError {
    fn from(err: YieldError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            YieldError::Connection(_) | YieldError::Timeout(_) => {
                ApiError::BadGateway { kind, message }
            }
            YieldError::LiquidityZero(_) | YieldError::YieldOverflow(_) => {
                ApiError::Unavailable { kind, message }
            }
            YieldError::UnknownToken(_)
            | YieldError::PairNotFound { .. }
            | YieldError::PoolNotFound { .. }
            | YieldError::InvalidSchedule(_)
            | YieldError::Registry(_) => ApiError::Internal { kind, message },
        }
    }
}
