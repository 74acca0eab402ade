use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

use super::IsRetryable;

#[derive(Debug, ThisError)]
pub enum PrismError {
    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Upstream rejected the pricing request: {0}")]
    UpstreamRejected(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Pricing catalog not loaded yet")]
    CatalogUnavailable,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for PrismError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            PrismError::RactorError(_)
            | PrismError::UnexpectedError(_)
            | PrismError::IoError(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (status, body)
            }

            PrismError::JsonError(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "BAD_UPSTREAM_PAYLOAD".to_string(),
                    message: "Failed to parse upstream response.".to_string(),
                    details: None,
                };
                (status, body)
            }

            PrismError::UpstreamRejected(message) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "UPSTREAM_REJECTED".to_string(),
                    message: "Upstream rejected the pricing request.".to_string(),
                    details: Some(Value::String(message)),
                };
                (status, body)
            }

            PrismError::UpstreamStatus(_)
            | PrismError::ReqwestError(_)
            | PrismError::UrlError(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream service error.".to_string(),
                    details: None,
                };
                (status, body)
            }

            PrismError::CatalogUnavailable => {
                let status = StatusCode::SERVICE_UNAVAILABLE;
                let body = ApiErrorObject {
                    code: "CATALOG_UNAVAILABLE".to_string(),
                    message: "The pricing catalog has not been loaded yet.".to_string(),
                    details: None,
                };
                (status, body)
            }

            PrismError::InvalidQuery(message) => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorObject {
                    code: "INVALID_QUERY".to_string(),
                    message,
                    details: None,
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

impl IsRetryable for PrismError {
    fn is_retryable(&self) -> bool {
        match self {
            PrismError::ReqwestError(e) => !e.is_decode() && !e.is_builder(),
            PrismError::UpstreamStatus(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_and_rate_limits_are_retryable() {
        assert!(PrismError::UpstreamStatus(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(PrismError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!PrismError::UpstreamStatus(StatusCode::NOT_FOUND).is_retryable());
        assert!(!PrismError::UpstreamRejected("nope".to_string()).is_retryable());
        assert!(!PrismError::CatalogUnavailable.is_retryable());
    }

    #[test]
    fn catalog_unavailable_maps_to_503() {
        let resp = PrismError::CatalogUnavailable.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn invalid_query_maps_to_400() {
        let resp = PrismError::InvalidQuery("page must be >= 1".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
