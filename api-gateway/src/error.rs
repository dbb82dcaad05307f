//! Error body shared by every endpoint

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error as PricingError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// `{ "error": { code, message, details }, "request_id": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorInfo,
    /// Id logged alongside the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine-readable code, e.g. `tax_rate_not_found`
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Failures of the pricing endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The calculator body was not a JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{0}")]
    Pricing(#[from] PricingError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            ApiError::InvalidBody(rejection) => (rejection.status(), "invalid_body", None),
            ApiError::Pricing(PricingError::TaxRateNotFound(rate)) => {
                (StatusCode::NOT_FOUND, "tax_rate_not_found", Some(json!({ "rate": rate })))
            }
            ApiError::Pricing(PricingError::RemoteUnavailable(_)) => (StatusCode::BAD_GATEWAY, "remote_unavailable", None),
            ApiError::Pricing(PricingError::ConfigurationError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", None)
            }
            ApiError::Pricing(PricingError::Serialization(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error", None)
            }
            ApiError::Pricing(PricingError::Internal(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status, code, details) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(%request_id, error = ?self, "Pricing request failed");
        } else {
            tracing::warn!(%request_id, error = %self, "Pricing request rejected");
        }

        let body = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
            request_id: Some(request_id),
        };

        (status, Json(body)).into_response()
    }
}
