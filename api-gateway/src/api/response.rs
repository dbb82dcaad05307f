//! Envelopes for the reference data endpoints
//!
//! `GET /iva`, `/retenciones` and `/health` answer `{ "data": ..., "meta": ... }`
//! so the client reads every list the same way. The calculator endpoint
//! answers with the bare line-total shape the sale form expects.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// One resource under `data`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

/// Envelope metadata
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Number of items in a list response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// A reference list under `data`, with its length in `meta.count`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }
}

impl<T> ApiListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let meta = ResponseMetadata {
            count: Some(data.len()),
        };
        Self {
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiListResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
