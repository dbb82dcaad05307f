//! Sale line pricing handler
//!
//! Server-side mirror of the line-total calculator. Unlike the client's
//! local fallback, an unknown IVA or withholding id is rejected here.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use common::model::wire::{LineTotalRequest, LineTotalResponse};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Price one sale line
#[utoipa::path(
    post,
    path = "/api/v1/ventas/calcular-total",
    request_body = LineTotalRequest,
    responses(
        (status = 200, description = "Line priced", body = LineTotalResponse),
        (status = 404, description = "Unknown IVA or withholding id"),
        (status = 400, description = "Body is not JSON"),
        (status = 422, description = "Body is JSON but not an object")
    ),
    tag = "ventas"
)]
pub async fn calculate_line_total(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LineTotalRequest>, JsonRejection>,
) -> Result<Json<LineTotalResponse>, ApiError> {
    let Json(request) = payload?;

    debug!(
        "Pricing line: quantity {}, unit price {}, discount {} (percentage: {})",
        request.quantity, request.unit_price, request.discount, request.discount_is_percentage
    );

    let response = state.catalog.price_request_strict(&request)?;

    Ok(Json(response))
}
