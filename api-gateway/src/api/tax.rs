//! Tax reference list handlers

use std::sync::Arc;

use axum::extract::State;
use common::model::tax::{TaxKind, TaxRate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::response::{ApiListResponse, ApiResponse};
use crate::AppState;

/// List IVA rates
#[utoipa::path(
    get,
    path = "/api/v1/iva",
    responses(
        (status = 200, description = "IVA rates retrieved successfully")
    ),
    tag = "impuestos"
)]
pub async fn list_iva(
    State(state): State<Arc<AppState>>,
) -> ApiListResponse<TaxRate> {
    ApiListResponse::new(state.catalog.list(TaxKind::Iva))
}

/// List withholding rates
#[utoipa::path(
    get,
    path = "/api/v1/retenciones",
    responses(
        (status = 200, description = "Withholding rates retrieved successfully")
    ),
    tag = "impuestos"
)]
pub async fn list_retenciones(
    State(state): State<Arc<AppState>>,
) -> ApiListResponse<TaxRate> {
    ApiListResponse::new(state.catalog.list(TaxKind::Retencion))
}

/// Service health
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always "ok" when the service answers
    pub status: String,
    /// Loaded IVA rates
    pub iva_rates: usize,
    /// Loaded withholding rates
    pub withholding_rates: usize,
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    ),
    tag = "impuestos"
)]
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> ApiResponse<HealthStatus> {
    ApiResponse::new(HealthStatus {
        status: "ok".to_string(),
        iva_rates: state.catalog.len(TaxKind::Iva),
        withholding_rates: state.catalog.len(TaxKind::Retencion),
    })
}
