// api-gateway/src/lib.rs
pub mod api;
pub mod error;
pub mod config;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use pricing_engine::{SharedCatalog, TaxRateCatalog};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    pricing::calculate_line_total,
    tax::{health, list_iva, list_retenciones},
};

/// App state shared across handlers
pub struct AppState {
    /// IVA and withholding reference lists
    pub catalog: SharedCatalog,
}

impl AppState {
    /// Create state around a catalog
    pub fn new(catalog: TaxRateCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::pricing::calculate_line_total,
        api::tax::list_iva,
        api::tax::list_retenciones,
        api::tax::health,
    ),
    components(
        schemas(
            common::model::wire::LineTotalRequest,
            common::model::wire::LineTotalResponse,
            common::model::wire::Breakdown,
            common::model::tax::TaxRate,
            common::model::tax::TaxKind,
            api::tax::HealthStatus,
        )
    ),
    tags(
        (name = "ventas", description = "Sale line pricing"),
        (name = "impuestos", description = "IVA and withholding reference lists")
    ),
    info(
        title = "Sales Pricing API",
        version = "1.0.0",
        description = "Server-side line-total calculator and the tax reference lists it resolves against"
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Set up API routes
    let api_routes = Router::new()
        .route("/ventas/calcular-total", post(calculate_line_total))
        .route("/iva", get(list_iva))
        .route("/retenciones", get(list_retenciones))
        .route("/health", get(health));

    // Set up Swagger UI
    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .layer(cors)
        .with_state(state)
}
