use std::sync::Arc;

use async_trait::async_trait;
use common::decimal::dec;
use common::model::tax::TaxKind;
use common::model::wire::{LineTotalRequest, LineTotalResponse};
use pricing_client::{
    LineEditor, PricingApiClient, PricingBackend, PricingClientConfig, PricingService, QuoteSource,
    RemotePricingError,
};
use pricing_engine::TaxRateCatalog;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_request() -> LineTotalRequest {
    LineTotalRequest {
        quantity: dec!(3),
        unit_price: dec!(1000),
        discount: dec!(10),
        discount_is_percentage: true,
        iva_id: Some(3),
        withholding_id: Some(3),
    }
}

fn service_for(mock_server: &MockServer) -> PricingService {
    let config = PricingClientConfig::new(mock_server.uri().parse().unwrap(), 2000);
    PricingService::connect(config, Arc::new(TaxRateCatalog::with_defaults())).unwrap()
}

/// Backend that answers with a fixed total, to tell remote answers apart
struct FixedBackend(rust_decimal::Decimal);

#[async_trait]
impl PricingBackend for FixedBackend {
    async fn line_total(&self, request: &LineTotalRequest) -> Result<LineTotalResponse, RemotePricingError> {
        let mut response = TaxRateCatalog::with_defaults().price_request(request);
        response.total = self.0;
        Ok(response)
    }
}

#[tokio::test]
async fn remote_answer_is_preferred() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ventas/calcular-total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "valorTotal": 3145.49,
            "desglose": {
                "montoDescuento": 300,
                "ivaMonto": 513,
                "retencionMonto": 67.51,
                "porcentajeIva": 19,
                "porcentajeRetencion": 2.5
            }
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let quote = service.price(&sample_request()).await;

    assert_eq!(quote.source, QuoteSource::Remote);
    assert_eq!(quote.response.total, dec!(3145.49));
}

#[tokio::test]
async fn server_error_falls_back_to_local() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ventas/calcular-total"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let quote = service.price(&sample_request()).await;

    assert_eq!(quote.source, QuoteSource::Local);
    assert_eq!(quote.response.total, dec!(3145.5));
    assert_eq!(quote.response.breakdown.withholding_amount, dec!(67.5));
}

#[tokio::test]
async fn malformed_json_falls_back_to_local() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ventas/calcular-total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let quote = service.price(&sample_request()).await;

    assert_eq!(quote.source, QuoteSource::Local);
    assert_eq!(quote.response.total, dec!(3145.5));
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_local() {
    let config = PricingClientConfig::new("http://127.0.0.1:9".parse().unwrap(), 500);
    let service = PricingService::connect(config, Arc::new(TaxRateCatalog::with_defaults())).unwrap();

    let quote = service.price(&sample_request()).await;
    assert_eq!(quote.source, QuoteSource::Local);
    assert_eq!(quote.response.total, dec!(3145.5));
}

#[tokio::test]
async fn local_only_service_never_goes_remote() {
    let service = PricingService::local(Arc::new(TaxRateCatalog::with_defaults()));
    assert!(!service.has_backend());

    let quote = service.price(&LineTotalRequest::default()).await;
    assert_eq!(quote.source, QuoteSource::Local);
    assert_eq!(quote.response.total, dec!(0));
}

#[tokio::test]
async fn one_shot_quotes_get_increasing_tokens() {
    let service = PricingService::local(Arc::new(TaxRateCatalog::with_defaults()));
    let first = service.price(&sample_request()).await;
    let second = service.price(&sample_request()).await;
    assert!(second.token > first.token);
    assert_eq!(first.response, second.response);
}

#[tokio::test]
async fn editor_applies_only_the_newest_quote() {
    let service = PricingService::with_backend(
        Arc::new(TaxRateCatalog::with_defaults()),
        Arc::new(FixedBackend(dec!(1))),
    );
    let mut editor = LineEditor::new();

    editor.set_quantity("1");
    editor.set_unit_price("100");
    let older = editor.prepare();

    editor.set_quantity("2");
    let newer = editor.prepare();

    let newer_quote = service.quote(newer).await;
    let older_quote = service.quote(older).await;

    assert!(!editor.apply(older_quote));
    assert!(editor.quote().is_none());

    assert!(editor.apply(newer_quote));
    assert_eq!(editor.quote().unwrap().request.quantity, dec!(2));
    assert_eq!(editor.result().unwrap().total, dec!(1));
}

#[tokio::test]
async fn editor_rejects_quotes_it_did_not_request() {
    let service = PricingService::local(Arc::new(TaxRateCatalog::with_defaults()));
    let mut editor = LineEditor::new();
    editor.set_quantity("1");
    editor.set_unit_price("100");

    // Both counters stand at 1, but the token belongs to the service
    let pending = editor.prepare();
    let foreign = service.price(&editor.current_request()).await;
    assert_eq!(foreign.token.seq(), pending.token.seq());

    assert!(!editor.apply(foreign));
    assert!(editor.result().is_none());

    let own = service.quote(pending).await;
    assert!(editor.apply(own));
    assert_eq!(editor.result().unwrap().total, dec!(100));
}

#[tokio::test]
async fn editor_recalculates_from_raw_fields() {
    let service = PricingService::local(Arc::new(TaxRateCatalog::with_defaults()));
    let mut editor = LineEditor::new();

    editor.set_quantity("3");
    editor.set_unit_price("1000");
    editor.set_discount("10");
    editor.set_discount_is_percentage(true);
    editor.set_iva(Some(3));
    editor.set_withholding(Some(3));
    assert!(editor.recalculate(&service).await);
    assert_eq!(editor.result().unwrap().total, dec!(3145.5));

    editor.set_unit_price("abc");
    assert!(editor.recalculate(&service).await);
    assert_eq!(editor.result().unwrap().total, dec!(0));
}

#[tokio::test]
async fn editor_reset_discards_in_flight_answers() {
    let service = PricingService::local(Arc::new(TaxRateCatalog::with_defaults()));
    let mut editor = LineEditor::new();

    editor.set_quantity("5");
    editor.set_unit_price("10");
    let pending = editor.prepare();

    editor.reset();
    let quote = service.quote(pending).await;

    assert!(!editor.apply(quote));
    assert!(editor.result().is_none());
    assert_eq!(editor.current_request(), LineTotalRequest::default());
}

#[tokio::test]
async fn refresh_catalog_replaces_reference_lists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/iva"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": 8, "nombre": "IVA 8%", "porcentaje": 8, "activo": true }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/retenciones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let client = PricingApiClient::new(PricingClientConfig::new(mock_server.uri().parse().unwrap(), 2000)).unwrap();
    service.refresh_catalog(&client).await.unwrap();

    assert_eq!(service.catalog().len(TaxKind::Iva), 1);
    assert_eq!(service.catalog().percentage(TaxKind::Iva, Some(8)), dec!(8));
    assert_eq!(service.catalog().len(TaxKind::Retencion), 0);
}

#[tokio::test]
async fn failed_refresh_keeps_catalog() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/iva"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let client = PricingApiClient::new(PricingClientConfig::new(mock_server.uri().parse().unwrap(), 2000)).unwrap();

    let err = service.refresh_catalog(&client).await.unwrap_err();
    assert!(matches!(err, common::Error::RemoteUnavailable(_)));
    assert_eq!(service.catalog().len(TaxKind::Iva), 3);
}

#[tokio::test]
async fn refresh_loads_nothing_when_one_list_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/iva"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": 8, "nombre": "IVA 8%", "porcentaje": 8 }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/retenciones"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let client = PricingApiClient::new(PricingClientConfig::new(mock_server.uri().parse().unwrap(), 2000)).unwrap();

    assert!(service.refresh_catalog(&client).await.is_err());
    assert_eq!(service.catalog().len(TaxKind::Iva), 3);
    assert_eq!(service.catalog().percentage(TaxKind::Iva, Some(8)), dec!(0));
}
