//! Typed HTTP client for the sales backend's calculator
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/api/v1/ventas/calcular-total` | Price one sale line |
//! | GET    | `/api/v1/iva` | IVA reference list |
//! | GET    | `/api/v1/retenciones` | Withholding reference list |

use std::time::Duration;

use async_trait::async_trait;
use common::model::tax::{TaxKind, TaxRate};
use common::model::wire::{LineTotalRequest, LineTotalResponse};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::PricingClientConfig;
use crate::error::RemotePricingError;

/// Path of the line-total calculator
pub const LINE_TOTAL_PATH: &str = "api/v1/ventas/calcular-total";

/// Anything that can price a line remotely
#[async_trait]
pub trait PricingBackend: Send + Sync {
    /// Price one line
    async fn line_total(&self, request: &LineTotalRequest) -> Result<LineTotalResponse, RemotePricingError>;
}

/// HTTP client for the sales backend
#[derive(Debug, Clone)]
pub struct PricingApiClient {
    http: reqwest::Client,
    config: PricingClientConfig,
}

impl PricingApiClient {
    /// Create a new client from configuration
    pub fn new(config: PricingClientConfig) -> Result<Self, RemotePricingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RemotePricingError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self { http, config })
    }

    /// Client configuration
    pub fn config(&self) -> &PricingClientConfig {
        &self.config
    }

    /// Fetch the IVA or withholding reference list
    pub async fn tax_rates(&self, kind: TaxKind) -> Result<Vec<TaxRate>, RemotePricingError> {
        let url = self.config.endpoint(&format!("api/v1/{}", kind.resource()));
        let response = self.http.get(&url).send().await;
        let list: RateList = read_json(&url, response).await?;
        Ok(list.data)
    }

    /// Backend health check
    pub async fn health(&self) -> Result<(), RemotePricingError> {
        let url = self.config.endpoint("api/v1/health");
        let response = self.http.get(&url).send().await.map_err(|e| RemotePricingError::Http {
            endpoint: url.clone(),
            source: e,
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemotePricingError::Status {
                endpoint: url,
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl PricingBackend for PricingApiClient {
    async fn line_total(&self, request: &LineTotalRequest) -> Result<LineTotalResponse, RemotePricingError> {
        let url = self.config.endpoint(LINE_TOTAL_PATH);
        debug!("Requesting line total from {}", url);

        let response = self.http.post(&url).json(request).send().await;
        read_json(&url, response).await
    }
}

/// Reference lists come wrapped as `{ "data": [...] }`
#[derive(serde::Deserialize)]
struct RateList {
    data: Vec<TaxRate>,
}

/// Turn a send result into a decoded body, classifying every failure
async fn read_json<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Result<reqwest::Response>,
) -> Result<T, RemotePricingError> {
    let response = response.map_err(|e| RemotePricingError::Http {
        endpoint: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| RemotePricingError::Http {
        endpoint: url.to_string(),
        source: e,
    })?;

    if !status.is_success() {
        return Err(RemotePricingError::Status {
            endpoint: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| RemotePricingError::Decode {
        endpoint: url.to_string(),
        source: e,
    })
}
