//! Remote-first line pricing with local fallback

use std::sync::Arc;

use common::error::Result;
use common::model::tax::TaxKind;
use common::model::wire::{LineTotalRequest, LineTotalResponse};
use pricing_engine::{SharedCatalog, TaxRateCatalog};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::{PricingApiClient, PricingBackend};
use crate::config::PricingClientConfig;
use crate::sequencer::{RequestSequencer, RequestToken};

/// Where a quote was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSource {
    /// The backend answered
    Remote,
    /// The local calculator stood in
    Local,
}

/// A request stamped with its token, ready to be priced
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuote {
    /// Token of this request
    pub token: RequestToken,
    /// What to price
    pub request: LineTotalRequest,
}

/// A priced line and how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Token of the request this answers
    pub token: RequestToken,
    /// The request that was priced
    pub request: LineTotalRequest,
    /// The priced line
    pub response: LineTotalResponse,
    /// Remote or local
    pub source: QuoteSource,
}

/// Prices sale lines, preferring the backend and never failing
pub struct PricingService {
    /// Locally known IVA and withholding rates
    catalog: SharedCatalog,
    /// Remote calculator, if one is configured
    backend: Option<Arc<dyn PricingBackend>>,
    /// Tokens for one-shot pricing calls
    sequencer: RequestSequencer,
}

impl PricingService {
    /// Create a service pricing only with the local calculator
    pub fn local(catalog: SharedCatalog) -> Self {
        Self {
            catalog,
            backend: None,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Create a service that asks `backend` first
    pub fn with_backend(catalog: SharedCatalog, backend: Arc<dyn PricingBackend>) -> Self {
        Self {
            catalog,
            backend: Some(backend),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Connect to the backend described by `config`
    pub fn connect(config: PricingClientConfig, catalog: SharedCatalog) -> Result<Self> {
        info!("Pricing against {} with local fallback", config.base_url);
        let client = PricingApiClient::new(config)?;
        Ok(Self::with_backend(catalog, Arc::new(client)))
    }

    /// The local rate catalog
    pub fn catalog(&self) -> &TaxRateCatalog {
        &self.catalog
    }

    /// Whether a remote calculator is configured
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Price a request, stamping it with a fresh token of this service.
    ///
    /// A [`LineEditor`](crate::LineEditor) rejects these quotes; editors
    /// price through [`LineEditor::recalculate`](crate::LineEditor::recalculate)
    /// or [`quote`](Self::quote) with a token from `prepare`.
    pub async fn price(&self, request: &LineTotalRequest) -> Quote {
        let pending = PendingQuote {
            token: self.sequencer.issue(),
            request: request.clone(),
        };
        self.quote(pending).await
    }

    /// Price a request that already carries its token
    pub async fn quote(&self, pending: PendingQuote) -> Quote {
        let PendingQuote { token, request } = pending;

        let (response, source) = match &self.backend {
            Some(backend) => match backend.line_total(&request).await {
                Ok(response) => {
                    debug!(token = token.seq(), total = %response.total, "Line priced remotely");
                    (response, QuoteSource::Remote)
                }
                Err(e) => {
                    warn!(token = token.seq(), error = %e, "Remote pricing failed, using local calculation");
                    (self.price_local(&request), QuoteSource::Local)
                }
            },
            None => (self.price_local(&request), QuoteSource::Local),
        };

        Quote {
            token,
            request,
            response,
            source,
        }
    }

    /// Price a request with the local calculator only
    pub fn price_local(&self, request: &LineTotalRequest) -> LineTotalResponse {
        self.catalog.price_request(request)
    }

    /// Reload both reference lists from the backend.
    ///
    /// On failure the catalog keeps what it had.
    pub async fn refresh_catalog(&self, client: &PricingApiClient) -> Result<()> {
        let iva = client.tax_rates(TaxKind::Iva).await?;
        let retenciones = client.tax_rates(TaxKind::Retencion).await?;

        self.catalog.load(TaxKind::Iva, iva);
        self.catalog.load(TaxKind::Retencion, retenciones);
        Ok(())
    }
}
