//! IVA and withholding reference lists
//!
//! The sale form sends rate ids (`idIva`, `idRetencion`); the catalog turns
//! them back into percentages. Clients use it leniently (unknown id means
//! no rate), the server strictly (unknown id is an error).

use std::collections::BTreeMap;
use std::sync::Arc;

use common::decimal::{dec, Rate};
use common::error::{Error, Result};
use common::model::line_item::LineItem;
use common::model::tax::{TaxKind, TaxRate, TaxRateId};
use common::model::wire::{LineTotalRequest, LineTotalResponse};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculator::price_line;

/// Both reference lists as one JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRateSet {
    /// IVA rates
    #[serde(default)]
    pub iva: Vec<TaxRate>,
    /// Withholding rates
    #[serde(default)]
    pub retenciones: Vec<TaxRate>,
}

/// One reference list, replaced whole on reload
type RateList = Arc<BTreeMap<TaxRateId, TaxRate>>;

/// Concurrent catalog of tax rates, one immutable list per kind.
///
/// Readers always see a complete list: a reload builds the new list aside
/// and swaps it in with a single insert.
#[derive(Debug, Default)]
pub struct TaxRateCatalog {
    lists: DashMap<TaxKind, RateList>,
}

impl TaxRateCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            lists: DashMap::new(),
        }
    }

    /// Create a catalog seeded with the usual Colombian rates
    pub fn with_defaults() -> Self {
        let catalog = Self::new();
        catalog.load(
            TaxKind::Iva,
            vec![
                TaxRate::new(1, "Excluido", dec!(0)),
                TaxRate::new(2, "IVA 5%", dec!(5)),
                TaxRate::new(3, "IVA 19%", dec!(19)),
            ],
        );
        catalog.load(
            TaxKind::Retencion,
            vec![
                TaxRate::new(1, "Sin retencion", dec!(0)),
                TaxRate::new(2, "Servicios 1%", dec!(1)),
                TaxRate::new(3, "Compras 2.5%", dec!(2.5)),
                TaxRate::new(4, "Honorarios 3.5%", dec!(3.5)),
                TaxRate::new(5, "Servicios 4%", dec!(4)),
            ],
        );
        catalog
    }

    /// Build a catalog from a reference document
    pub fn from_set(set: TaxRateSet) -> Self {
        let catalog = Self::new();
        catalog.load(TaxKind::Iva, set.iva);
        catalog.load(TaxKind::Retencion, set.retenciones);
        catalog
    }

    /// Parse a reference document from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let set: TaxRateSet = serde_json::from_str(json)?;
        Ok(Self::from_set(set))
    }

    /// Replace one reference list
    pub fn load(&self, kind: TaxKind, rates: Vec<TaxRate>) {
        let list: BTreeMap<TaxRateId, TaxRate> = rates.into_iter().map(|rate| (rate.id, rate)).collect();
        let count = list.len();
        self.lists.insert(kind, Arc::new(list));
        info!("Loaded {} {} rates", count, kind);
    }

    /// Current list of a kind; later reloads do not affect it
    fn snapshot(&self, kind: TaxKind) -> Option<RateList> {
        self.lists.get(&kind).map(|list| Arc::clone(list.value()))
    }

    /// Get a rate by id
    pub fn get(&self, kind: TaxKind, id: TaxRateId) -> Option<TaxRate> {
        self.snapshot(kind).and_then(|list| list.get(&id).cloned())
    }

    /// All rates of a kind, ordered by id
    pub fn list(&self, kind: TaxKind) -> Vec<TaxRate> {
        self.snapshot(kind)
            .map(|list| list.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Active rates of a kind, ordered by id
    pub fn list_active(&self, kind: TaxKind) -> Vec<TaxRate> {
        self.list(kind).into_iter().filter(|r| r.active).collect()
    }

    /// Number of rates of a kind
    pub fn len(&self, kind: TaxKind) -> usize {
        self.snapshot(kind).map_or(0, |list| list.len())
    }

    /// Whether the catalog holds no rates at all
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(|list| list.value().is_empty())
    }

    /// Percentage for an optional id; no id or an unknown id is 0
    pub fn percentage(&self, kind: TaxKind, id: Option<TaxRateId>) -> Rate {
        match id {
            None => Decimal::ZERO,
            Some(id) => match self.get(kind, id) {
                Some(rate) => rate.percentage,
                None => {
                    warn!("Unknown {} rate id {}, pricing without it", kind, id);
                    Decimal::ZERO
                }
            },
        }
    }

    /// Rate for an id, failing when the id is unknown
    pub fn require(&self, kind: TaxKind, id: TaxRateId) -> Result<TaxRate> {
        self.get(kind, id)
            .ok_or_else(|| Error::TaxRateNotFound(format!("{} rate {}", kind, id)))
    }

    /// Percentage for an optional id, failing when a given id is unknown
    pub fn require_percentage(&self, kind: TaxKind, id: Option<TaxRateId>) -> Result<Rate> {
        match id {
            None => Ok(Decimal::ZERO),
            Some(id) => Ok(self.require(kind, id)?.percentage),
        }
    }

    /// Turn a request into a priceable line, treating unknown ids as no rate
    pub fn resolve(&self, request: &LineTotalRequest) -> LineItem {
        LineItem {
            quantity: request.quantity,
            unit_price: request.unit_price,
            discount: request.discount,
            discount_mode: request.discount_mode(),
            tax_rate_percent: Some(self.percentage(TaxKind::Iva, request.iva_id)),
            withholding_rate_percent: Some(self.percentage(TaxKind::Retencion, request.withholding_id)),
        }
    }

    /// Price a request locally, the way the remote calculator would
    pub fn price_request(&self, request: &LineTotalRequest) -> LineTotalResponse {
        let line = self.resolve(request);
        let result = price_line(&line);
        LineTotalResponse::from_result(&result, line.effective_tax_rate(), line.effective_withholding_rate())
    }

    /// Price a request, rejecting unknown rate ids
    pub fn price_request_strict(&self, request: &LineTotalRequest) -> Result<LineTotalResponse> {
        let tax_rate = self.require_percentage(TaxKind::Iva, request.iva_id)?;
        let withholding_rate = self.require_percentage(TaxKind::Retencion, request.withholding_id)?;

        let line = LineItem {
            quantity: request.quantity,
            unit_price: request.unit_price,
            discount: request.discount,
            discount_mode: request.discount_mode(),
            tax_rate_percent: Some(tax_rate),
            withholding_rate_percent: Some(withholding_rate),
        };

        debug!("Pricing line with IVA {}% and withholding {}%", tax_rate, withholding_rate);
        let result = price_line(&line);
        Ok(LineTotalResponse::from_result(&result, tax_rate, withholding_rate))
    }
}

/// Shared handle to a catalog
pub type SharedCatalog = Arc<TaxRateCatalog>;
