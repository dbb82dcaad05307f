//! View-model of one sale line being edited
//!
//! Holds the raw text of the form fields, builds a fresh request on every
//! edit, and keeps the newest priced result. A quote is applied only when it
//! answers the most recent request the editor issued.

use common::decimal::parse_lenient;
use common::model::tax::TaxRateId;
use common::model::wire::{LineTotalRequest, LineTotalResponse};
use tracing::debug;

use crate::sequencer::RequestSequencer;
use crate::service::{PendingQuote, PricingService, Quote};

/// Editable state of one sale line
#[derive(Debug, Default)]
pub struct LineEditor {
    quantity: String,
    unit_price: String,
    discount: String,
    discount_is_percentage: bool,
    iva_id: Option<TaxRateId>,
    withholding_id: Option<TaxRateId>,
    current: Option<Quote>,
    sequencer: RequestSequencer,
}

impl LineEditor {
    /// Create an empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity field
    pub fn set_quantity(&mut self, value: impl Into<String>) {
        self.quantity = value.into();
    }

    /// Unit price field
    pub fn set_unit_price(&mut self, value: impl Into<String>) {
        self.unit_price = value.into();
    }

    /// Discount field
    pub fn set_discount(&mut self, value: impl Into<String>) {
        self.discount = value.into();
    }

    /// Discount-in-percentage checkbox
    pub fn set_discount_is_percentage(&mut self, value: bool) {
        self.discount_is_percentage = value;
    }

    /// IVA select
    pub fn set_iva(&mut self, id: Option<TaxRateId>) {
        self.iva_id = id;
    }

    /// Withholding select
    pub fn set_withholding(&mut self, id: Option<TaxRateId>) {
        self.withholding_id = id;
    }

    /// Request for the fields as they stand now
    pub fn current_request(&self) -> LineTotalRequest {
        LineTotalRequest {
            quantity: parse_lenient(&self.quantity),
            unit_price: parse_lenient(&self.unit_price),
            discount: parse_lenient(&self.discount),
            discount_is_percentage: self.discount_is_percentage,
            iva_id: self.iva_id,
            withholding_id: self.withholding_id,
        }
    }

    /// Stamp the current request with a token newer than any before it
    pub fn prepare(&self) -> PendingQuote {
        PendingQuote {
            token: self.sequencer.issue(),
            request: self.current_request(),
        }
    }

    /// Keep `quote` if it answers the newest request; returns whether it was kept
    pub fn apply(&mut self, quote: Quote) -> bool {
        if !self.sequencer.is_current(quote.token) {
            debug!(token = quote.token.seq(), "Discarding stale line quote");
            return false;
        }
        self.current = Some(quote);
        true
    }

    /// Price the current fields and apply the answer
    pub async fn recalculate(&mut self, service: &PricingService) -> bool {
        let pending = self.prepare();
        let quote = service.quote(pending).await;
        self.apply(quote)
    }

    /// Newest applied quote
    pub fn quote(&self) -> Option<&Quote> {
        self.current.as_ref()
    }

    /// Newest applied priced line
    pub fn result(&self) -> Option<&LineTotalResponse> {
        self.current.as_ref().map(|q| &q.response)
    }

    /// Clear every field; answers still in flight are discarded
    pub fn reset(&mut self) {
        self.quantity.clear();
        self.unit_price.clear();
        self.discount.clear();
        self.discount_is_percentage = false;
        self.iva_id = None;
        self.withholding_id = None;
        self.current = None;
        // Outdate anything issued before the reset
        self.sequencer.issue();
    }
}
