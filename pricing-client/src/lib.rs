//! Client side of sale line pricing
//!
//! Prefers the backend's computation of a line total and falls back to the
//! local calculator whenever the backend cannot answer, so the sale form
//! keeps working offline. Quotes carry request tokens so an answer that
//! arrives after a newer edit is discarded instead of overwriting it.

pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod sequencer;
pub mod service;

pub use client::{PricingApiClient, PricingBackend};
pub use config::PricingClientConfig;
pub use editor::LineEditor;
pub use error::RemotePricingError;
pub use sequencer::{RequestSequencer, RequestToken};
pub use service::{PendingQuote, PricingService, Quote, QuoteSource};
