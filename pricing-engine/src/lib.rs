//! Sale line pricing: the calculator, the tax-rate catalog and sale totals

pub mod calculator;
pub mod catalog;
mod summary;

pub use calculator::{compute_line_total, price_line, price_raw};
pub use catalog::{SharedCatalog, TaxRateCatalog, TaxRateSet};
pub use summary::SaleSummary;
