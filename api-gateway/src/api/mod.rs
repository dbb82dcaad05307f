//! API handlers
//!
//! This module contains all the API endpoint handlers organized by resource.
//! Each handler follows a consistent pattern:
//! - Extract state and parameters using Axum extractors
//! - Call the pricing engine or the tax-rate catalog
//! - Map the result to a standardized response format

pub mod pricing;
pub mod response;
pub mod tax;

// Re-export the response module for easy access
pub use response::{ApiListResponse, ApiResponse};
