//! Domain models for sale line pricing

pub mod line_item;
pub mod tax;
pub mod wire;
