//! JSON shapes exchanged with the remote line-total calculator
//!
//! Field names follow the sales backend (`cantidad`, `valorUnitario`, ...).
//! Decimal amounts are written as JSON numbers. Request numbers are read
//! leniently: strings, garbage and `null` coerce the way the sale form does.

use serde::{Deserialize, Deserializer, Serialize};

use crate::decimal::{serde_lenient, Amount, Price, Quantity, Rate};
use crate::model::line_item::{DiscountMode, LineItemResult};
use crate::model::tax::TaxRateId;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Request to price one sale line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct LineTotalRequest {
    /// Units sold
    #[serde(
        rename = "cantidad",
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "serde_lenient::deserialize"
    )]
    pub quantity: Quantity,
    /// Price per unit
    #[serde(
        rename = "valorUnitario",
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "serde_lenient::deserialize"
    )]
    pub unit_price: Price,
    /// Discount, a percentage or an amount
    #[serde(
        rename = "descuento",
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "serde_lenient::deserialize"
    )]
    pub discount: Amount,
    /// Whether `discount` is a percentage
    #[serde(rename = "descuentoEnPorcentaje", default)]
    pub discount_is_percentage: bool,
    /// IVA reference id
    #[serde(rename = "idIva", default, deserialize_with = "lenient_id")]
    pub iva_id: Option<TaxRateId>,
    /// Withholding reference id
    #[serde(rename = "idRetencion", default, deserialize_with = "lenient_id")]
    pub withholding_id: Option<TaxRateId>,
}

impl LineTotalRequest {
    /// Discount mode carried by the request
    pub fn discount_mode(&self) -> DiscountMode {
        DiscountMode::from_flag(self.discount_is_percentage)
    }
}

/// Priced line as returned by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct LineTotalResponse {
    /// Payable line total
    #[serde(rename = "valorTotal", serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Amount,
    /// Breakdown of the total
    #[serde(rename = "desglose")]
    pub breakdown: Breakdown,
}

/// Breakdown of a priced line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Breakdown {
    /// Discount taken off the line
    #[serde(rename = "montoDescuento", serialize_with = "rust_decimal::serde::float::serialize")]
    pub discount_amount: Amount,
    /// IVA amount
    #[serde(rename = "ivaMonto", serialize_with = "rust_decimal::serde::float::serialize")]
    pub tax_amount: Amount,
    /// Withholding amount
    #[serde(rename = "retencionMonto", serialize_with = "rust_decimal::serde::float::serialize")]
    pub withholding_amount: Amount,
    /// IVA percentage the id resolved to
    #[serde(rename = "porcentajeIva", serialize_with = "rust_decimal::serde::float::serialize")]
    pub tax_rate_percent: Rate,
    /// Withholding percentage the id resolved to
    #[serde(rename = "porcentajeRetencion", serialize_with = "rust_decimal::serde::float::serialize")]
    pub withholding_rate_percent: Rate,
    /// Discounted subtotal; older backends omit it
    #[serde(
        rename = "subtotal",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub subtotal_after_discount: Option<Amount>,
}

impl LineTotalResponse {
    /// Wire shape of a computed line and the rates that produced it
    pub fn from_result(result: &LineItemResult, tax_rate_percent: Rate, withholding_rate_percent: Rate) -> Self {
        Self {
            total: result.total,
            breakdown: Breakdown {
                discount_amount: result.discount_amount,
                tax_amount: result.tax_amount,
                withholding_amount: result.withholding_amount,
                tax_rate_percent,
                withholding_rate_percent,
                subtotal_after_discount: Some(result.subtotal_after_discount),
            },
        }
    }
}

/// Reference ids arrive as numbers, numeric strings (select values) or
/// empty strings; anything that is not a positive id is "no rate".
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<TaxRateId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Number(i64),
        Text(String),
        Other(serde_json::Value),
    }

    let id = match Option::<LooseId>::deserialize(deserializer)? {
        Some(LooseId::Number(n)) => Some(n),
        Some(LooseId::Text(s)) => s.trim().parse::<i64>().ok(),
        Some(LooseId::Other(_)) | None => None,
    };

    Ok(id.filter(|id| *id > 0))
}
