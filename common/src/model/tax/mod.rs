//! IVA and withholding reference data

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Identifier of a rate in its reference list
pub type TaxRateId = i64;

/// Which reference list a rate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    /// Value-added tax, added to the payable total
    Iva,
    /// Withholding, subtracted from the payable total
    Retencion,
}

impl TaxKind {
    /// Path segment of the reference list endpoint
    pub fn resource(self) -> &'static str {
        match self {
            TaxKind::Iva => "iva",
            TaxKind::Retencion => "retenciones",
        }
    }
}

impl fmt::Display for TaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxKind::Iva => write!(f, "IVA"),
            TaxKind::Retencion => write!(f, "withholding"),
        }
    }
}

/// A row of the IVA or withholding reference list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct TaxRate {
    /// Identifier the sale form sends as `idIva` / `idRetencion`
    pub id: TaxRateId,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Percentage of the discounted subtotal
    #[serde(rename = "porcentaje")]
    pub percentage: Rate,
    /// Inactive rates stay resolvable for old sales but are not offered
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl TaxRate {
    /// Create an active rate
    pub fn new(id: TaxRateId, name: impl Into<String>, percentage: Rate) -> Self {
        Self {
            id,
            name: name.into(),
            percentage,
            active: true,
        }
    }
}
