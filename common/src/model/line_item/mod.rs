//! Sale line models and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{parse_lenient, Amount, Price, Quantity, Rate};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// How the discount of a line is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum DiscountMode {
    /// Discount is a percentage (0-100) of the gross line value
    Percentage,
    /// Discount is a currency amount
    #[default]
    Flat,
}

impl DiscountMode {
    /// Mode from the screen's "discount in percentage" checkbox
    pub fn from_flag(is_percentage: bool) -> Self {
        if is_percentage {
            DiscountMode::Percentage
        } else {
            DiscountMode::Flat
        }
    }

    /// Whether the discount is a percentage
    pub fn is_percentage(self) -> bool {
        matches!(self, DiscountMode::Percentage)
    }
}

/// One row of a sale, as typed by the user.
///
/// Built fresh on every field edit; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct LineItem {
    /// Units sold
    pub quantity: Quantity,
    /// Price per unit
    pub unit_price: Price,
    /// Discount, read according to `discount_mode`
    pub discount: Decimal,
    /// Percentage or flat discount
    pub discount_mode: DiscountMode,
    /// IVA percentage, `None` when the line has no IVA
    pub tax_rate_percent: Option<Rate>,
    /// Withholding percentage, `None` when the line has no withholding
    pub withholding_rate_percent: Option<Rate>,
}

impl LineItem {
    /// Create a line with no discount, tax or withholding
    pub fn new(quantity: Quantity, unit_price: Price) -> Self {
        Self {
            quantity,
            unit_price,
            ..Default::default()
        }
    }

    /// Build a line from the raw text of the sale form.
    ///
    /// Unparseable fields are read as zero rather than rejected.
    pub fn from_raw(
        quantity: &str,
        unit_price: &str,
        discount: &str,
        discount_is_percentage: bool,
        tax_rate_percent: Option<&str>,
        withholding_rate_percent: Option<&str>,
    ) -> Self {
        Self {
            quantity: parse_lenient(quantity),
            unit_price: parse_lenient(unit_price),
            discount: parse_lenient(discount),
            discount_mode: DiscountMode::from_flag(discount_is_percentage),
            tax_rate_percent: tax_rate_percent.map(parse_lenient),
            withholding_rate_percent: withholding_rate_percent.map(parse_lenient),
        }
    }

    /// Set a percentage discount
    pub fn with_percentage_discount(mut self, percent: Rate) -> Self {
        self.discount = percent;
        self.discount_mode = DiscountMode::Percentage;
        self
    }

    /// Set a flat discount
    pub fn with_flat_discount(mut self, amount: Amount) -> Self {
        self.discount = amount;
        self.discount_mode = DiscountMode::Flat;
        self
    }

    /// Set the IVA percentage
    pub fn with_tax_rate(mut self, percent: Rate) -> Self {
        self.tax_rate_percent = Some(percent);
        self
    }

    /// Set the withholding percentage
    pub fn with_withholding_rate(mut self, percent: Rate) -> Self {
        self.withholding_rate_percent = Some(percent);
        self
    }

    /// IVA percentage with absence read as zero
    pub fn effective_tax_rate(&self) -> Rate {
        self.tax_rate_percent.unwrap_or(Decimal::ZERO)
    }

    /// Withholding percentage with absence read as zero
    pub fn effective_withholding_rate(&self) -> Rate {
        self.withholding_rate_percent.unwrap_or(Decimal::ZERO)
    }
}

/// Priced breakdown of a line. All amounts are rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct LineItemResult {
    /// Quantity times unit price, before discount
    pub raw_subtotal: Amount,
    /// Discount taken off the raw subtotal
    pub discount_amount: Amount,
    /// Raw subtotal minus discount
    pub subtotal_after_discount: Amount,
    /// IVA on the discounted subtotal
    pub tax_amount: Amount,
    /// Withholding on the discounted subtotal
    pub withholding_amount: Amount,
    /// Subtotal plus IVA minus withholding
    pub total: Amount,
}

impl LineItemResult {
    /// An all-zero result
    pub const ZERO: LineItemResult = LineItemResult {
        raw_subtotal: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        subtotal_after_discount: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        withholding_amount: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}
