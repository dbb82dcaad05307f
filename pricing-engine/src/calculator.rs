//! Line-item pricing calculator
//!
//! Prices one sale line: gross value, discount (percentage or flat), IVA and
//! withholding on the discounted subtotal, and the payable total. Pure and
//! stateless; safe to call from any thread.

use common::decimal::precision::round_money;
use common::decimal::{Amount, Price, Quantity, Rate};
use common::model::line_item::{DiscountMode, LineItem, LineItemResult};
use rust_decimal::Decimal;
use tracing::{trace, warn};

/// Price a line from its individual fields.
///
/// Intermediate arithmetic keeps full precision; every output amount is
/// rounded to 2 decimal places independently. Negative inputs are priced
/// as given, and a flat discount larger than the gross value is not capped,
/// so the subtotal (and its IVA and withholding) may go negative. Inputs
/// whose products overflow the decimal range price as an all-zero line.
pub fn compute_line_total(
    quantity: Quantity,
    unit_price: Price,
    discount: Decimal,
    discount_is_percentage: bool,
    tax_rate_percent: Rate,
    withholding_rate_percent: Rate,
) -> LineItemResult {
    let result = checked_line_total(
        quantity,
        unit_price,
        discount,
        discount_is_percentage,
        tax_rate_percent,
        withholding_rate_percent,
    );

    match result {
        Some(result) => {
            trace!(
                %quantity, %unit_price, %discount, discount_is_percentage,
                %tax_rate_percent, %withholding_rate_percent, total = %result.total,
                "Priced sale line"
            );
            result
        }
        None => {
            warn!(%quantity, %unit_price, "Sale line overflows decimal range, pricing as zero");
            LineItemResult::ZERO
        }
    }
}

fn checked_line_total(
    quantity: Quantity,
    unit_price: Price,
    discount: Decimal,
    discount_is_percentage: bool,
    tax_rate_percent: Rate,
    withholding_rate_percent: Rate,
) -> Option<LineItemResult> {
    let raw_subtotal = quantity.checked_mul(unit_price)?;

    let discount_amount = if discount_is_percentage {
        checked_percent_of(raw_subtotal, discount)?
    } else {
        discount
    };

    let subtotal_after_discount = raw_subtotal.checked_sub(discount_amount)?;
    let tax_amount = checked_percent_of(subtotal_after_discount, tax_rate_percent)?;
    let withholding_amount = checked_percent_of(subtotal_after_discount, withholding_rate_percent)?;
    let total = subtotal_after_discount
        .checked_add(tax_amount)?
        .checked_sub(withholding_amount)?;

    Some(LineItemResult {
        raw_subtotal: round_money(raw_subtotal),
        discount_amount: round_money(discount_amount),
        subtotal_after_discount: round_money(subtotal_after_discount),
        tax_amount: round_money(tax_amount),
        withholding_amount: round_money(withholding_amount),
        total: round_money(total),
    })
}

fn checked_percent_of(base: Amount, rate: Rate) -> Option<Amount> {
    base.checked_mul(rate)?.checked_div(Decimal::ONE_HUNDRED)
}

/// Price a [`LineItem`]. Absent rates count as zero.
pub fn price_line(line: &LineItem) -> LineItemResult {
    compute_line_total(
        line.quantity,
        line.unit_price,
        line.discount,
        line.discount_mode == DiscountMode::Percentage,
        line.effective_tax_rate(),
        line.effective_withholding_rate(),
    )
}

/// Price a line typed as raw text; unparseable fields count as zero
pub fn price_raw(
    quantity: &str,
    unit_price: &str,
    discount: &str,
    discount_is_percentage: bool,
    tax_rate_percent: Option<&str>,
    withholding_rate_percent: Option<&str>,
) -> LineItemResult {
    let line = LineItem::from_raw(
        quantity,
        unit_price,
        discount,
        discount_is_percentage,
        tax_rate_percent,
        withholding_rate_percent,
    );
    price_line(&line)
}
