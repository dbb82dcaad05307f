//! Totals of a whole sale, as shown under the line table

use common::decimal::Amount;
use common::model::line_item::LineItemResult;
use serde::{Deserialize, Serialize};

/// Sums of the priced lines of one sale.
///
/// Lines are already rounded, so the sums are exact cents and
/// `total == subtotal + tax_total - withholding_total` up to the per-line
/// rounding carried in each line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleSummary {
    /// Number of lines
    pub line_count: usize,
    /// Sum of gross line values
    pub gross_subtotal: Amount,
    /// Sum of line discounts
    pub discount_total: Amount,
    /// Sum of discounted subtotals
    pub subtotal: Amount,
    /// Sum of IVA
    pub tax_total: Amount,
    /// Sum of withholding
    pub withholding_total: Amount,
    /// Payable total
    pub total: Amount,
}

impl SaleSummary {
    /// Summarize priced lines
    pub fn from_lines(lines: &[LineItemResult]) -> Self {
        lines.iter().fold(Self::default(), |mut acc, line| {
            acc.add_line(line);
            acc
        })
    }

    /// Add one priced line
    pub fn add_line(&mut self, line: &LineItemResult) {
        self.line_count += 1;
        self.gross_subtotal += line.raw_subtotal;
        self.discount_total += line.discount_amount;
        self.subtotal += line.subtotal_after_discount;
        self.tax_total += line.tax_amount;
        self.withholding_total += line.withholding_amount;
        self.total += line.total;
    }

    /// Whether the sale has no lines
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }

    /// Net tax effect (IVA minus withholding)
    pub fn net_tax(&self) -> Amount {
        self.tax_total - self.withholding_total
    }
}
