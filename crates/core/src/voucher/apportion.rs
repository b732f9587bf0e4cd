//! Document discount apportionment.
//!
//! The document discount is taken off the sum of line bases, then pushed back
//! onto every line through one uniform factor. Lines carry different GST
//! rates, so the discount has to land on the bases before tax. The single
//! multiplicative factor is a compliance requirement: any other distribution
//! changes the per-rate tax reported.

use rust_decimal::Decimal;
use voucher_shared::types::{mul_or_zero, ratio_or_zero, sub_or_zero, sum_or_zero};

use super::line::LineBase;
use super::types::DiscountMode;

/// Result of applying the document discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apportionment {
    /// Sum of all line bases after line discounts.
    pub sum_after_line: Decimal,
    /// Resolved document discount.
    pub total_discount_amount: Decimal,
    /// `sum_after_line − total_discount_amount`.
    pub after_total_discount: Decimal,
    /// `after_total_discount / sum_after_line`, or zero when the sum is not positive.
    pub factor: Decimal,
}

impl Apportionment {
    /// Applies the document discount to the given line bases.
    #[must_use]
    pub fn compute(bases: &[LineBase], mode: DiscountMode, value: Decimal) -> Self {
        let sum_after_line = sum_or_zero(bases.iter().map(|b| b.after_line_discount));
        let total_discount_amount = mode.discount_on(sum_after_line, value, value);
        let after_total_discount = sub_or_zero(sum_after_line, total_discount_amount);

        let factor = if sum_after_line > Decimal::ZERO {
            ratio_or_zero(after_total_discount, sum_after_line)
        } else {
            Decimal::ZERO
        };

        Self {
            sum_after_line,
            total_discount_amount,
            after_total_discount,
            factor,
        }
    }

    /// Unrounded taxable base for a line.
    #[must_use]
    pub fn taxable_base(&self, after_line_discount: Decimal) -> Decimal {
        mul_or_zero(after_line_discount, self.factor)
    }

    /// True when there was no positive base to distribute over.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.sum_after_line <= Decimal::ZERO
    }
}
