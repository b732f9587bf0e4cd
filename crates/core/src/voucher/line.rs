//! Line normalization and line-discount application.

use rust_decimal::Decimal;
use voucher_shared::types::{mul_or_zero, sub_or_zero};

use super::types::{DiscountMode, LineItem};

/// A line's base amounts before the document discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBase {
    /// `quantity × unit_price`.
    pub subtotal: Decimal,
    /// Resolved line discount.
    pub line_discount: Decimal,
    /// `subtotal − line_discount`. May be negative.
    pub after_line_discount: Decimal,
}

impl LineBase {
    /// Resolves the line discount for `item` under the document's mode.
    ///
    /// In amount mode the item's `discount_amount` is applied verbatim, it
    /// is never scaled by quantity or shared between lines. A discount larger
    /// than the subtotal produces a negative base.
    #[must_use]
    pub fn resolve(item: &LineItem, mode: DiscountMode) -> Self {
        let subtotal = mul_or_zero(item.quantity, item.unit_price);
        let line_discount =
            mode.discount_on(subtotal, item.discount_percentage, item.discount_amount);

        Self {
            subtotal,
            line_discount,
            after_line_discount: sub_or_zero(subtotal, line_discount),
        }
    }
}
