//! Rate-wise GST breakdown for statutory slab reporting.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use voucher_shared::types::add_or_zero;

use super::types::{ComputedLineItem, SlabTotals};

/// Groups computed items by GST rate.
///
/// Rates are normalized, so `18` and `18.00` land in the same slab.
#[must_use]
pub fn build_slab_breakdown(items: &[ComputedLineItem]) -> BTreeMap<Decimal, SlabTotals> {
    let mut breakdown: BTreeMap<Decimal, SlabTotals> = BTreeMap::new();

    for item in items {
        let slab = breakdown.entry(item.gst_rate.normalize()).or_default();
        slab.cgst = add_or_zero(slab.cgst, item.cgst_amount);
        slab.sgst = add_or_zero(slab.sgst, item.sgst_amount);
        slab.igst = add_or_zero(slab.igst, item.igst_amount);
        slab.taxable = add_or_zero(slab.taxable, item.taxable_amount);
    }

    breakdown
}
