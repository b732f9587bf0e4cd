//! GST on additional (non-itemized) charges.
//!
//! Freight, packing and similar charges belong to no single line, so they
//! are taxed at the voucher's blended rate: the taxable-weighted average of
//! the item rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use voucher_shared::types::{
    add_or_zero, mul_or_zero, percent_of, ratio_or_zero, round_half_up, sum_or_zero,
};

use super::allocation::AllocationUtil;
use super::types::{ChargeLine, ComputedLineItem, GstSplit, Locality};

/// Taxable-weighted average GST rate over computed items.
///
/// Returns zero when total taxable is zero.
#[must_use]
pub fn weighted_gst_rate(items: &[ComputedLineItem]) -> Decimal {
    let (weighted, taxable) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(weighted, taxable), item| {
            (
                add_or_zero(weighted, mul_or_zero(item.gst_rate, item.taxable_amount)),
                add_or_zero(taxable, item.taxable_amount),
            )
        },
    );
    ratio_or_zero(weighted, taxable)
}

/// GST levied on a voucher's additional charges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeTax {
    /// Sum of all charges.
    pub total_charges: Decimal,
    /// Blended rate applied, in percent.
    pub weighted_rate: Decimal,
    /// Rounded GST on the charge total.
    pub gst_amount: Decimal,
    /// `gst_amount` split by locality.
    pub split: GstSplit,
    /// Per-charge breakdown; components sum exactly to `split`.
    pub lines: Vec<ChargeLine>,
}

impl ChargeTax {
    /// Taxes `charges` at the blended rate of `items`.
    #[must_use]
    pub fn compute(
        charges: &BTreeMap<String, Decimal>,
        items: &[ComputedLineItem],
        locality: Locality,
        decimal_places: u32,
    ) -> Self {
        let total_charges = sum_or_zero(charges.values().copied());
        let weighted_rate = weighted_gst_rate(items);
        let gst_amount = round_half_up(percent_of(total_charges, weighted_rate), decimal_places);
        let split = GstSplit::for_locality(gst_amount, locality, decimal_places);

        let weights: Vec<Decimal> = charges.values().copied().collect();
        let cgst = AllocationUtil::allocate_by_weights(split.cgst, &weights, decimal_places);
        let sgst = AllocationUtil::allocate_by_weights(split.sgst, &weights, decimal_places);
        let igst = AllocationUtil::allocate_by_weights(split.igst, &weights, decimal_places);

        let lines = charges
            .iter()
            .enumerate()
            .map(|(i, (name, amount))| ChargeLine {
                name: name.clone(),
                amount: *amount,
                cgst_amount: cgst[i],
                sgst_amount: sgst[i],
                igst_amount: igst[i],
            })
            .collect();

        Self {
            total_charges,
            weighted_rate,
            gst_amount,
            split,
            lines,
        }
    }
}
