//! Document totals and whole-unit rounding.

use rust_decimal::Decimal;
use voucher_shared::types::{add_or_zero, round_half_up, sum_or_zero, whole_unit_adjustment};

use super::apportion::Apportionment;
use super::charges::ChargeTax;
use super::line::LineBase;
use super::slab::build_slab_breakdown;
use super::types::{ComputedLineItem, GstSplit, VoucherTotals};

/// Whole-unit rounding of the payable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOff {
    /// Amount before rounding.
    pub pre_round_total: Decimal,
    /// Signed adjustment, kept for ledger reconciliation.
    pub round_off: Decimal,
    /// `pre_round_total + round_off`, always integral.
    pub total_amount: Decimal,
}

impl RoundOff {
    /// Rounds to the nearest whole unit; a fraction of exactly one half rounds up.
    #[must_use]
    pub fn apply(pre_round_total: Decimal) -> Self {
        let round_off = whole_unit_adjustment(pre_round_total);
        Self {
            pre_round_total,
            round_off,
            total_amount: add_or_zero(pre_round_total, round_off).normalize(),
        }
    }
}

/// Aggregates the per-stage results into document totals.
///
/// `total_taxable` is the discounted document base. When apportionment is
/// degenerate no base reaches the items, and the total falls back to the
/// item sum (zero) so that it never disagrees with the lines.
#[must_use]
pub fn aggregate(
    bases: &[LineBase],
    items: &[ComputedLineItem],
    apportionment: &Apportionment,
    charges: &ChargeTax,
    decimal_places: u32,
) -> VoucherTotals {
    let subtotal = sum_or_zero(bases.iter().map(|b| b.subtotal));
    let line_discounts = sum_or_zero(bases.iter().map(|b| b.line_discount));
    let line_totals = sum_or_zero(items.iter().map(|i| i.total_amount));

    let total_taxable = if apportionment.is_degenerate() {
        sum_or_zero(items.iter().map(|i| i.taxable_amount))
    } else {
        round_half_up(apportionment.after_total_discount, decimal_places)
    };

    let gst = items
        .iter()
        .fold(GstSplit::default(), |acc, item| acc + item.gst())
        + charges.split;

    let rounding =
        RoundOff::apply(sum_or_zero([line_totals, charges.total_charges, charges.gst_amount]));

    VoucherTotals {
        total_subtotal: round_half_up(subtotal, decimal_places),
        total_discount: round_half_up(
            add_or_zero(line_discounts, apportionment.total_discount_amount),
            decimal_places,
        ),
        total_taxable,
        total_additional_charges: charges.total_charges,
        total_additional_gst: charges.gst_amount,
        total_cgst: gst.cgst,
        total_sgst: gst.sgst,
        total_igst: gst.igst,
        total_gst: gst.total(),
        weighted_gst_rate: round_half_up(charges.weighted_rate, 4).normalize(),
        apportion_factor: round_half_up(apportionment.factor, 6).normalize(),
        gst_breakdown: build_slab_breakdown(items),
        pre_round_total: rounding.pre_round_total,
        round_off: rounding.round_off,
        total_amount: rounding.total_amount,
    }
}
