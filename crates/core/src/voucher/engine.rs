//! Voucher computation engine.
//!
//! One call runs every stage once, in order: line discounts, document
//! discount apportionment, per-item GST, additional-charge GST, totals and
//! rounding, slab breakdown. The engine holds no state between calls.

use rayon::prelude::*;
use tracing::{debug, trace, warn};
use voucher_shared::EngineConfig;
use voucher_shared::types::{round_half_up, sub_or_zero};

use super::apportion::Apportionment;
use super::charges::ChargeTax;
use super::line::LineBase;
use super::tax::ItemTax;
use super::totals::aggregate;
use super::types::{ComputedLineItem, Voucher, VoucherComputation};

/// Engine computing taxes and totals for vouchers.
#[derive(Debug, Clone, Default)]
pub struct VoucherEngine {
    config: EngineConfig,
}

impl VoucherEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Decimal places used for per-line amounts.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        self.config.line_decimal_places
    }

    /// Computes taxes and totals for one voucher.
    ///
    /// Total over its input: never fails, never divides by zero, and an
    /// overflowing intermediate amount becomes zero instead of panicking.
    #[must_use]
    pub fn compute(&self, voucher: &Voucher) -> VoucherComputation {
        let dp = self.decimal_places();
        let config = &voucher.config;
        let locality = config.locality();

        let bases: Vec<LineBase> = voucher
            .items
            .iter()
            .map(|item| LineBase::resolve(item, config.line_discount_type))
            .collect();

        let apportionment = Apportionment::compute(
            &bases,
            config.total_discount_type,
            config.total_discount_value,
        );
        if apportionment.is_degenerate() && !voucher.items.is_empty() {
            warn!(
                sum_after_line = %apportionment.sum_after_line,
                "No positive base after line discounts, items carry no taxable amount"
            );
        }

        let items: Vec<ComputedLineItem> = voucher
            .items
            .iter()
            .zip(&bases)
            .enumerate()
            .map(|(index, (item, base))| {
                let tax = ItemTax::compute(
                    base.after_line_discount,
                    &apportionment,
                    item.gst_rate,
                    locality,
                    dp,
                );
                trace!(
                    index,
                    taxable = %tax.taxable_amount,
                    gst = %tax.gst_amount,
                    "Computed line"
                );

                ComputedLineItem {
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    discount_percentage: item.discount_percentage,
                    gst_rate: item.gst_rate,
                    subtotal: round_half_up(base.subtotal, dp),
                    discount_amount: round_half_up(base.line_discount, dp),
                    document_discount_share: round_half_up(
                        sub_or_zero(base.after_line_discount, tax.exact_taxable),
                        dp,
                    ),
                    taxable_amount: tax.taxable_amount,
                    cgst_amount: tax.split.cgst,
                    sgst_amount: tax.split.sgst,
                    igst_amount: tax.split.igst,
                    total_amount: tax.line_total,
                }
            })
            .collect();

        let charges = ChargeTax::compute(&config.additional_charges, &items, locality, dp);
        let totals = aggregate(&bases, &items, &apportionment, &charges, dp);

        debug!(
            items = items.len(),
            charges = charges.lines.len(),
            intrastate = locality.is_intrastate(),
            total_taxable = %totals.total_taxable,
            total_gst = %totals.total_gst,
            round_off = %totals.round_off,
            total_amount = %totals.total_amount,
            "Computed voucher"
        );

        VoucherComputation {
            items,
            charges: charges.lines,
            totals,
        }
    }

    /// Computes many independent vouchers in parallel, preserving order.
    #[must_use]
    pub fn compute_batch(&self, vouchers: &[Voucher]) -> Vec<VoucherComputation> {
        debug!(count = vouchers.len(), "Computing voucher batch");
        vouchers.par_iter().map(|v| self.compute(v)).collect()
    }
}
