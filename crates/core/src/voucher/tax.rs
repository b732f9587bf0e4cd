//! Per-item GST and locality splitting.

use rust_decimal::Decimal;
use voucher_shared::types::{add_or_zero, percent_of, round_half_up};

use super::apportion::Apportionment;
use super::types::{GstSplit, Locality};

impl GstSplit {
    /// Splits an already rounded GST amount by locality.
    ///
    /// Intrastate CGST takes the rounded half and SGST the rest, so the two
    /// halves always add back to the interstate IGST for the same amount.
    #[must_use]
    pub fn for_locality(gst_amount: Decimal, locality: Locality, decimal_places: u32) -> Self {
        match locality {
            Locality::Intrastate => {
                let cgst = round_half_up(gst_amount / Decimal::TWO, decimal_places);
                Self {
                    cgst,
                    sgst: gst_amount - cgst,
                    igst: Decimal::ZERO,
                }
            }
            Locality::Interstate => Self {
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
                igst: gst_amount,
            },
        }
    }
}

/// GST computed for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTax {
    /// Taxable base before rounding, used for conservation checks.
    pub exact_taxable: Decimal,
    /// Rounded taxable base.
    pub taxable_amount: Decimal,
    /// Rounded GST on the line.
    pub gst_amount: Decimal,
    /// GST split by component.
    pub split: GstSplit,
    /// `taxable_amount + gst_amount`.
    pub line_total: Decimal,
}

impl ItemTax {
    /// Computes GST for a line from its post-line-discount base.
    #[must_use]
    pub fn compute(
        after_line_discount: Decimal,
        apportionment: &Apportionment,
        gst_rate: Decimal,
        locality: Locality,
        decimal_places: u32,
    ) -> Self {
        let exact_taxable = apportionment.taxable_base(after_line_discount);
        let taxable_amount = round_half_up(exact_taxable, decimal_places);
        let gst_amount = round_half_up(percent_of(exact_taxable, gst_rate), decimal_places);

        Self {
            exact_taxable,
            taxable_amount,
            gst_amount,
            split: GstSplit::for_locality(gst_amount, locality, decimal_places),
            line_total: add_or_zero(taxable_amount, gst_amount),
        }
    }
}
