//! Voucher domain types for tax and totals computation.
//!
//! Input types carry guaranteed-valid decimals; loosely typed form input is
//! coerced into them by the `input` module before it reaches the engine.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voucher_shared::types::{add_or_zero, percent_of, sum_or_zero};

/// How a discount value is interpreted.
///
/// Unknown modes coming from a form deserialize as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMode {
    /// Discount is a percentage of the base.
    Percentage,
    /// Discount is a flat currency amount, taken verbatim.
    Amount,
    /// No discount.
    #[default]
    #[serde(other)]
    None,
}

impl DiscountMode {
    /// Resolves the discount on `base`.
    ///
    /// Percentage mode reads `percentage`, amount mode reads `amount`. Neither
    /// result is clamped to the base.
    #[must_use]
    pub fn discount_on(self, base: Decimal, percentage: Decimal, amount: Decimal) -> Decimal {
        match self {
            Self::Percentage => percent_of(base, percentage),
            Self::Amount => amount,
            Self::None => Decimal::ZERO,
        }
    }
}

/// Whether buyer and seller sit in the same tax jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    /// Same jurisdiction: GST splits into CGST and SGST halves.
    Intrastate,
    /// Different jurisdictions: GST is charged entirely as IGST.
    Interstate,
}

impl Locality {
    /// Maps the document's `is_intrastate` flag.
    #[must_use]
    pub const fn from_intrastate(is_intrastate: bool) -> Self {
        if is_intrastate {
            Self::Intrastate
        } else {
            Self::Interstate
        }
    }

    /// Returns true for intrastate transactions.
    #[must_use]
    pub const fn is_intrastate(self) -> bool {
        matches!(self, Self::Intrastate)
    }
}

/// A raw line item as entered on the voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Quantity sold or purchased.
    pub quantity: Decimal,
    /// Price per unit before discounts and tax.
    pub unit_price: Decimal,
    /// Line discount in percent (percentage mode only).
    pub discount_percentage: Decimal,
    /// Flat line discount (amount mode only).
    pub discount_amount: Decimal,
    /// GST rate in percent.
    pub gst_rate: Decimal,
}

impl LineItem {
    /// Creates an undiscounted line item.
    #[must_use]
    pub fn new(quantity: Decimal, unit_price: Decimal, gst_rate: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            gst_rate,
            ..Self::default()
        }
    }

    /// Sets the line discount percentage.
    #[must_use]
    pub fn with_discount_percentage(mut self, percentage: Decimal) -> Self {
        self.discount_percentage = percentage;
        self
    }

    /// Sets the flat line discount.
    #[must_use]
    pub fn with_discount_amount(mut self, amount: Decimal) -> Self {
        self.discount_amount = amount;
        self
    }
}

/// Document-level configuration, set once per voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherConfig {
    /// Interpretation of every item's line discount.
    pub line_discount_type: DiscountMode,
    /// Interpretation of `total_discount_value`.
    pub total_discount_type: DiscountMode,
    /// Document-level discount, percent or amount.
    pub total_discount_value: Decimal,
    /// Non-itemized charges such as freight or packing, by name.
    pub additional_charges: BTreeMap<String, Decimal>,
    /// Buyer and seller share a jurisdiction.
    pub is_intrastate: bool,
}

impl VoucherConfig {
    /// Locality derived from `is_intrastate`.
    #[must_use]
    pub const fn locality(&self) -> Locality {
        Locality::from_intrastate(self.is_intrastate)
    }
}

/// A complete voucher ready for computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Line items in entry order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Document configuration.
    #[serde(flatten)]
    pub config: VoucherConfig,
}

/// GST amounts split by component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstSplit {
    /// Central GST.
    pub cgst: Decimal,
    /// State GST.
    pub sgst: Decimal,
    /// Integrated GST.
    pub igst: Decimal,
}

impl GstSplit {
    /// Sum of all components.
    #[must_use]
    pub fn total(&self) -> Decimal {
        sum_or_zero([self.cgst, self.sgst, self.igst])
    }
}

impl std::ops::Add for GstSplit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            cgst: add_or_zero(self.cgst, rhs.cgst),
            sgst: add_or_zero(self.sgst, rhs.sgst),
            igst: add_or_zero(self.igst, rhs.igst),
        }
    }
}

impl std::ops::AddAssign for GstSplit {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A line item augmented with its computed amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedLineItem {
    /// Quantity as entered.
    pub quantity: Decimal,
    /// Unit price as entered.
    pub unit_price: Decimal,
    /// Line discount percentage as entered.
    pub discount_percentage: Decimal,
    /// GST rate as entered.
    pub gst_rate: Decimal,
    /// `quantity × unit_price`.
    pub subtotal: Decimal,
    /// Resolved line discount.
    pub discount_amount: Decimal,
    /// Share of the document discount carried by this line.
    pub document_discount_share: Decimal,
    /// Base the GST rate applies to.
    pub taxable_amount: Decimal,
    /// Central GST.
    pub cgst_amount: Decimal,
    /// State GST.
    pub sgst_amount: Decimal,
    /// Integrated GST.
    pub igst_amount: Decimal,
    /// Tax-inclusive line total.
    pub total_amount: Decimal,
}

impl ComputedLineItem {
    /// Tax components of this line.
    #[must_use]
    pub fn gst(&self) -> GstSplit {
        GstSplit {
            cgst: self.cgst_amount,
            sgst: self.sgst_amount,
            igst: self.igst_amount,
        }
    }
}

/// An additional charge with its share of the blended-rate GST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// Charge name, e.g. "freight".
    pub name: String,
    /// Charge amount before tax.
    pub amount: Decimal,
    /// Central GST on the charge.
    pub cgst_amount: Decimal,
    /// State GST on the charge.
    pub sgst_amount: Decimal,
    /// Integrated GST on the charge.
    pub igst_amount: Decimal,
}

/// Per-rate totals for statutory slab reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTotals {
    /// Central GST at this rate.
    pub cgst: Decimal,
    /// State GST at this rate.
    pub sgst: Decimal,
    /// Integrated GST at this rate.
    pub igst: Decimal,
    /// Taxable base at this rate.
    pub taxable: Decimal,
}

/// Document-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherTotals {
    /// Sum of line subtotals.
    pub total_subtotal: Decimal,
    /// Line discounts plus the document discount.
    pub total_discount: Decimal,
    /// Taxable base after all discounts.
    pub total_taxable: Decimal,
    /// Sum of additional charges.
    pub total_additional_charges: Decimal,
    /// GST levied on additional charges.
    pub total_additional_gst: Decimal,
    /// Central GST, items and charges.
    pub total_cgst: Decimal,
    /// State GST, items and charges.
    pub total_sgst: Decimal,
    /// Integrated GST, items and charges.
    pub total_igst: Decimal,
    /// All GST.
    pub total_gst: Decimal,
    /// Blended rate applied to additional charges, in percent.
    pub weighted_gst_rate: Decimal,
    /// Factor redistributing the document discount onto items.
    pub apportion_factor: Decimal,
    /// Item-level totals grouped by GST rate.
    pub gst_breakdown: BTreeMap<Decimal, SlabTotals>,
    /// Payable amount before whole-unit rounding.
    pub pre_round_total: Decimal,
    /// Signed whole-unit rounding adjustment.
    pub round_off: Decimal,
    /// Final payable amount, always integral.
    pub total_amount: Decimal,
}

/// Full result of one computation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherComputation {
    /// Computed line items, in input order.
    pub items: Vec<ComputedLineItem>,
    /// Additional charges with their GST, in name order.
    pub charges: Vec<ChargeLine>,
    /// Document totals.
    pub totals: VoucherTotals,
}
