//! Voucher tax and totals computation.
//!
//! This module implements the GST engine for commercial vouchers:
//! - Line normalization and line discounts
//! - Document discount apportionment
//! - Per-item GST with locality splitting
//! - Blended-rate GST on additional charges
//! - Totals, whole-unit rounding and slab breakdown
//! - Form-layer input coercion and validation

pub mod allocation;
pub mod apportion;
pub mod charges;
pub mod engine;
pub mod error;
pub mod input;
pub mod line;
pub mod slab;
pub mod tax;
pub mod totals;
pub mod types;
pub mod validation;

#[cfg(test)]
mod props;

pub use allocation::AllocationUtil;
pub use apportion::Apportionment;
pub use charges::{ChargeTax, weighted_gst_rate};
pub use engine::VoucherEngine;
pub use error::VoucherError;
pub use input::{FormLineItem, VoucherForm};
pub use line::LineBase;
pub use slab::build_slab_breakdown;
pub use tax::ItemTax;
pub use totals::RoundOff;
pub use types::{
    ChargeLine, ComputedLineItem, DiscountMode, GstSplit, LineItem, Locality, SlabTotals, Voucher,
    VoucherComputation, VoucherConfig, VoucherTotals,
};
pub use validation::{ValidationRules, validate};
