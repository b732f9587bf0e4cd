//! Property-based tests for voucher computation.
//!
//! Covers conservation of the discounted base across apportionment, locality
//! split equivalence, whole-unit rounding, degenerate apportionment and the
//! exactness of the additional-charge breakdown.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::apportion::Apportionment;
use super::engine::VoucherEngine;
use super::line::LineBase;
use super::types::{DiscountMode, LineItem, Voucher, VoucherConfig};

/// Strategy for a money amount from 0.00 to 10,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a quantity from 0.000 to 100.000.
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

/// Strategy for a standard GST slab.
fn slab() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0)),
        Just(dec!(5)),
        Just(dec!(12)),
        Just(dec!(18)),
        Just(dec!(28)),
    ]
}

/// Strategy for a percentage from 0.00 to 100.00.
fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|basis| Decimal::new(basis, 2))
}

fn discount_mode() -> impl Strategy<Value = DiscountMode> {
    prop_oneof![
        Just(DiscountMode::Percentage),
        Just(DiscountMode::Amount),
        Just(DiscountMode::None),
    ]
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (quantity(), amount(), percentage(), amount(), slab()).prop_map(
        |(quantity, unit_price, discount_percentage, discount_amount, gst_rate)| LineItem {
            quantity,
            unit_price,
            discount_percentage,
            discount_amount,
            gst_rate,
        },
    )
}

fn charges() -> impl Strategy<Value = BTreeMap<String, Decimal>> {
    prop::collection::btree_map("[a-z]{3,8}", amount(), 0..4)
}

/// Strategy for any magnitude `Decimal` can hold, overflow included.
fn extreme() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::MAX),
        Just(Decimal::MIN),
        (any::<i64>(), 0u32..10).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale)),
    ]
}

fn extreme_line_item() -> impl Strategy<Value = LineItem> {
    (extreme(), extreme(), extreme(), extreme(), extreme()).prop_map(
        |(quantity, unit_price, discount_percentage, discount_amount, gst_rate)| LineItem {
            quantity,
            unit_price,
            discount_percentage,
            discount_amount,
            gst_rate,
        },
    )
}

/// Unrounded sum of item taxable bases.
fn exact_taxable_sum(voucher: &Voucher) -> Decimal {
    let config = &voucher.config;
    let bases: Vec<LineBase> = voucher
        .items
        .iter()
        .map(|item| LineBase::resolve(item, config.line_discount_type))
        .collect();
    let apportionment =
        Apportionment::compute(&bases, config.total_discount_type, config.total_discount_value);
    bases
        .iter()
        .map(|b| apportionment.taxable_base(b.after_line_discount))
        .sum()
}

fn voucher() -> impl Strategy<Value = Voucher> {
    (
        prop::collection::vec(line_item(), 1..8),
        discount_mode(),
        discount_mode(),
        percentage(),
        charges(),
        any::<bool>(),
    )
        .prop_map(
            |(items, line_mode, total_mode, total_value, additional_charges, is_intrastate)| {
                Voucher {
                    items,
                    config: VoucherConfig {
                        line_discount_type: line_mode,
                        total_discount_type: total_mode,
                        total_discount_value: total_value,
                        additional_charges,
                        is_intrastate,
                    },
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The unrounded item bases always add back to the discounted document base.
    #[test]
    fn prop_apportionment_conserves_base(voucher in voucher()) {
        let engine = VoucherEngine::default();
        let result = engine.compute(&voucher);
        let exact_sum = exact_taxable_sum(&voucher);

        // total_taxable itself is rounded to cents
        let diff = (exact_sum - result.totals.total_taxable).abs();
        prop_assert!(diff <= dec!(0.005) + dec!(0.000001), "diff = {}", diff);
    }

    /// The uniform factor spreads the discounted base with no loss.
    #[test]
    fn prop_factor_conserves_discounted_base(voucher in voucher()) {
        let config = &voucher.config;
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
        prop_assume!(!apportionment.is_degenerate());

        let spread: Decimal = bases
            .iter()
            .map(|b| apportionment.taxable_base(b.after_line_discount))
            .sum();
        let diff = (spread - apportionment.after_total_discount).abs();
        prop_assert!(diff < dec!(0.000001), "diff = {}", diff);
    }

    /// Intrastate CGST + SGST equals interstate IGST for identical inputs.
    #[test]
    fn prop_split_equivalence(voucher in voucher()) {
        let engine = VoucherEngine::default();

        let mut intra = voucher.clone();
        intra.config.is_intrastate = true;
        let mut inter = voucher;
        inter.config.is_intrastate = false;

        let intra = engine.compute(&intra);
        let inter = engine.compute(&inter);

        for (a, b) in intra.items.iter().zip(&inter.items) {
            prop_assert_eq!(a.cgst_amount + a.sgst_amount, b.igst_amount);
            prop_assert_eq!(a.igst_amount, Decimal::ZERO);
            prop_assert_eq!(b.cgst_amount + b.sgst_amount, Decimal::ZERO);
        }
        prop_assert_eq!(intra.totals.total_gst, inter.totals.total_gst);
        prop_assert_eq!(intra.totals.total_amount, inter.totals.total_amount);
    }

    /// The payable amount is integral and within one unit of the pre-round total.
    #[test]
    fn prop_total_is_integral(voucher in voucher()) {
        let totals = VoucherEngine::default().compute(&voucher).totals;

        prop_assert_eq!(totals.total_amount.fract(), Decimal::ZERO);
        prop_assert!((totals.total_amount - totals.pre_round_total).abs() < Decimal::ONE);
        prop_assert_eq!(totals.pre_round_total + totals.round_off, totals.total_amount);
    }

    /// Fully discounted lines leave nothing to apportion and nothing to tax.
    #[test]
    fn prop_degenerate_apportionment(
        items in prop::collection::vec(line_item(), 1..6),
        total_value in amount(),
        is_intrastate in any::<bool>(),
    ) {
        let items: Vec<LineItem> = items
            .into_iter()
            .map(|item| item.with_discount_percentage(Decimal::ONE_HUNDRED))
            .collect();
        let voucher = Voucher {
            items,
            config: VoucherConfig {
                line_discount_type: DiscountMode::Percentage,
                total_discount_type: DiscountMode::Amount,
                total_discount_value: total_value,
                is_intrastate,
                ..VoucherConfig::default()
            },
        };

        let result = VoucherEngine::default().compute(&voucher);
        prop_assert_eq!(result.totals.apportion_factor, Decimal::ZERO);
        for item in &result.items {
            prop_assert_eq!(item.taxable_amount, Decimal::ZERO);
            prop_assert_eq!(item.gst().total(), Decimal::ZERO);
        }
        prop_assert_eq!(result.totals.total_taxable, Decimal::ZERO);
        prop_assert_eq!(result.totals.total_gst, Decimal::ZERO);
    }

    /// Per-charge GST adds up exactly to the charge GST aggregate.
    #[test]
    fn prop_charge_breakdown_is_exact(voucher in voucher()) {
        let result = VoucherEngine::default().compute(&voucher);

        let charge_gst: Decimal = result
            .charges
            .iter()
            .map(|c| c.cgst_amount + c.sgst_amount + c.igst_amount)
            .sum();
        prop_assert_eq!(charge_gst, result.totals.total_additional_gst);

        let charge_total: Decimal = result.charges.iter().map(|c| c.amount).sum();
        prop_assert_eq!(charge_total, result.totals.total_additional_charges);
    }

    /// Slab taxable amounts add up to the item taxable amounts.
    #[test]
    fn prop_slabs_cover_items(voucher in voucher()) {
        let result = VoucherEngine::default().compute(&voucher);

        let slab_taxable: Decimal = result.totals.gst_breakdown.values().map(|s| s.taxable).sum();
        let item_taxable: Decimal = result.items.iter().map(|i| i.taxable_amount).sum();
        prop_assert_eq!(slab_taxable, item_taxable);

        let slab_gst: Decimal = result
            .totals
            .gst_breakdown
            .values()
            .map(|s| s.cgst + s.sgst + s.igst)
            .sum();
        prop_assert_eq!(slab_gst + result.totals.total_additional_gst, result.totals.total_gst);
    }

    /// Any magnitude computes to an integral total without panicking.
    #[test]
    fn prop_extreme_magnitudes_do_not_panic(
        items in prop::collection::vec(extreme_line_item(), 1..5),
        line_mode in discount_mode(),
        total_mode in discount_mode(),
        total_value in extreme(),
        freight in extreme(),
        is_intrastate in any::<bool>(),
    ) {
        let mut additional_charges = BTreeMap::new();
        additional_charges.insert("freight".to_string(), freight);
        let voucher = Voucher {
            items,
            config: VoucherConfig {
                line_discount_type: line_mode,
                total_discount_type: total_mode,
                total_discount_value: total_value,
                additional_charges,
                is_intrastate,
            },
        };

        let result = VoucherEngine::default().compute(&voucher);
        prop_assert_eq!(result.items.len(), voucher.items.len());
        prop_assert_eq!(result.totals.total_amount.fract(), Decimal::ZERO);
    }
}
