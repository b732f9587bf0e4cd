//! Amount allocation using the Largest Remainder Method.
//!
//! Spreads a rounded total over weighted recipients so that the rounded
//! shares sum exactly to the total (no cents lost).
//!
//! The Largest Remainder Method works by:
//! 1. Calculate exact allocations
//! 2. Floor each allocation to the target precision
//! 3. Calculate the remainder (total - sum of floored)
//! 4. Distribute remainder units to items with largest fractional parts

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use voucher_shared::types::{add_or_zero, sub_or_zero, sum_or_zero};

/// Allocation utility for distributing amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Allocate `total` in proportion to `weights`.
    ///
    /// The total is rounded half-up to `decimal_places` first; the returned
    /// shares sum exactly to that rounded total. Weights may be negative.
    /// When the weights sum to zero every share is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use voucher_core::voucher::AllocationUtil;
    ///
    /// // 10 split over 1:1:1 = [3.34, 3.33, 3.33]
    /// let weights = vec![dec!(1), dec!(1), dec!(1)];
    /// let result = AllocationUtil::allocate_by_weights(dec!(10), &weights, 2);
    /// assert_eq!(result.iter().sum::<rust_decimal::Decimal>(), dec!(10));
    /// ```
    #[must_use]
    pub fn allocate_by_weights(
        total: Decimal,
        weights: &[Decimal],
        decimal_places: u32,
    ) -> Vec<Decimal> {
        if weights.is_empty() {
            return vec![];
        }

        let weight_sum = sum_or_zero(weights.iter().copied());
        if weight_sum.is_zero() {
            return vec![Decimal::ZERO; weights.len()];
        }

        let unit = Decimal::new(1, decimal_places);
        let total_rounded =
            total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);

        let exact: Vec<Decimal> = weights
            .iter()
            .map(|w| {
                total_rounded
                    .checked_mul(*w)
                    .and_then(|share| share.checked_div(weight_sum))
                    .unwrap_or(Decimal::ZERO)
            })
            .collect();

        let mut floored: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToNegativeInfinity))
            .collect();

        let remainder = sub_or_zero(total_rounded, sum_or_zero(floored.iter().copied()));

        let units_to_distribute = remainder
            .checked_div(unit)
            .and_then(|units| units.round().to_usize())
            .unwrap_or(0);

        if units_to_distribute == 0 {
            return floored;
        }

        let mut remainders: Vec<(usize, Decimal)> = exact
            .iter()
            .zip(floored.iter())
            .enumerate()
            .map(|(i, (e, f))| (i, sub_or_zero(*e, *f)))
            .collect();

        // Largest fraction first; stable sort keeps entry order on ties.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _) in remainders.iter().take(units_to_distribute) {
            floored[*idx] = add_or_zero(floored[*idx], unit);
        }

        floored
    }
}
