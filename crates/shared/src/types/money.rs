//! Monetary rounding with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the workspace is a `rust_decimal::Decimal`.
//!
//! `Decimal` operators panic on overflow. Engine arithmetic goes through the
//! `*_or_zero` helpers instead, which collapse an overflowing result to zero
//! the same way unparseable input does.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default number of decimal places for per-line monetary amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount half-up (away from zero at the midpoint).
///
/// `1.005` becomes `1.01` and `-1.005` becomes `-1.01`.
#[must_use]
pub fn round_half_up(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Signed adjustment that brings `amount` to the nearest whole currency unit.
///
/// A fractional part below one half rounds down, anything else rounds up.
/// The rule works on `floor`, so `-3.3` rounds up to `-3` with an adjustment
/// of `0.3`, and `-3.7` rounds down to `-4`.
#[must_use]
pub fn whole_unit_adjustment(amount: Decimal) -> Decimal {
    let fraction = amount - amount.floor();
    if fraction < Decimal::new(5, 1) {
        -fraction
    } else {
        Decimal::ONE - fraction
    }
}

/// Returns `numerator / denominator`, or zero when the denominator is zero
/// or the quotient overflows.
#[must_use]
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Applies a percentage to an amount: `amount × percent / 100`.
///
/// Zero when the product overflows.
#[must_use]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount
        .checked_mul(percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// `a × b`, or zero on overflow.
#[must_use]
pub fn mul_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

/// `a + b`, or zero on overflow.
#[must_use]
pub fn add_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

/// `a − b`, or zero on overflow.
#[must_use]
pub fn sub_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(Decimal::ZERO)
}

/// Sum of `amounts`, or zero if any running total overflows.
#[must_use]
pub fn sum_or_zero<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .unwrap_or(Decimal::ZERO)
}
