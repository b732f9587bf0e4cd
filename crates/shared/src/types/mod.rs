//! Common types used across the workspace.

pub mod money;
pub mod number;


pub use money::{
    MONEY_DECIMAL_PLACES, add_or_zero, mul_or_zero, percent_of, ratio_or_zero, round_half_up,
    sub_or_zero, sum_or_zero, whole_unit_adjustment,
};
pub use number::SafeDecimal;
