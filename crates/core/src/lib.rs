//! Core computation logic for GST vouchers.
//!
//! This crate contains pure business logic with ZERO I/O, web or database
//! dependencies. Every amount is a `rust_decimal::Decimal`.
//!
//! # Modules
//!
//! - `voucher` - Line discounts, discount apportionment, GST, totals and rounding

pub mod voucher;
