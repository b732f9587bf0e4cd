//! Voucher validation errors.
//!
//! The engine itself never fails. These errors are raised by the form-layer
//! validation that runs before a voucher is handed to the engine.

use rust_decimal::Decimal;
use thiserror::Error;
use voucher_shared::AppError;

/// Errors detected while validating a voucher.
///
/// Line numbers are 1-based, matching what a user sees on the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    // ========== Document Errors ==========
    /// Voucher has no line items.
    #[error("Voucher must have at least one line item")]
    NoItems,

    /// Document discount value is negative.
    #[error("Document discount cannot be negative: {0}")]
    NegativeDocumentDiscount(Decimal),

    /// Document discount percentage exceeds 100.
    #[error("Document discount percentage must be between 0 and 100, got {0}")]
    DocumentDiscountOutOfRange(Decimal),

    /// An additional charge is negative.
    #[error("Additional charge '{name}' cannot be negative: {amount}")]
    NegativeCharge {
        /// Charge name.
        name: String,
        /// Charge amount.
        amount: Decimal,
    },

    // ========== Line Errors ==========
    /// Quantity is negative.
    #[error("Line {line}: quantity cannot be negative")]
    NegativeQuantity {
        /// Line number.
        line: usize,
    },

    /// Unit price is negative.
    #[error("Line {line}: unit price cannot be negative")]
    NegativeUnitPrice {
        /// Line number.
        line: usize,
    },

    /// Line discount percentage outside 0–100.
    #[error("Line {line}: discount percentage must be between 0 and 100, got {value}")]
    LineDiscountOutOfRange {
        /// Line number.
        line: usize,
        /// Offending percentage.
        value: Decimal,
    },

    /// Flat line discount is negative.
    #[error("Line {line}: discount amount cannot be negative")]
    NegativeLineDiscount {
        /// Line number.
        line: usize,
    },

    /// Quantity × unit price exceeds the representable range.
    #[error("Line {line}: amount is too large")]
    AmountOutOfRange {
        /// Line number.
        line: usize,
    },

    /// GST rate is negative.
    #[error("Line {line}: GST rate cannot be negative")]
    NegativeGstRate {
        /// Line number.
        line: usize,
    },

    /// GST rate is not one of the configured slabs.
    #[error("Line {line}: GST rate {rate}% is not a standard slab")]
    NonStandardSlab {
        /// Line number.
        line: usize,
        /// Offending rate.
        rate: Decimal,
    },
}

impl VoucherError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoItems => "NO_ITEMS",
            Self::NegativeDocumentDiscount(_) => "NEGATIVE_DOCUMENT_DISCOUNT",
            Self::DocumentDiscountOutOfRange(_) => "DOCUMENT_DISCOUNT_OUT_OF_RANGE",
            Self::NegativeCharge { .. } => "NEGATIVE_CHARGE",
            Self::NegativeQuantity { .. } => "NEGATIVE_QUANTITY",
            Self::NegativeUnitPrice { .. } => "NEGATIVE_UNIT_PRICE",
            Self::LineDiscountOutOfRange { .. } => "LINE_DISCOUNT_OUT_OF_RANGE",
            Self::NegativeLineDiscount { .. } => "NEGATIVE_LINE_DISCOUNT",
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::NegativeGstRate { .. } => "NEGATIVE_GST_RATE",
            Self::NonStandardSlab { .. } => "NON_STANDARD_SLAB",
        }
    }

    /// Line number the error refers to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::NegativeQuantity { line }
            | Self::NegativeUnitPrice { line }
            | Self::LineDiscountOutOfRange { line, .. }
            | Self::NegativeLineDiscount { line }
            | Self::AmountOutOfRange { line }
            | Self::NegativeGstRate { line }
            | Self::NonStandardSlab { line, .. } => Some(*line),
            Self::NoItems
            | Self::NegativeDocumentDiscount(_)
            | Self::DocumentDiscountOutOfRange(_)
            | Self::NegativeCharge { .. } => None,
        }
    }
}

impl From<VoucherError> for AppError {
    fn from(err: VoucherError) -> Self {
        Self::Validation(format!("{} ({})", err, err.error_code()))
    }
}
