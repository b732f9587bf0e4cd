//! Form-layer validation rules for vouchers.
//!
//! Validation is advisory. The engine computes for any input; callers run
//! these checks first when they want to reject bad entries.

use rust_decimal::Decimal;
use voucher_shared::ValidationConfig;

use super::error::VoucherError;
use super::types::{DiscountMode, Voucher};

/// Rules applied during validation.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Reject GST rates outside `standard_slabs`.
    pub enforce_standard_slabs: bool,
    /// Accepted GST rates.
    pub standard_slabs: Vec<Decimal>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::from(&ValidationConfig::default())
    }
}

impl From<&ValidationConfig> for ValidationRules {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            enforce_standard_slabs: config.enforce_standard_slabs,
            standard_slabs: config.standard_slabs.clone(),
        }
    }
}

impl ValidationRules {
    /// Returns true if `rate` is one of the configured slabs.
    #[must_use]
    pub fn is_standard_slab(&self, rate: Decimal) -> bool {
        self.standard_slabs.contains(&rate)
    }
}

/// Validates a voucher, reporting the first failure.
///
/// # Errors
///
/// Returns an error if any line or document field violates the rules.
pub fn validate(voucher: &Voucher, rules: &ValidationRules) -> Result<(), VoucherError> {
    if voucher.items.is_empty() {
        return Err(VoucherError::NoItems);
    }

    let hundred = Decimal::ONE_HUNDRED;
    let config = &voucher.config;

    for (index, item) in voucher.items.iter().enumerate() {
        let line = index + 1;

        if item.quantity < Decimal::ZERO {
            return Err(VoucherError::NegativeQuantity { line });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(VoucherError::NegativeUnitPrice { line });
        }
        if item.quantity.checked_mul(item.unit_price).is_none() {
            return Err(VoucherError::AmountOutOfRange { line });
        }
        match config.line_discount_type {
            DiscountMode::Percentage => {
                let pct = item.discount_percentage;
                if pct < Decimal::ZERO || pct > hundred {
                    return Err(VoucherError::LineDiscountOutOfRange { line, value: pct });
                }
            }
            DiscountMode::Amount => {
                if item.discount_amount < Decimal::ZERO {
                    return Err(VoucherError::NegativeLineDiscount { line });
                }
            }
            DiscountMode::None => {}
        }
        if item.gst_rate < Decimal::ZERO {
            return Err(VoucherError::NegativeGstRate { line });
        }
        if rules.enforce_standard_slabs && !rules.is_standard_slab(item.gst_rate) {
            return Err(VoucherError::NonStandardSlab {
                line,
                rate: item.gst_rate,
            });
        }
    }

    let value = config.total_discount_value;
    if config.total_discount_type != DiscountMode::None {
        if value < Decimal::ZERO {
            return Err(VoucherError::NegativeDocumentDiscount(value));
        }
        if config.total_discount_type == DiscountMode::Percentage && value > hundred {
            return Err(VoucherError::DocumentDiscountOutOfRange(value));
        }
    }

    if let Some((name, amount)) = config
        .additional_charges
        .iter()
        .find(|(_, amount)| **amount < Decimal::ZERO)
    {
        return Err(VoucherError::NegativeCharge {
            name: name.clone(),
            amount: *amount,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voucher::types::{LineItem, VoucherConfig};
    use rust_decimal_macros::dec;

    fn voucher_with(items: Vec<LineItem>, config: VoucherConfig) -> Voucher {
        Voucher { items, config }
    }

    fn valid_item() -> LineItem {
        LineItem::new(dec!(10), dec!(100), dec!(18))
    }

    #[test]
    fn test_valid_voucher() {
        let v = voucher_with(vec![valid_item()], VoucherConfig::default());
        assert!(validate(&v, &ValidationRules::default()).is_ok());
    }

    #[test]
    fn test_no_items() {
        let v = voucher_with(vec![], VoucherConfig::default());
        assert_eq!(
            validate(&v, &ValidationRules::default()),
            Err(VoucherError::NoItems)
        );
    }

    #[test]
    fn test_negative_quantity_reports_line() {
        let bad = LineItem::new(dec!(-1), dec!(100), dec!(18));
        let v = voucher_with(vec![valid_item(), bad], VoucherConfig::default());
        assert_eq!(
            validate(&v, &ValidationRules::default()),
            Err(VoucherError::NegativeQuantity { line: 2 })
        );
    }

    #[test]
    fn test_oversized_line_amount() {
        let huge = LineItem::new(dec!(1000000000000000), dec!(1000000000000000), dec!(18));
        let v = voucher_with(vec![valid_item(), huge], VoucherConfig::default());
        let err = validate(&v, &ValidationRules::default()).unwrap_err();
        assert_eq!(err, VoucherError::AmountOutOfRange { line: 2 });
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_line_percentage_only_checked_in_percentage_mode() {
        let item = valid_item().with_discount_percentage(dec!(150));
        let none_mode = voucher_with(vec![item.clone()], VoucherConfig::default());
        assert!(validate(&none_mode, &ValidationRules::default()).is_ok());

        let pct_mode = voucher_with(
            vec![item],
            VoucherConfig {
                line_discount_type: DiscountMode::Percentage,
                ..VoucherConfig::default()
            },
        );
        assert!(matches!(
            validate(&pct_mode, &ValidationRules::default()),
            Err(VoucherError::LineDiscountOutOfRange { line: 1, .. })
        ));
    }

    #[test]
    fn test_flat_discount_above_subtotal_is_allowed() {
        let item = LineItem::new(dec!(1), dec!(50), dec!(18)).with_discount_amount(dec!(80));
        let v = voucher_with(
            vec![item],
            VoucherConfig {
                line_discount_type: DiscountMode::Amount,
                ..VoucherConfig::default()
            },
        );
        assert!(validate(&v, &ValidationRules::default()).is_ok());
    }

    #[test]
    fn test_non_standard_slab_only_when_enforced() {
        let v = voucher_with(
            vec![LineItem::new(dec!(1), dec!(10), dec!(7))],
            VoucherConfig::default(),
        );
        assert!(validate(&v, &ValidationRules::default()).is_ok());

        let strict = ValidationRules {
            enforce_standard_slabs: true,
            ..ValidationRules::default()
        };
        assert_eq!(
            validate(&v, &strict),
            Err(VoucherError::NonStandardSlab {
                line: 1,
                rate: dec!(7)
            })
        );
        assert!(strict.is_standard_slab(dec!(18.0)));
    }

    #[test]
    fn test_document_discount_rules() {
        let over = voucher_with(
            vec![valid_item()],
            VoucherConfig {
                total_discount_type: DiscountMode::Percentage,
                total_discount_value: dec!(101),
                ..VoucherConfig::default()
            },
        );
        assert_eq!(
            validate(&over, &ValidationRules::default()),
            Err(VoucherError::DocumentDiscountOutOfRange(dec!(101)))
        );

        let negative = voucher_with(
            vec![valid_item()],
            VoucherConfig {
                total_discount_type: DiscountMode::Amount,
                total_discount_value: dec!(-5),
                ..VoucherConfig::default()
            },
        );
        assert_eq!(
            validate(&negative, &ValidationRules::default()),
            Err(VoucherError::NegativeDocumentDiscount(dec!(-5)))
        );
    }

    #[test]
    fn test_negative_charge() {
        let mut config = VoucherConfig::default();
        config.additional_charges.insert("freight".into(), dec!(50));
        config.additional_charges.insert("rebate".into(), dec!(-10));
        let v = voucher_with(vec![valid_item()], config);
        assert_eq!(
            validate(&v, &ValidationRules::default()),
            Err(VoucherError::NegativeCharge {
                name: "rebate".into(),
                amount: dec!(-10)
            })
        );
    }
}
