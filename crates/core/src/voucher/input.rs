//! Form-layer input boundary.
//!
//! Forms submit loosely typed values. Every numeric field here is a
//! `SafeDecimal`, so deserialization coerces blanks and garbage to zero and
//! `into_voucher` hands the engine guaranteed-valid decimals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use voucher_shared::types::SafeDecimal;

use super::types::{DiscountMode, LineItem, Locality, Voucher, VoucherConfig};

/// A line item as submitted by the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLineItem {
    /// Quantity.
    pub quantity: SafeDecimal,
    /// Unit price.
    pub unit_price: SafeDecimal,
    /// Line discount percentage.
    pub discount_percentage: SafeDecimal,
    /// Flat line discount.
    pub discount_amount: SafeDecimal,
    /// GST rate in percent.
    pub gst_rate: SafeDecimal,
}

impl From<&FormLineItem> for LineItem {
    fn from(form: &FormLineItem) -> Self {
        Self {
            quantity: form.quantity.value(),
            unit_price: form.unit_price.value(),
            discount_percentage: form.discount_percentage.value(),
            discount_amount: form.discount_amount.value(),
            gst_rate: form.gst_rate.value(),
        }
    }
}

/// A voucher as submitted by the form.
///
/// Locality comes from `is_intrastate`, unless both jurisdiction codes are
/// present, in which case they decide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherForm {
    /// Line items in entry order.
    pub items: Vec<FormLineItem>,
    /// Line discount interpretation.
    #[serde(deserialize_with = "lenient_mode")]
    pub line_discount_type: DiscountMode,
    /// Document discount interpretation.
    #[serde(deserialize_with = "lenient_mode")]
    pub total_discount_type: DiscountMode,
    /// Document discount value.
    pub total_discount_value: SafeDecimal,
    /// Additional charges by name.
    pub additional_charges: BTreeMap<String, SafeDecimal>,
    /// Explicit locality flag.
    #[serde(deserialize_with = "lenient_bool")]
    pub is_intrastate: bool,
    /// Seller jurisdiction code, e.g. a state code or GSTIN.
    pub seller_jurisdiction: Option<String>,
    /// Buyer jurisdiction code.
    pub buyer_jurisdiction: Option<String>,
}

impl VoucherForm {
    /// Locality of the transaction.
    #[must_use]
    pub fn locality(&self) -> Locality {
        match (&self.seller_jurisdiction, &self.buyer_jurisdiction) {
            (Some(seller), Some(buyer)) => Locality::from_jurisdictions(seller, buyer),
            _ => Locality::from_intrastate(self.is_intrastate),
        }
    }

    /// Converts the form into an engine-ready voucher.
    #[must_use]
    pub fn into_voucher(self) -> Voucher {
        let is_intrastate = self.locality().is_intrastate();
        Voucher {
            items: self.items.iter().map(LineItem::from).collect(),
            config: VoucherConfig {
                line_discount_type: self.line_discount_type,
                total_discount_type: self.total_discount_type,
                total_discount_value: self.total_discount_value.value(),
                additional_charges: self
                    .additional_charges
                    .into_iter()
                    .map(|(name, amount)| (name, amount.value()))
                    .collect(),
                is_intrastate,
            },
        }
    }
}

impl Locality {
    /// Derives locality by comparing two jurisdiction codes.
    ///
    /// Codes are trimmed and compared case-insensitively. A GSTIN-style code
    /// (15 characters, leading two-digit state code) is reduced to its state
    /// prefix first.
    #[must_use]
    pub fn from_jurisdictions(seller: &str, buyer: &str) -> Self {
        Self::from_intrastate(jurisdiction_key(seller) == jurisdiction_key(buyer))
    }
}

fn jurisdiction_key(code: &str) -> String {
    let code = code.trim();
    let is_gstin = code.len() == 15 && code.chars().take(2).all(|c| c.is_ascii_digit());
    if is_gstin {
        code[..2].to_string()
    } else {
        code.to_ascii_uppercase()
    }
}

/// Missing, null or unknown modes become `DiscountMode::None`.
fn lenient_mode<'de, D>(deserializer: D) -> Result<DiscountMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Accepts booleans, `"true"`/`"false"` and numbers equal to one or zero
/// (`1`, `1.0`, `0`); anything else is false.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match &value {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        serde_json::Value::Number(_) => SafeDecimal::from_json(&value).value() == Decimal::ONE,
        _ => false,
    })
}
