//! Resolved price information for a purchase option.
//!
//! A `PriceInfo` is produced by the price lookup collaborator and stored
//! on the option exactly once. Discount math always uses `amount`; the
//! localized string is for display only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price of a product as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInfo {
    amount: Decimal,
    currency_locale: String,
    localized_string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    free_trial: Option<FreeTrial>,
}

impl PriceInfo {
    pub fn new(
        amount: Decimal,
        currency_locale: impl Into<String>,
        localized_string: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency_locale: currency_locale.into(),
            localized_string: localized_string.into(),
            free_trial: None,
        }
    }

    /// Attaches the introductory free trial offered with this product.
    pub fn with_free_trial(mut self, free_trial: FreeTrial) -> Self {
        self.free_trial = Some(free_trial);
        self
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency_locale(&self) -> &str {
        &self.currency_locale
    }

    pub fn localized_string(&self) -> &str {
        &self.localized_string
    }

    pub fn free_trial(&self) -> Option<FreeTrial> {
        self.free_trial
    }
}

/// Introductory free trial attached to a subscription product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "quantity", rename_all = "lowercase")]
pub enum FreeTrial {
    Day(u32),
    Week(u32),
    Month(u32),
    Year(u32),
}

impl FreeTrial {
    /// Returns the quantity and singular unit used for display.
    ///
    /// Weeks are shown as days ("7 days" rather than "1 week").
    pub fn display_quantity(&self) -> (u32, &'static str) {
        match *self {
            FreeTrial::Day(n) => (n, "day"),
            FreeTrial::Week(n) => (n.saturating_mul(7), "day"),
            FreeTrial::Month(n) => (n, "month"),
            FreeTrial::Year(n) => (n, "year"),
        }
    }
}
