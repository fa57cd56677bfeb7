//! Price comparisons between purchase options.
//!
//! A comparison states that one option (usually yearly) is shown with a
//! discount relative to a shorter-cycle option (usually monthly or weekly).
//! Which period pairs may be compared is a single table, `LEGAL_COMPARISONS`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PurchasePeriod;

/// The kind of normalisation applied before comparing two prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    /// Monthly price against 52/12 weekly prices.
    MonthlyVsWeekly,
    /// Yearly price against 52 weekly prices.
    YearlyVsWeekly,
    /// Yearly price against 12 monthly prices.
    YearlyVsMonthly,
}

/// (discounted period, reference period, kind). Any pair not listed is illegal.
pub const LEGAL_COMPARISONS: [(PurchasePeriod, PurchasePeriod, ComparisonKind); 3] = [
    (
        PurchasePeriod::Yearly,
        PurchasePeriod::Monthly,
        ComparisonKind::YearlyVsMonthly,
    ),
    (
        PurchasePeriod::Yearly,
        PurchasePeriod::Weekly,
        ComparisonKind::YearlyVsWeekly,
    ),
    (
        PurchasePeriod::Monthly,
        PurchasePeriod::Weekly,
        ComparisonKind::MonthlyVsWeekly,
    ),
];

impl ComparisonKind {
    /// Looks the period pair up in `LEGAL_COMPARISONS`.
    pub fn for_periods(discounted: PurchasePeriod, reference: PurchasePeriod) -> Option<Self> {
        LEGAL_COMPARISONS
            .iter()
            .find(|(d, r, _)| *d == discounted && *r == reference)
            .map(|(_, _, kind)| *kind)
    }

    /// How many reference periods fit in one discounted period, as an exact
    /// fraction `(numerator, denominator)`.
    pub fn period_multiple(&self) -> (Decimal, Decimal) {
        match self {
            ComparisonKind::MonthlyVsWeekly => (Decimal::from(52), Decimal::from(12)),
            ComparisonKind::YearlyVsWeekly => (Decimal::from(52), Decimal::ONE),
            ComparisonKind::YearlyVsMonthly => (Decimal::from(12), Decimal::ONE),
        }
    }

    /// Computes `100 * discounted / (multiple * reference)`, truncated toward zero.
    ///
    /// Returns `None` when the reference price is not positive or the
    /// arithmetic overflows.
    pub fn discount_percent(&self, discounted: Decimal, reference: Decimal) -> Option<i64> {
        if reference <= Decimal::ZERO {
            return None;
        }
        let (numerator, denominator) = self.period_multiple();
        let scaled = Decimal::ONE_HUNDRED
            .checked_mul(discounted)?
            .checked_mul(denominator)?;
        let normalised_reference = numerator.checked_mul(reference)?;
        scaled
            .checked_div(normalised_reference)?
            .trunc()
            .to_i64()
    }
}

/// A comparison derived from configuration, completed once both prices load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub discounted_index: usize,
    pub reference_index: usize,
    pub kind: ComparisonKind,
    pub display_format: String,
    discount_percent: Option<i64>,
}

impl PriceComparison {
    pub fn new(
        discounted_index: usize,
        reference_index: usize,
        kind: ComparisonKind,
        display_format: impl Into<String>,
    ) -> Self {
        Self {
            discounted_index,
            reference_index,
            kind,
            display_format: display_format.into(),
            discount_percent: None,
        }
    }

    pub fn discount_percent(&self) -> Option<i64> {
        self.discount_percent
    }

    pub fn is_computed(&self) -> bool {
        self.discount_percent.is_some()
    }

    /// Computes the discount from the two amounts unless already computed.
    ///
    /// Returns true only when this call set the value.
    pub(crate) fn complete(&mut self, discounted: Decimal, reference: Decimal) -> bool {
        if self.discount_percent.is_some() {
            return false;
        }
        match self.kind.discount_percent(discounted, reference) {
            Some(percent) => {
                self.discount_percent = Some(percent);
                true
            }
            None => false,
        }
    }
}
