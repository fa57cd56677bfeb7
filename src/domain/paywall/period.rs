//! Billing period of a purchase option.

use serde::{Deserialize, Serialize};

/// Billing cycle attached to a purchase option at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchasePeriod {
    /// One-time purchase, never renews.
    Lifetime,
    Yearly,
    /// Six months.
    Semester,
    /// Three months.
    Quarter,
    Monthly,
    Weekly,
}

impl PurchasePeriod {
    /// All periods, longest cycle first.
    pub const ALL: [PurchasePeriod; 6] = [
        PurchasePeriod::Lifetime,
        PurchasePeriod::Yearly,
        PurchasePeriod::Semester,
        PurchasePeriod::Quarter,
        PurchasePeriod::Monthly,
        PurchasePeriod::Weekly,
    ];

    /// Returns the unit shown next to a price ("$2.99 / week").
    ///
    /// `None` for lifetime purchases.
    pub fn period_name(&self) -> Option<&'static str> {
        match self {
            PurchasePeriod::Lifetime => None,
            PurchasePeriod::Yearly => Some("year"),
            PurchasePeriod::Semester => Some("6 months"),
            PurchasePeriod::Quarter => Some("3 months"),
            PurchasePeriod::Monthly => Some("month"),
            PurchasePeriod::Weekly => Some("week"),
        }
    }

    /// Returns true for periods that renew automatically.
    pub fn is_subscription(&self) -> bool {
        !matches!(self, PurchasePeriod::Lifetime)
    }

    /// Returns the display name for this period.
    pub fn display_name(&self) -> &'static str {
        match self {
            PurchasePeriod::Lifetime => "Lifetime",
            PurchasePeriod::Yearly => "Yearly",
            PurchasePeriod::Semester => "Semester",
            PurchasePeriod::Quarter => "Quarter",
            PurchasePeriod::Monthly => "Monthly",
            PurchasePeriod::Weekly => "Weekly",
        }
    }
}

impl std::fmt::Display for PurchasePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
