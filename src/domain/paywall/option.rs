//! Purchase option entity and its declarative display settings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProductId;

use super::{PaywallError, PriceInfo, PurchasePeriod};

/// Declares that an option's discount badge is computed relative to
/// another option in the same paywall.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonSpec {
    /// Position of the reference option in the paywall's option list.
    pub reference_option_index: usize,
    /// Badge text; `#DISCOUNT` is replaced by the computed percentage.
    pub display_format: String,
}

impl ComparisonSpec {
    pub fn new(reference_option_index: usize, display_format: impl Into<String>) -> Self {
        Self {
            reference_option_index,
            display_format: display_format.into(),
        }
    }
}

/// Text shown beside an option's price.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionDetail {
    Text { text: String },
    /// Discount relative to another option, e.g. "Save #DISCOUNT%".
    Discount(ComparisonSpec),
    #[default]
    None,
}

/// Text shown under the option list while this option is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionFooter {
    Text { text: String },
    Badge { text: String },
    /// `#quantity` and `#period` are filled from the product's free trial.
    FreeTrialBadge { format: String },
    /// Offer text of a single-option paywall. Fills `#periodTrial`,
    /// `#periodSubscription`, `#quantity` and `#price`.
    TrialOffer { format: String },
    #[default]
    None,
}

/// One buyable product slot on a paywall.
///
/// Options are identified by their position in the paywall; the price
/// slot starts empty and is filled once by the price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOption {
    pub product_id: ProductId,
    pub period: PurchasePeriod,
    #[serde(default)]
    pub selected_by_default: bool,
    #[serde(default)]
    pub detail: OptionDetail,
    #[serde(default)]
    pub footer: OptionFooter,
    #[serde(skip)]
    price: Option<PriceInfo>,
}

impl PurchaseOption {
    pub fn new(product_id: ProductId, period: PurchasePeriod) -> Self {
        Self {
            product_id,
            period,
            selected_by_default: false,
            detail: OptionDetail::None,
            footer: OptionFooter::None,
            price: None,
        }
    }

    /// Declares a discount badge computed against the option at `reference_index`.
    pub fn discounted_against(
        mut self,
        reference_index: usize,
        display_format: impl Into<String>,
    ) -> Self {
        self.detail = OptionDetail::Discount(ComparisonSpec::new(reference_index, display_format));
        self
    }

    pub fn with_detail_text(mut self, text: impl Into<String>) -> Self {
        self.detail = OptionDetail::Text { text: text.into() };
        self
    }

    pub fn with_footer(mut self, footer: OptionFooter) -> Self {
        self.footer = footer;
        self
    }

    pub fn selected_by_default(mut self) -> Self {
        self.selected_by_default = true;
        self
    }

    /// Returns the comparison this option declares, if any.
    pub fn comparison(&self) -> Option<&ComparisonSpec> {
        match &self.detail {
            OptionDetail::Discount(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn price(&self) -> Option<&PriceInfo> {
        self.price.as_ref()
    }

    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }

    /// Stores the resolved price.
    ///
    /// # Errors
    ///
    /// `PriceAlreadyResolved` if a price was stored before; the slot is
    /// written at most once.
    pub fn resolve_price(&mut self, price: PriceInfo) -> Result<(), PaywallError> {
        if self.price.is_some() {
            return Err(PaywallError::price_already_resolved(self.product_id.clone()));
        }
        self.price = Some(price);
        Ok(())
    }
}
