//! User actions reported by a paywall session.
//!
//! Actions are returned to the caller and kept in the session's log
//! instead of being pushed through registered callbacks.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaywallSessionId, ProductId, Timestamp};

/// Something the user did on the paywall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaywallAction {
    ScreenAppeared {
        session_id: PaywallSessionId,
        occurred_at: Timestamp,
    },

    OptionSelected {
        session_id: PaywallSessionId,
        product_id: ProductId,
        occurred_at: Timestamp,
    },

    /// The purchase button was tapped with a priced option selected.
    PurchaseTapped {
        session_id: PaywallSessionId,
        product_id: ProductId,
        occurred_at: Timestamp,
    },

    RestoreTapped {
        session_id: PaywallSessionId,
        occurred_at: Timestamp,
    },

    PrivacyTapped {
        session_id: PaywallSessionId,
        occurred_at: Timestamp,
    },

    Dismissed {
        session_id: PaywallSessionId,
        occurred_at: Timestamp,
    },
}

impl PaywallAction {
    /// Returns the action type string, e.g. `paywall.option_selected`.
    pub fn action_type(&self) -> &'static str {
        match self {
            PaywallAction::ScreenAppeared { .. } => "paywall.screen_appeared",
            PaywallAction::OptionSelected { .. } => "paywall.option_selected",
            PaywallAction::PurchaseTapped { .. } => "paywall.purchase_tapped",
            PaywallAction::RestoreTapped { .. } => "paywall.restore_tapped",
            PaywallAction::PrivacyTapped { .. } => "paywall.privacy_tapped",
            PaywallAction::Dismissed { .. } => "paywall.dismissed",
        }
    }

    pub fn session_id(&self) -> PaywallSessionId {
        match self {
            PaywallAction::ScreenAppeared { session_id, .. }
            | PaywallAction::OptionSelected { session_id, .. }
            | PaywallAction::PurchaseTapped { session_id, .. }
            | PaywallAction::RestoreTapped { session_id, .. }
            | PaywallAction::PrivacyTapped { session_id, .. }
            | PaywallAction::Dismissed { session_id, .. } => *session_id,
        }
    }

    /// Product the action refers to, for selection and purchase.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            PaywallAction::OptionSelected { product_id, .. }
            | PaywallAction::PurchaseTapped { product_id, .. } => Some(product_id),
            _ => None,
        }
    }
}
