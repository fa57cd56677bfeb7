//! Paywall-specific error types.
//!
//! | Error | Kind |
//! |-------|------|
//! | ConfigurationError | fatal, aborts paywall construction |
//! | PaywallError::UnknownProduct | rejected price update |
//! | PaywallError::PriceAlreadyResolved | rejected price update |
//! | PaywallError::NothingSelected | rejected user action |
//! | PaywallError::PriceNotLoaded | rejected user action |
//! | PriceLookupFailure | non-fatal, reported by the price lookup |

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ProductId};

use super::PurchasePeriod;

/// Contract violations found while building a paywall from its configuration.
///
/// These indicate a programming or configuration mistake and are never
/// produced by runtime data such as prices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Paywall must declare at least one purchase option")]
    NoOptions,

    #[error("Product '{product_id}' is declared by options {first_index} and {second_index}")]
    DuplicateProduct {
        product_id: ProductId,
        first_index: usize,
        second_index: usize,
    },

    #[error("Options {first_index} and {second_index} are both selected by default")]
    MultipleDefaultSelections {
        first_index: usize,
        second_index: usize,
    },

    #[error(
        "Option {discounted_index} compares against option {reference_index}, \
         but only {option_count} options exist"
    )]
    ReferenceOutOfRange {
        discounted_index: usize,
        reference_index: usize,
        option_count: usize,
    },

    #[error(
        "Option {discounted_index} ({discounted_period}) cannot be discounted against \
         option {reference_index} ({reference_period})"
    )]
    IllegalComparison {
        discounted_index: usize,
        reference_index: usize,
        discounted_period: PurchasePeriod,
        reference_period: PurchasePeriod,
    },
}

impl ConfigurationError {
    pub fn reference_out_of_range(
        discounted_index: usize,
        reference_index: usize,
        option_count: usize,
    ) -> Self {
        ConfigurationError::ReferenceOutOfRange {
            discounted_index,
            reference_index,
            option_count,
        }
    }

    pub fn illegal_comparison(
        discounted_index: usize,
        reference_index: usize,
        discounted_period: PurchasePeriod,
        reference_period: PurchasePeriod,
    ) -> Self {
        ConfigurationError::IllegalComparison {
            discounted_index,
            reference_index,
            discounted_period,
            reference_period,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigurationError::IllegalComparison { .. }
            | ConfigurationError::ReferenceOutOfRange { .. } => ErrorCode::IllegalComparison,
            _ => ErrorCode::InvalidConfiguration,
        }
    }
}

/// Errors returned by paywall session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaywallError {
    #[error("No purchase option for product '{product_id}'")]
    UnknownProduct { product_id: ProductId },

    #[error("Option index {index} is out of range ({option_count} options)")]
    OptionOutOfRange { index: usize, option_count: usize },

    #[error("Price for product '{product_id}' has already been resolved")]
    PriceAlreadyResolved { product_id: ProductId },

    #[error("No purchase option is selected")]
    NothingSelected,

    #[error("Price for product '{product_id}' has not been loaded yet")]
    PriceNotLoaded { product_id: ProductId },

    #[error("Could not load paywall definition '{path}': {reason}")]
    Definition { path: String, reason: String },
}

impl PaywallError {
    pub fn unknown_product(product_id: ProductId) -> Self {
        PaywallError::UnknownProduct { product_id }
    }

    pub fn option_out_of_range(index: usize, option_count: usize) -> Self {
        PaywallError::OptionOutOfRange {
            index,
            option_count,
        }
    }

    pub fn price_already_resolved(product_id: ProductId) -> Self {
        PaywallError::PriceAlreadyResolved { product_id }
    }

    pub fn price_not_loaded(product_id: ProductId) -> Self {
        PaywallError::PriceNotLoaded { product_id }
    }

    pub fn definition(path: impl Into<String>, reason: impl Into<String>) -> Self {
        PaywallError::Definition {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaywallError::UnknownProduct { .. } => ErrorCode::ProductNotFound,
            PaywallError::OptionOutOfRange { .. } => ErrorCode::OptionNotFound,
            PaywallError::PriceAlreadyResolved { .. } => ErrorCode::PriceAlreadyResolved,
            PaywallError::NothingSelected => ErrorCode::NothingSelected,
            PaywallError::PriceNotLoaded { .. } => ErrorCode::PriceNotLoaded,
            PaywallError::Definition { .. } => ErrorCode::InvalidConfiguration,
        }
    }

    /// Returns true if this error means the paywall cannot be shown at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PaywallError::Definition { .. })
    }
}

/// Failure reported by the price lookup collaborator.
///
/// Never fatal: comparisons depending on the product stay uncomputed and
/// the presentation layer omits their badges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceLookupFailure {
    #[error("Product is not available in the store")]
    NotFound,

    #[error("Price lookup timed out after {after_ms} ms")]
    TimedOut { after_ms: u64 },

    #[error("Price lookup failed: {message}")]
    Unavailable { message: String },
}

impl PriceLookupFailure {
    pub fn unavailable(message: impl Into<String>) -> Self {
        PriceLookupFailure::Unavailable {
            message: message.into(),
        }
    }

    pub fn timed_out(after_ms: u64) -> Self {
        PriceLookupFailure::TimedOut { after_ms }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PriceLookupFailure::NotFound => ErrorCode::ProductNotFound,
            _ => ErrorCode::PriceLookupFailed,
        }
    }

    /// Returns true if issuing the lookup again may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PriceLookupFailure::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn illegal_comparison_names_both_indices() {
        let err = ConfigurationError::illegal_comparison(
            2,
            0,
            PurchasePeriod::Weekly,
            PurchasePeriod::Monthly,
        );
        assert_eq!(
            err.to_string(),
            "Option 2 (Weekly) cannot be discounted against option 0 (Monthly)"
        );
        assert_eq!(err.code(), ErrorCode::IllegalComparison);
    }

    #[test]
    fn reference_out_of_range_names_both_indices() {
        let err = ConfigurationError::reference_out_of_range(1, 5, 3);
        assert_eq!(
            err.to_string(),
            "Option 1 compares against option 5, but only 3 options exist"
        );
    }

    #[test]
    fn definition_errors_are_fatal() {
        let err = PaywallError::definition("paywall.yaml", "missing field `options`");
        assert!(err.is_fatal());
        assert_eq!(err.code(), ErrorCode::InvalidConfiguration);
        assert_eq!(ConfigurationError::NoOptions.code(), ErrorCode::InvalidConfiguration);
    }

    #[test]
    fn runtime_errors_are_not_fatal() {
        assert!(!PaywallError::NothingSelected.is_fatal());
        assert!(!PaywallError::unknown_product(product("pro.x")).is_fatal());
        assert!(!PaywallError::price_already_resolved(product("pro.x")).is_fatal());
    }

    #[test]
    fn error_codes_map_correctly() {
        assert_eq!(
            PaywallError::unknown_product(product("pro.x")).code(),
            ErrorCode::ProductNotFound
        );
        assert_eq!(
            PaywallError::option_out_of_range(4, 2).code(),
            ErrorCode::OptionNotFound
        );
        assert_eq!(
            PaywallError::price_not_loaded(product("pro.x")).code(),
            ErrorCode::PriceNotLoaded
        );
    }

    #[test]
    fn lookup_failures_display_message() {
        assert_eq!(
            PriceLookupFailure::unavailable("store offline").to_string(),
            "Price lookup failed: store offline"
        );
        assert_eq!(
            PriceLookupFailure::timed_out(250).to_string(),
            "Price lookup timed out after 250 ms"
        );
    }

    #[test]
    fn not_found_is_not_retryable() {
        assert!(!PriceLookupFailure::NotFound.is_retryable());
        assert!(PriceLookupFailure::timed_out(10).is_retryable());
        assert!(PriceLookupFailure::unavailable("x").is_retryable());
    }

    #[test]
    fn lookup_failure_codes() {
        assert_eq!(PriceLookupFailure::NotFound.code(), ErrorCode::ProductNotFound);
        assert_eq!(
            PriceLookupFailure::timed_out(10).code(),
            ErrorCode::PriceLookupFailed
        );
    }

    #[test]
    fn definition_error_displays_path() {
        let err = PaywallError::definition("paywall.yaml", "missing field `options`");
        assert_eq!(
            err.to_string(),
            "Could not load paywall definition 'paywall.yaml': missing field `options`"
        );
    }
}
