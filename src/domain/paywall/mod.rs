//! Paywall domain module.
//!
//! Purchase options, price resolution and discount comparisons.
//!
//! # Module Structure
//!
//! - `period` - PurchasePeriod billing cycles
//! - `price` - PriceInfo and FreeTrial resolved from the store
//! - `option` - PurchaseOption and its display settings
//! - `comparison` - ComparisonKind legality table and PriceComparison
//! - `engine` - Comparison derivation and discount computation
//! - `badge` - Placeholder substitution for badge texts
//! - `configuration` - Declarative PaywallConfiguration
//! - `session` - PaywallSession aggregate
//! - `actions` - User actions reported by a session

mod actions;
pub mod badge;
mod comparison;
mod configuration;
pub mod engine;
mod errors;
mod option;
mod period;
mod price;
mod session;

pub use actions::PaywallAction;
pub use comparison::{ComparisonKind, PriceComparison, LEGAL_COMPARISONS};
pub use configuration::{PaywallConfiguration, PaywallTexts};
pub use engine::{derive_comparisons, on_price_resolved, ComparisonsUpdated};
pub use errors::{ConfigurationError, PaywallError, PriceLookupFailure};
pub use option::{ComparisonSpec, OptionDetail, OptionFooter, PurchaseOption};
pub use period::PurchasePeriod;
pub use price::{FreeTrial, PriceInfo};
pub use session::{PaywallSession, PriceUpdate};
