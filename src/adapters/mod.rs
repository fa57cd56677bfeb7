//! Adapters - Implementations of ports and file-system integrations.
//!
//! - `definition` - Paywall definition file loading
//! - `pricing` - PriceLookup implementations

pub mod definition;
pub mod pricing;

pub use definition::load_paywall_definition;
pub use pricing::StaticPriceLookup;
