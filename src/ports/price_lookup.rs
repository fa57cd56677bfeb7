//! Price lookup port.
//!
//! Defines the contract for fetching a product's price from the store.
//! Lookups for different products are independent and may complete in
//! any order; the caller stores each result on the paywall session.
//!
//! # Example
//!
//! ```ignore
//! use paywall_engine::ports::PriceLookup;
//!
//! async fn load_one(
//!     lookup: &dyn PriceLookup,
//!     session: &mut PaywallSession,
//!     product_id: &ProductId,
//! ) -> Result<PriceUpdate, PaywallError> {
//!     let result = lookup.lookup(product_id).await;
//!     session.apply_lookup(product_id, result)
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::ProductId;
use crate::domain::paywall::{PriceInfo, PriceLookupFailure};

/// Port for resolving product prices.
///
/// Implementations own their retry policy; a returned failure is final
/// for the paywall session that issued the lookup.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Fetches the current price of `product_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(PriceInfo)` - Price resolved
    /// - `Err(PriceLookupFailure)` - Product unknown or store unavailable
    async fn lookup(&self, product_id: &ProductId) -> Result<PriceInfo, PriceLookupFailure>;
}
