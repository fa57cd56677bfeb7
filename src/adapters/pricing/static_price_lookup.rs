//! Static implementation of PriceLookup for development and testing.
//!
//! Prices come from an in-memory table, optionally loaded from a YAML
//! price table. Each product can be given an artificial delay so tests
//! and the preview binary can exercise out-of-order completion.
//!
//! # Usage
//!
//! ```ignore
//! use paywall_engine::adapters::pricing::StaticPriceLookup;
//!
//! let lookup = StaticPriceLookup::new()
//!     .with_price(monthly_id, monthly_price)
//!     .with_delay(yearly_id.clone(), Duration::from_millis(50))
//!     .with_price(yearly_id, yearly_price);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::ProductId;
use crate::domain::paywall::{PaywallError, PriceInfo, PriceLookupFailure};
use crate::ports::PriceLookup;

/// PriceLookup backed by a fixed table.
///
/// Products missing from the table resolve to `PriceLookupFailure::NotFound`.
#[derive(Debug, Default)]
pub struct StaticPriceLookup {
    results: HashMap<ProductId, Result<PriceInfo, PriceLookupFailure>>,
    delays: HashMap<ProductId, Duration>,
    lookups: AtomicUsize,
}

/// One row of a YAML price table.
#[derive(Debug, Deserialize)]
struct PriceTableEntry {
    product_id: ProductId,
    #[serde(default)]
    price: Option<PriceInfo>,
    #[serde(default)]
    failure: Option<String>,
    #[serde(default)]
    delay_ms: u64,
}

#[derive(Debug, Deserialize)]
struct PriceTable {
    prices: Vec<PriceTableEntry>,
}

impl StaticPriceLookup {
    /// Create an empty table; every lookup fails with `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `product_id` to `price`.
    pub fn with_price(mut self, product_id: ProductId, price: PriceInfo) -> Self {
        self.results.insert(product_id, Ok(price));
        self
    }

    /// Fail lookups of `product_id` with `failure`.
    pub fn with_failure(mut self, product_id: ProductId, failure: PriceLookupFailure) -> Self {
        self.results.insert(product_id, Err(failure));
        self
    }

    /// Wait `delay` before answering lookups of `product_id`.
    pub fn with_delay(mut self, product_id: ProductId, delay: Duration) -> Self {
        self.delays.insert(product_id, delay);
        self
    }

    /// Parse a YAML price table.
    ///
    /// Rows carry either a `price` or a `failure` message; rows with
    /// neither are treated as unknown products.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        let table: PriceTable = serde_yaml::from_str(source)?;
        let mut lookup = Self::new();
        for entry in table.prices {
            if entry.delay_ms > 0 {
                lookup = lookup.with_delay(
                    entry.product_id.clone(),
                    Duration::from_millis(entry.delay_ms),
                );
            }
            lookup = match (entry.price, entry.failure) {
                (Some(price), _) => lookup.with_price(entry.product_id, price),
                (None, Some(message)) => lookup.with_failure(
                    entry.product_id,
                    PriceLookupFailure::unavailable(message),
                ),
                (None, None) => lookup,
            };
        }
        Ok(lookup)
    }

    /// Load a YAML price table from disk.
    ///
    /// # Errors
    ///
    /// `PaywallError::Definition` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaywallError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path)
            .map_err(|e| PaywallError::definition(&display, e.to_string()))?;
        Self::from_yaml(&source).map_err(|e| PaywallError::definition(&display, e.to_string()))
    }

    /// Number of lookups answered so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceLookup for StaticPriceLookup {
    async fn lookup(&self, product_id: &ProductId) -> Result<PriceInfo, PriceLookupFailure> {
        if let Some(delay) = self.delays.get(product_id) {
            tokio::time::sleep(*delay).await;
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);

        self.results
            .get(product_id)
            .cloned()
            .unwrap_or(Err(PriceLookupFailure::NotFound))
    }
}
