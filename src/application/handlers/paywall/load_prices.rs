//! LoadPricesHandler - Resolves prices for every unpriced option of a session.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Mutex;

use crate::domain::foundation::ProductId;
use crate::domain::paywall::{PaywallError, PaywallSession, PriceLookupFailure, PriceUpdate};
use crate::ports::PriceLookup;

/// Command to load the prices of a paywall session.
#[derive(Debug, Clone)]
pub struct LoadPricesCommand {
    pub session: Arc<Mutex<PaywallSession>>,
}

/// What happened to each lookup, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadPricesResult {
    /// Products whose price was stored.
    pub resolved: Vec<ProductId>,
    /// Products whose lookup failed; their comparisons stay uncomputed.
    pub failed: Vec<(ProductId, PriceLookupFailure)>,
    /// Products whose price the session refused to store.
    pub rejected: Vec<(ProductId, PaywallError)>,
    /// Positions in the session's comparison list completed by this load.
    pub computed_comparisons: Vec<usize>,
}

impl LoadPricesResult {
    /// Returns true if every issued lookup ended with a stored price.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.rejected.is_empty()
    }
}

/// Handler that fans out price lookups and applies results as they arrive.
///
/// Lookups run concurrently and complete in any order. The session lock
/// is taken only while a single result is applied, never across a lookup.
pub struct LoadPricesHandler {
    price_lookup: Arc<dyn PriceLookup>,
    lookup_timeout: Option<Duration>,
}

impl LoadPricesHandler {
    pub fn new(price_lookup: Arc<dyn PriceLookup>) -> Self {
        Self {
            price_lookup,
            lookup_timeout: None,
        }
    }

    /// Treat lookups slower than `timeout` as failed.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    pub async fn handle(&self, cmd: LoadPricesCommand) -> LoadPricesResult {
        // 1. Collect products still missing a price
        let (session_id, pending_products) = {
            let session = cmd.session.lock().await;
            let pending: Vec<ProductId> = session
                .options()
                .iter()
                .filter(|option| !option.is_priced())
                .map(|option| option.product_id.clone())
                .collect();
            (session.id(), pending)
        };

        tracing::info!(
            session_id = %session_id,
            lookups = pending_products.len(),
            "Loading paywall prices"
        );

        // 2. Issue every lookup at once
        let mut in_flight: FuturesUnordered<_> = pending_products
            .into_iter()
            .map(|product_id| {
                let lookup = Arc::clone(&self.price_lookup);
                let timeout = self.lookup_timeout;
                async move {
                    let result = match timeout {
                        Some(limit) => tokio::time::timeout(limit, lookup.lookup(&product_id))
                            .await
                            .unwrap_or_else(|_| Err(timed_out_after(limit))),
                        None => lookup.lookup(&product_id).await,
                    };
                    (product_id, result)
                }
            })
            .collect();

        // 3. Apply results in completion order
        let mut outcome = LoadPricesResult::default();
        while let Some((product_id, result)) = in_flight.next().await {
            let mut session = cmd.session.lock().await;
            match session.apply_lookup(&product_id, result) {
                Ok(PriceUpdate::Resolved { comparisons, .. }) => {
                    outcome.computed_comparisons.extend(comparisons.newly_computed);
                    outcome.resolved.push(product_id);
                }
                Ok(PriceUpdate::Failed { failure, .. }) => {
                    outcome.failed.push((product_id, failure));
                }
                Err(error) => {
                    tracing::warn!(
                        session_id = %session_id,
                        product_id = %product_id,
                        error = %error,
                        "Price update rejected"
                    );
                    outcome.rejected.push((product_id, error));
                }
            }
        }

        tracing::info!(
            session_id = %session_id,
            resolved = outcome.resolved.len(),
            failed = outcome.failed.len(),
            computed_comparisons = outcome.computed_comparisons.len(),
            "Paywall prices loaded"
        );

        outcome
    }
}

fn timed_out_after(limit: Duration) -> PriceLookupFailure {
    PriceLookupFailure::timed_out(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
}
