//! Price loading configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for a single price lookup.
const MAX_LOOKUP_TIMEOUT_MS: u64 = 120_000;

/// Price loading configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Per-lookup timeout in milliseconds (0 disables the timeout)
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Path of the paywall definition (YAML or JSON)
    pub paywall_definition: Option<String>,

    /// Path of the YAML price table used by the static lookup
    pub price_table: Option<String>,
}

fn default_lookup_timeout_ms() -> u64 {
    10_000
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: default_lookup_timeout_ms(),
            paywall_definition: None,
            price_table: None,
        }
    }
}

impl PricingConfig {
    /// Lookup timeout, or `None` when disabled
    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_ms > 0).then(|| Duration::from_millis(self.lookup_timeout_ms))
    }

    /// Validate pricing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lookup_timeout_ms > MAX_LOOKUP_TIMEOUT_MS {
            return Err(ValidationError::LookupTimeoutTooLarge {
                max_ms: MAX_LOOKUP_TIMEOUT_MS,
                actual_ms: self.lookup_timeout_ms,
            });
        }
        Ok(())
    }
}
