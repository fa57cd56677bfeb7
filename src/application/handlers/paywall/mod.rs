//! Paywall handlers.
//!
//! ## Commands
//! - Loading prices for a paywall session

mod load_prices;

pub use load_prices::{LoadPricesCommand, LoadPricesHandler, LoadPricesResult};
