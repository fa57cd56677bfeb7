//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod paywall;

pub use paywall::{LoadPricesCommand, LoadPricesHandler, LoadPricesResult};
