//! Pricing adapters - implementations of the PriceLookup port.
//!
//! - `StaticPriceLookup` - In-memory price table for development and testing

mod static_price_lookup;

pub use static_price_lookup::StaticPriceLookup;
