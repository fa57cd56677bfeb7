//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PriceLookup` - Asynchronous store price resolution

mod price_lookup;

pub use price_lookup::PriceLookup;
