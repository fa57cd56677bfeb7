//! Paywall definition adapters - reading configurations from files.

mod file_loader;

pub use file_loader::load_paywall_definition;
