//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `paywall` - Purchase options, price resolution and discount comparisons

pub mod foundation;
pub mod paywall;
