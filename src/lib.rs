//! Paywall Engine - Presentation model for configurable purchase paywalls
//!
//! This crate models the options a paywall offers, resolves their prices
//! asynchronously, and computes discount comparisons between billing periods
//! once both prices of a pair are known.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
