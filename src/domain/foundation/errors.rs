//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Configuration errors
    InvalidConfiguration,
    IllegalComparison,

    // Not found errors
    ProductNotFound,
    OptionNotFound,

    // State errors
    PriceAlreadyResolved,
    NothingSelected,
    PriceNotLoaded,

    // Infrastructure errors
    PriceLookupFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidConfiguration => "INVALID_CONFIGURATION",
            ErrorCode::IllegalComparison => "ILLEGAL_COMPARISON",
            ErrorCode::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorCode::OptionNotFound => "OPTION_NOT_FOUND",
            ErrorCode::PriceAlreadyResolved => "PRICE_ALREADY_RESOLVED",
            ErrorCode::NothingSelected => "NOTHING_SELECTED",
            ErrorCode::PriceNotLoaded => "PRICE_NOT_LOADED",
            ErrorCode::PriceLookupFailed => "PRICE_LOOKUP_FAILED",
        };
        write!(f, "{}", s)
    }
}
