//! # Validation Errors
//!
//! Construction-time validation failures for the domain primitive newtypes.
//! Each variant carries the invalid input and the expected format so that
//! callers can diagnose misuse without guesswork.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Account identifier fails basic format validation.
    #[error("invalid account id: \"{0}\" (expected 1-64 characters, no whitespace)")]
    InvalidAccountId(String),

    /// Escrow amounts must be strictly positive.
    #[error("amount must be greater than zero")]
    ZeroAmount,
}
