//! # Monetary Amounts
//!
//! Escrow amounts in smallest currency units (micro-units). Amounts are
//! unsigned integers — the canonical representation on the settlement
//! ledger — and are non-zero by construction: an escrow over nothing is a
//! contradiction, so [`Amount::new`] rejects zero.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A strictly positive monetary amount in smallest currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    /// Create an amount, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroAmount`] if `units == 0`.
    pub fn new(units: u64) -> Result<Self, ValidationError> {
        if units == 0 {
            return Err(ValidationError::ZeroAmount);
        }
        Ok(Self(units))
    }

    /// The amount in smallest currency units.
    pub fn as_units(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rejected() {
        assert!(Amount::new(0).is_err());
    }

    #[test]
    fn positive_accepted() {
        let amount = Amount::new(100).unwrap();
        assert_eq!(amount.as_units(), 100);
    }

    #[test]
    fn max_accepted() {
        assert!(Amount::new(u64::MAX).is_ok());
    }

    #[test]
    fn display_is_unit_count() {
        let amount = Amount::new(2500).unwrap();
        assert_eq!(format!("{amount}"), "2500");
    }

    #[test]
    fn ordering_follows_units() {
        assert!(Amount::new(1).unwrap() < Amount::new(2).unwrap());
    }

    #[test]
    fn serialization_roundtrip() {
        let amount = Amount::new(123_456).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }
}
