//! # Identity Newtypes
//!
//! Account identities for the Gigvault stack. An [`AccountId`] names a
//! marketplace participant: a client, a freelancer, a juror, the platform
//! operator, or an escrow holding account. The core never inspects what the
//! identity *is* (a ledger address, a DID, a database key) — it only
//! compares identities for equality and uses them as map keys.
//!
//! ## Validation
//!
//! Account identifiers are validated at construction time: non-empty, at
//! most 64 characters, no whitespace. Beyond that the format is opaque to
//! the core; authentication of the caller is the collaborator's concern.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of an account identifier in characters.
const MAX_ACCOUNT_ID_LEN: usize = 64;

/// An opaque, validated account identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAccountId`] if the string is empty,
    /// longer than 64 characters, or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty()
            || id.chars().count() > MAX_ACCOUNT_ID_LEN
            || id.chars().any(char::is_whitespace)
        {
            return Err(ValidationError::InvalidAccountId(id));
        }
        Ok(Self(id))
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_account_ids() {
        assert!(AccountId::new("alice").is_ok());
        assert!(AccountId::new("ESCROW-HOLDING-7").is_ok());
        assert!(AccountId::new("a").is_ok());
        assert!(AccountId::new("x".repeat(64)).is_ok());
    }

    #[test]
    fn empty_rejected() {
        assert!(AccountId::new("").is_err());
    }

    #[test]
    fn whitespace_rejected() {
        assert!(AccountId::new("has space").is_err());
        assert!(AccountId::new("tab\there").is_err());
        assert!(AccountId::new("newline\n").is_err());
    }

    #[test]
    fn overlong_rejected() {
        assert!(AccountId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn display_is_raw_string() {
        let id = AccountId::new("bob").unwrap();
        assert_eq!(format!("{id}"), "bob");
        assert_eq!(id.as_str(), "bob");
    }

    #[test]
    fn ordering_supports_map_keys() {
        let a = AccountId::new("a").unwrap();
        let b = AccountId::new("b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serialization_roundtrip() {
        let id = AccountId::new("carol").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
