//! Structured error types for the reputation subsystem.

use thiserror::Error;

/// Errors arising from reputation ledger operations.
#[derive(Error, Debug)]
pub enum ReputationError {
    /// Caller is not the platform identity authorized to mutate records.
    #[error("caller {caller} is not authorized to perform {operation}")]
    Permission {
        /// The attempted operation (e.g., "mint_sbt", "update_rating").
        operation: String,
        /// The unauthorized caller identity.
        caller: String,
    },

    /// Star rating outside the 1..=5 range.
    #[error("invalid rating {0} (expected 1..=5)")]
    InvalidRating(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_display() {
        let err = ReputationError::Permission {
            operation: "mint_sbt".to_string(),
            caller: "mallory".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("mallory"));
        assert!(msg.contains("mint_sbt"));
    }

    #[test]
    fn invalid_rating_display() {
        let err = ReputationError::InvalidRating(6);
        assert!(format!("{err}").contains('6'));
    }
}
