//! # Escrow Error Types
//!
//! Structured error hierarchy for the escrow subsystem. Every error variant
//! carries diagnostic context: the job, the operation that failed, and the
//! state or caller at the time of failure. All errors fail the triggering
//! operation atomically — a rejected operation never leaves a partial
//! mutation behind.

use thiserror::Error;

use crate::transfer::TransferError;

/// Errors arising from escrow operations.
#[derive(Error, Debug)]
pub enum EscrowError {
    /// Operation is not legal from the job's current status.
    #[error("job {job_id} cannot perform {operation} in status {status}")]
    InvalidState {
        /// The job identifier.
        job_id: String,
        /// The attempted operation (e.g., "accept_job").
        operation: String,
        /// The current job status.
        status: String,
    },

    /// Caller lacks the role required for this operation.
    #[error("caller {caller} is not authorized to perform {operation} on job {job_id}")]
    Permission {
        /// The job identifier.
        job_id: String,
        /// The attempted operation.
        operation: String,
        /// The unauthorized caller identity.
        caller: String,
    },

    /// The freelancer slot is already filled.
    #[error("job {job_id} has already been accepted by {freelancer}")]
    AlreadyAccepted {
        /// The job identifier.
        job_id: String,
        /// The freelancer who already accepted.
        freelancer: String,
    },

    /// The juror has already cast a vote on this dispute.
    #[error("juror {juror} has already voted on job {job_id}")]
    AlreadyVoted {
        /// The job identifier.
        job_id: String,
        /// The repeat voter.
        juror: String,
    },

    /// The accompanying deposit is absent, of the wrong amount, or payable
    /// to the wrong account.
    #[error(
        "deposit mismatch for job {job_id}: expected {expected} payable to {holding}, \
         got {deposited} payable to {payee}"
    )]
    DepositMismatch {
        /// The job identifier.
        job_id: String,
        /// The escrow amount the deposit must equal.
        expected: u64,
        /// The deposited amount.
        deposited: u64,
        /// The escrow holding account the deposit must name.
        holding: String,
        /// The account the deposit actually named.
        payee: String,
    },

    /// The external value-movement collaborator failed.
    #[error("value transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// No job exists under the given identifier.
    #[error("unknown job {0}")]
    UnknownJob(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_display() {
        let err = EscrowError::InvalidState {
            job_id: "job-001".to_string(),
            operation: "approve_completion".to_string(),
            status: "CREATED".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("job-001"));
        assert!(msg.contains("approve_completion"));
        assert!(msg.contains("CREATED"));
    }

    #[test]
    fn permission_display() {
        let err = EscrowError::Permission {
            job_id: "job-002".to_string(),
            operation: "complete_job".to_string(),
            caller: "mallory".to_string(),
        };
        assert!(format!("{err}").contains("mallory"));
    }

    #[test]
    fn already_accepted_display() {
        let err = EscrowError::AlreadyAccepted {
            job_id: "job-003".to_string(),
            freelancer: "bob".to_string(),
        };
        assert!(format!("{err}").contains("bob"));
    }

    #[test]
    fn already_voted_display() {
        let err = EscrowError::AlreadyVoted {
            job_id: "job-004".to_string(),
            juror: "carol".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("carol"));
        assert!(msg.contains("job-004"));
    }

    #[test]
    fn deposit_mismatch_display() {
        let err = EscrowError::DepositMismatch {
            job_id: "job-005".to_string(),
            expected: 100,
            deposited: 99,
            holding: "escrow".to_string(),
            payee: "mallory".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("100"));
        assert!(msg.contains("99"));
        assert!(msg.contains("escrow"));
    }

    #[test]
    fn transfer_error_converts() {
        let err: EscrowError = TransferError::Rejected {
            reason: "ledger offline".to_string(),
        }
        .into();
        assert!(format!("{err}").contains("ledger offline"));
    }
}
