//! # Job Lifecycle
//!
//! The escrow job state machine: `Created → InProgress → Completed →
//! Resolved`, with the dispute branch `InProgress|Completed → Disputed →
//! Resolved`.
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! The status is a runtime-checked enum rather than a typestate parameter.
//! Jobs are stored in a keyed board and serialized, so the state is not
//! known at compile time, and the dispute branch joins two source states
//! into one target — a validated enum keeps each transition a single method
//! with the invalid cases rejected as [`EscrowError::InvalidState`].
//!
//! ## Transition Graph
//!
//! ```text
//! Created ──accept_job()──▶ InProgress ──complete_job()──▶ Completed
//!                               │                              │
//!                               │                    approve_completion()
//!                               │                              │  └─▶ pays freelancer
//!                        raise_dispute() ◀─────raise_dispute()─┤
//!                               │                              ▼
//!                               └─────────▶ Disputed        Resolved
//!                                              │
//!                                       vote_dispute() × n
//!                                              │  └─▶ pays majority side
//!                                              ▼
//!                                           Resolved
//! ```
//!
//! ## Security Invariant
//!
//! Every operation validates status and caller role before touching any
//! field, and the payout paths perform the value transfer before committing
//! their own mutations — a failed transfer leaves the job unchanged. Each
//! accepted transition is appended to the job's transition log. `Resolved`
//! is terminal and rejects every operation, which also bounds the job to at
//! most one payout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gigvault_core::{AccountId, Amount, Timestamp};

use crate::dispute::{DisputeTally, JurorLookup, Vote, VoteOutcome, JUROR_PANEL_SIZE};
use crate::error::EscrowError;
use crate::transfer::ValueTransfer;

// ── Identifiers ────────────────────────────────────────────────────────

/// A unique identifier for an escrow job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Create a new random job identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a job identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job:{}", self.0)
    }
}

// ── Job Status ─────────────────────────────────────────────────────────

/// The lifecycle status of an escrow job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job posted and funded; no freelancer yet.
    Created,
    /// A freelancer has accepted and is working.
    InProgress,
    /// The freelancer has marked the work done.
    Completed,
    /// A juror panel is voting on the outcome.
    Disputed,
    /// The escrow has been paid out. Terminal state.
    Resolved,
}

impl JobStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Disputed => "DISPUTED",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Whether this status is terminal (no further operations allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Valid target statuses from this status.
    pub fn valid_transitions(&self) -> &'static [JobStatus] {
        match self {
            Self::Created => &[Self::InProgress],
            Self::InProgress => &[Self::Completed, Self::Disputed],
            Self::Completed => &[Self::Resolved, Self::Disputed],
            Self::Disputed => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Deposit Witness ────────────────────────────────────────────────────

/// The payment accompanying a job creation.
///
/// The escrow core does not move the deposit itself — the funding rail
/// delivers it alongside the creation call, and the core verifies that it
/// matches the job amount and names the escrow holding account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// The deposited amount.
    pub amount: Amount,
    /// The account the deposit is payable to.
    pub payee: AccountId,
}

// ── Transition Record ──────────────────────────────────────────────────

/// A record of a single accepted status transition.
///
/// Every transition is logged with source and target statuses, the caller
/// that triggered it, and a timestamp, giving each job a complete audit
/// trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status before the transition.
    pub from_status: JobStatus,
    /// Status after the transition.
    pub to_status: JobStatus,
    /// The caller whose operation triggered the transition.
    pub actor: AccountId,
    /// When the transition occurred (UTC).
    pub timestamp: DateTime<Utc>,
}

// ── The Job ────────────────────────────────────────────────────────────

/// An escrow job between a client and a freelancer.
///
/// Created via [`Job::open`] with an accompanying deposit, then advanced
/// through the lifecycle by the operations below. The `deadline_at` field
/// is recorded at creation and surfaced by [`Job::is_past_deadline`], but
/// no transition enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// The client who posted and funded the job.
    pub client: AccountId,
    /// The freelancer who accepted the job, once one has.
    pub freelancer: Option<AccountId>,
    /// The escrowed amount, fixed at creation.
    pub amount: Amount,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// When the job was created (UTC).
    pub created_at: Timestamp,
    /// When the work is due. Recorded but enforced by no transition.
    pub deadline_at: Timestamp,
    /// The dispute tally, present iff the job has ever entered Disputed.
    pub dispute: Option<DisputeTally>,
    /// Complete transition history for audit purposes.
    pub transition_log: Vec<TransitionRecord>,
}

impl Job {
    /// Open a new escrow job, verifying the accompanying deposit.
    ///
    /// The caller becomes the client. The deposit must equal `amount` and
    /// be payable to the escrow holding account.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::DepositMismatch`] if the deposit amount or
    /// payee does not match.
    pub fn open(
        id: JobId,
        client: AccountId,
        amount: Amount,
        deadline_at: Timestamp,
        holding: &AccountId,
        deposit: &Deposit,
    ) -> Result<Self, EscrowError> {
        if deposit.amount != amount || &deposit.payee != holding {
            return Err(EscrowError::DepositMismatch {
                job_id: id.to_string(),
                expected: amount.as_units(),
                deposited: deposit.amount.as_units(),
                holding: holding.to_string(),
                payee: deposit.payee.to_string(),
            });
        }
        let created_at = Timestamp::now();
        Ok(Self {
            id,
            client: client.clone(),
            freelancer: None,
            amount,
            status: JobStatus::Created,
            created_at,
            deadline_at,
            dispute: None,
            transition_log: vec![TransitionRecord {
                from_status: JobStatus::Created,
                to_status: JobStatus::Created,
                actor: client,
                timestamp: Utc::now(),
            }],
        })
    }

    // ── Authorization predicates ───────────────────────────────────────

    /// Whether `caller` is the client.
    pub fn is_client(&self, caller: &AccountId) -> bool {
        &self.client == caller
    }

    /// Whether `caller` is the assigned freelancer.
    pub fn is_freelancer(&self, caller: &AccountId) -> bool {
        self.freelancer.as_ref() == Some(caller)
    }

    /// Whether `caller` is either party to the escrow.
    pub fn is_participant(&self, caller: &AccountId) -> bool {
        self.is_client(caller) || self.is_freelancer(caller)
    }

    /// Whether `now` is past the recorded deadline. Read-only; gates nothing.
    pub fn is_past_deadline(&self, now: &Timestamp) -> bool {
        now.as_datetime() > self.deadline_at.as_datetime()
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Accept the job as `caller`, who becomes the freelancer.
    ///
    /// Transitions Created → InProgress. The freelancer slot is filled at
    /// most once.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::AlreadyAccepted`] if a freelancer is already
    /// assigned (regardless of caller), or [`EscrowError::InvalidState`] if
    /// the job is not in Created status.
    pub fn accept(&mut self, caller: &AccountId) -> Result<(), EscrowError> {
        if let Some(freelancer) = &self.freelancer {
            return Err(EscrowError::AlreadyAccepted {
                job_id: self.id.to_string(),
                freelancer: freelancer.to_string(),
            });
        }
        self.require_status(JobStatus::Created, "accept_job")?;
        self.freelancer = Some(caller.clone());
        self.set_status(JobStatus::InProgress, caller);
        Ok(())
    }

    /// Mark the work done. Freelancer only.
    ///
    /// Transitions InProgress → Completed.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::InvalidState`] if not InProgress, or
    /// [`EscrowError::Permission`] if the caller is not the freelancer.
    pub fn complete(&mut self, caller: &AccountId) -> Result<(), EscrowError> {
        self.require_status(JobStatus::InProgress, "complete_job")?;
        if !self.is_freelancer(caller) {
            return Err(self.permission_denied("complete_job", caller));
        }
        self.set_status(JobStatus::Completed, caller);
        Ok(())
    }

    /// Approve the completed work and release the escrow. Client only.
    ///
    /// Pays `amount` to the freelancer through `ledger`, then transitions
    /// Completed → Resolved. A transfer failure aborts the whole operation
    /// with no state change.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::InvalidState`] if not Completed,
    /// [`EscrowError::Permission`] if the caller is not the client, or
    /// [`EscrowError::Transfer`] if the payout failed.
    pub fn approve_completion(
        &mut self,
        caller: &AccountId,
        holding: &AccountId,
        ledger: &mut dyn ValueTransfer,
    ) -> Result<(), EscrowError> {
        self.require_status(JobStatus::Completed, "approve_completion")?;
        if !self.is_client(caller) {
            return Err(self.permission_denied("approve_completion", caller));
        }
        let Some(payee) = self.freelancer.clone() else {
            // Completed without a freelancer is unreachable through the
            // public operations.
            return Err(self.invalid_state("approve_completion"));
        };
        ledger.transfer(holding, &payee, self.amount)?;
        self.set_status(JobStatus::Resolved, caller);
        Ok(())
    }

    /// Open a dispute over the job. Either party may raise it.
    ///
    /// Transitions InProgress or Completed → Disputed and empanels the
    /// fixed five-juror tally.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::InvalidState`] if the status is neither
    /// InProgress nor Completed, or [`EscrowError::Permission`] if the
    /// caller is not a party to the escrow.
    pub fn raise_dispute(&mut self, caller: &AccountId) -> Result<(), EscrowError> {
        if !matches!(self.status, JobStatus::InProgress | JobStatus::Completed) {
            return Err(self.invalid_state("raise_dispute"));
        }
        if !self.is_participant(caller) {
            return Err(self.permission_denied("raise_dispute", caller));
        }
        self.dispute = Some(DisputeTally::open(JUROR_PANEL_SIZE));
        self.set_status(JobStatus::Disputed, caller);
        Ok(())
    }

    /// Cast a juror vote on a disputed job.
    ///
    /// The caller must be juror-eligible per `jurors` and must not have
    /// voted on this dispute before. After the vote the majority rule is
    /// evaluated: once a side strictly exceeds half the panel, the escrow
    /// is paid to that side through `ledger` and the job transitions
    /// Disputed → Resolved. The payout happens before the vote is
    /// committed, so a transfer failure rolls the whole call back.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::InvalidState`] if not Disputed,
    /// [`EscrowError::Permission`] if the caller is not an eligible juror,
    /// [`EscrowError::AlreadyVoted`] on a repeat vote, or
    /// [`EscrowError::Transfer`] if a resolving payout failed.
    pub fn vote_dispute(
        &mut self,
        caller: &AccountId,
        vote: Vote,
        jurors: &dyn JurorLookup,
        holding: &AccountId,
        ledger: &mut dyn ValueTransfer,
    ) -> Result<VoteOutcome, EscrowError> {
        self.require_status(JobStatus::Disputed, "vote_dispute")?;
        if !jurors.is_juror_eligible(caller) {
            return Err(self.permission_denied("vote_dispute", caller));
        }
        let Some(tally) = self.dispute.as_ref() else {
            // Disputed without a tally is unreachable through the public
            // operations.
            return Err(self.invalid_state("vote_dispute"));
        };
        if tally.has_voted(caller) {
            return Err(EscrowError::AlreadyVoted {
                job_id: self.id.to_string(),
                juror: caller.to_string(),
            });
        }

        let outcome = tally.outcome_with(vote);
        match outcome {
            VoteOutcome::Freelancer => {
                let Some(payee) = self.freelancer.clone() else {
                    return Err(self.invalid_state("vote_dispute"));
                };
                ledger.transfer(holding, &payee, self.amount)?;
            }
            VoteOutcome::Client => {
                let payee = self.client.clone();
                ledger.transfer(holding, &payee, self.amount)?;
            }
            VoteOutcome::Pending => {}
        }

        if let Some(tally) = self.dispute.as_mut() {
            tally.record(caller.clone(), vote);
        }
        if outcome.is_decided() {
            self.set_status(JobStatus::Resolved, caller);
        }
        Ok(outcome)
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn require_status(&self, expected: JobStatus, operation: &str) -> Result<(), EscrowError> {
        if self.status != expected {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    fn invalid_state(&self, operation: &str) -> EscrowError {
        EscrowError::InvalidState {
            job_id: self.id.to_string(),
            operation: operation.to_string(),
            status: self.status.as_str().to_string(),
        }
    }

    fn permission_denied(&self, operation: &str, caller: &AccountId) -> EscrowError {
        EscrowError::Permission {
            job_id: self.id.to_string(),
            operation: operation.to_string(),
            caller: caller.to_string(),
        }
    }

    fn set_status(&mut self, to: JobStatus, actor: &AccountId) {
        self.transition_log.push(TransitionRecord {
            from_status: self.status,
            to_status: to,
            actor: actor.clone(),
            timestamp: Utc::now(),
        });
        self.status = to;
    }
}
