//! # Escrow Board
//!
//! Keyed storage of [`Job`]s plus the call surface the marketplace invokes.
//! One board exists per deployment; it knows the escrow holding account and
//! funnels every operation through the job state machine, so no job is ever
//! mutated outside its own operations. Accepted mutations emit structured
//! `tracing` events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gigvault_core::{AccountId, Amount, Timestamp};

use crate::dispute::{JurorLookup, Vote, VoteOutcome};
use crate::error::EscrowError;
use crate::job::{Deposit, Job, JobId};
use crate::transfer::ValueTransfer;

/// The escrow board: the holding account identity and every job keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowBoard {
    holding: AccountId,
    jobs: BTreeMap<JobId, Job>,
}

impl EscrowBoard {
    /// Create an empty board whose escrow funds live in `holding`.
    pub fn new(holding: AccountId) -> Self {
        Self {
            holding,
            jobs: BTreeMap::new(),
        }
    }

    /// The escrow holding account deposits must be payable to.
    pub fn holding(&self) -> &AccountId {
        &self.holding
    }

    /// Look up a job by id.
    pub fn job(&self, job_id: &JobId) -> Option<&Job> {
        self.jobs.get(job_id)
    }

    /// Number of jobs on the board.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Open a new escrow job. The caller becomes the client.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::DepositMismatch`] if the accompanying deposit
    /// does not equal `amount` or does not name the holding account.
    pub fn create_job(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        deadline_at: Timestamp,
        deposit: &Deposit,
    ) -> Result<JobId, EscrowError> {
        let job_id = JobId::new();
        let job = Job::open(
            job_id.clone(),
            caller.clone(),
            amount,
            deadline_at,
            &self.holding,
            deposit,
        )?;
        tracing::info!(job_id = %job_id, client = %caller, amount = %amount, "job created");
        self.jobs.insert(job_id.clone(), job);
        Ok(job_id)
    }

    /// Accept a job. The caller becomes the freelancer.
    pub fn accept_job(&mut self, caller: &AccountId, job_id: &JobId) -> Result<(), EscrowError> {
        self.job_mut(job_id)?.accept(caller)?;
        tracing::info!(job_id = %job_id, freelancer = %caller, "job accepted");
        Ok(())
    }

    /// Mark a job's work done. Freelancer only.
    pub fn complete_job(&mut self, caller: &AccountId, job_id: &JobId) -> Result<(), EscrowError> {
        self.job_mut(job_id)?.complete(caller)?;
        tracing::info!(job_id = %job_id, "job completed");
        Ok(())
    }

    /// Approve completed work and release the escrow to the freelancer.
    /// Client only.
    pub fn approve_completion(
        &mut self,
        caller: &AccountId,
        job_id: &JobId,
        ledger: &mut dyn ValueTransfer,
    ) -> Result<(), EscrowError> {
        let holding = self.holding.clone();
        let job = self.job_mut(job_id)?;
        job.approve_completion(caller, &holding, ledger)?;
        tracing::info!(job_id = %job_id, amount = %job.amount, "escrow released to freelancer");
        Ok(())
    }

    /// Open a dispute over a job. Either party may raise it.
    pub fn raise_dispute(&mut self, caller: &AccountId, job_id: &JobId) -> Result<(), EscrowError> {
        self.job_mut(job_id)?.raise_dispute(caller)?;
        tracing::info!(job_id = %job_id, raised_by = %caller, "dispute opened");
        Ok(())
    }

    /// Cast a juror vote on a disputed job; may resolve it and pay out.
    pub fn vote_dispute(
        &mut self,
        caller: &AccountId,
        job_id: &JobId,
        vote: Vote,
        jurors: &dyn JurorLookup,
        ledger: &mut dyn ValueTransfer,
    ) -> Result<VoteOutcome, EscrowError> {
        let holding = self.holding.clone();
        let job = self.job_mut(job_id)?;
        let outcome = job.vote_dispute(caller, vote, jurors, &holding, ledger)?;
        tracing::info!(
            job_id = %job_id,
            juror = %caller,
            vote = vote.as_str(),
            outcome = outcome.as_str(),
            "dispute vote recorded"
        );
        Ok(outcome)
    }

    fn job_mut(&mut self, job_id: &JobId) -> Result<&mut Job, EscrowError> {
        self.jobs
            .get_mut(job_id)
            .ok_or_else(|| EscrowError::UnknownJob(job_id.to_string()))
    }
}
