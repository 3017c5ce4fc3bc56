//! # gigvault-escrow — Escrow Engine
//!
//! Manages the full escrow lifecycle for marketplace jobs:
//!
//! - **Job** ([`job`]): the job record and its lifecycle state machine,
//!   from funded creation through acceptance, completion, and resolution.
//!
//! - **Dispute** ([`dispute`]): pure vote tallying with the strict-majority
//!   rule, the juror-eligibility seam, and deadlock detection for even
//!   panels.
//!
//! - **Transfer** ([`transfer`]): the [`ValueTransfer`] seam to the
//!   settlement ledger, plus an in-memory implementation for tests and
//!   local simulation.
//!
//! - **Board** ([`board`]): keyed job storage and the call surface the
//!   marketplace invokes.
//!
//! Exactly one value transfer occurs per job — the payout that resolves
//! it — and every payout is performed before the triggering mutation is
//! committed, so a failed transfer aborts the whole operation.

pub mod board;
pub mod dispute;
pub mod error;
pub mod job;
pub mod transfer;

// Re-export primary types.
pub use board::EscrowBoard;
pub use dispute::{DisputeTally, JurorLookup, Vote, VoteOutcome, JUROR_PANEL_SIZE};
pub use error::EscrowError;
pub use job::{Deposit, Job, JobId, JobStatus, TransitionRecord};
pub use transfer::{MemoryLedger, TransferError, ValueTransfer};
