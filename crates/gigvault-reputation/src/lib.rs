//! # gigvault-reputation — Reputation Ledger
//!
//! Soulbound reputation token (SBT) accounting for the Gigvault marketplace:
//!
//! - **Record** ([`record`]): per-user reputation counters, the 1–5 star
//!   [`Rating`](record::Rating) scale, and the integer score computation
//!   that gates juror eligibility.
//!
//! - **Ledger** ([`ledger`]): the platform-gated mint/adjust operations,
//!   keyed record storage, and the process-wide token supply counter.
//!
//! Reputation tokens are non-transferable credentials: they are minted by
//! the platform when a job resolves and only ever accumulate. The stored
//! score feeds the dispute-arbitration juror panel in `gigvault-escrow`.

pub mod ledger;
pub mod record;

mod error;

pub use error::ReputationError;
pub use ledger::ReputationLedger;
pub use record::{MeritRecord, Rating, RatingAdjustment};
