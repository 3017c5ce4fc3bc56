//! # Dispute Vote Tallying
//!
//! Pure tallying and majority-threshold logic for disputed jobs. The state
//! machine in [`job`](crate::job) owns the lifecycle; this module only
//! counts votes and decides outcomes, so the arithmetic can be tested in
//! isolation.
//!
//! ## Majority Rule
//!
//! A side wins once its vote count strictly exceeds `juror_count / 2`
//! (integer floor division). For the fixed panel of [`JUROR_PANEL_SIZE`]
//! (5 jurors) the majority is reached at 3 votes on one side. Exactly one
//! side can cross the threshold on any single vote, because each vote
//! increments exactly one counter.
//!
//! ## Boundary Condition: Even Panels
//!
//! For an even `juror_count` an exact half/half split satisfies neither
//! strict inequality and no further votes remain — the tally is stuck in
//! [`VoteOutcome::Pending`] forever. No tie-break is applied;
//! [`DisputeTally::is_deadlocked`] makes the stall observable to callers.
//! The shipped panel size is odd, so the stall is unreachable unless a
//! caller opens a tally with a custom even panel.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use gigvault_core::AccountId;
use gigvault_reputation::ReputationLedger;

/// Number of jurors empaneled for every dispute.
pub const JUROR_PANEL_SIZE: u32 = 5;

// ── Votes and Outcomes ─────────────────────────────────────────────────

/// A single juror's vote on a disputed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vote {
    /// The freelancer should be paid.
    ForFreelancer,
    /// The client should be refunded.
    ForClient,
}

impl Vote {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForFreelancer => "for_freelancer",
            Self::ForClient => "for_client",
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of a tally evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOutcome {
    /// Majority for the freelancer — pay the escrow out to them.
    Freelancer,
    /// Majority for the client — refund the escrow to them.
    Client,
    /// No majority yet.
    Pending,
}

impl VoteOutcome {
    /// Whether this outcome resolves the dispute.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freelancer => "freelancer",
            Self::Client => "client",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Juror Eligibility Seam ─────────────────────────────────────────────

/// Answers whether an identity may serve as a dispute juror.
///
/// The production implementation is [`ReputationLedger`], which gates on
/// accumulated reputation tokens and score. Tests may use a plain
/// `BTreeSet<AccountId>` as a fixed roster.
pub trait JurorLookup {
    /// Whether `account` may cast dispute votes.
    fn is_juror_eligible(&self, account: &AccountId) -> bool;
}

impl JurorLookup for ReputationLedger {
    fn is_juror_eligible(&self, account: &AccountId) -> bool {
        ReputationLedger::is_juror_eligible(self, account)
    }
}

/// Fixed-roster lookup: membership is eligibility.
impl JurorLookup for BTreeSet<AccountId> {
    fn is_juror_eligible(&self, account: &AccountId) -> bool {
        self.contains(account)
    }
}

// ── The Tally ──────────────────────────────────────────────────────────

/// Vote counts for a disputed job, plus the identities that have voted.
///
/// The tally is pure bookkeeping: it counts, previews, and decides, but
/// performs no authorization and moves no value. The job state machine is
/// responsible for checking juror eligibility and prior votes before
/// committing a vote here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeTally {
    votes_for: u32,
    votes_against: u32,
    juror_count: u32,
    voted: BTreeSet<AccountId>,
}

impl DisputeTally {
    /// Open a fresh tally for a panel of `juror_count` jurors.
    pub fn open(juror_count: u32) -> Self {
        Self {
            votes_for: 0,
            votes_against: 0,
            juror_count,
            voted: BTreeSet::new(),
        }
    }

    /// Votes cast for the freelancer.
    pub fn votes_for(&self) -> u32 {
        self.votes_for
    }

    /// Votes cast for the client.
    pub fn votes_against(&self) -> u32 {
        self.votes_against
    }

    /// Size of the juror panel.
    pub fn juror_count(&self) -> u32 {
        self.juror_count
    }

    /// Total votes cast so far.
    pub fn votes_cast(&self) -> u32 {
        self.votes_for + self.votes_against
    }

    /// The count a side must strictly exceed to win.
    pub fn majority_threshold(&self) -> u32 {
        self.juror_count / 2
    }

    /// Whether `juror` has already cast a vote on this tally.
    pub fn has_voted(&self, juror: &AccountId) -> bool {
        self.voted.contains(juror)
    }

    /// The outcome under the current counts.
    pub fn outcome(&self) -> VoteOutcome {
        Self::decide(self.votes_for, self.votes_against, self.juror_count)
    }

    /// The outcome that committing `vote` would produce, without mutating.
    ///
    /// The caller uses this to perform the payout before committing the
    /// vote, so a failed transfer leaves the tally untouched.
    pub fn outcome_with(&self, vote: Vote) -> VoteOutcome {
        let (votes_for, votes_against) = match vote {
            Vote::ForFreelancer => (self.votes_for + 1, self.votes_against),
            Vote::ForClient => (self.votes_for, self.votes_against + 1),
        };
        Self::decide(votes_for, votes_against, self.juror_count)
    }

    /// Commit `juror`'s vote and return the resulting outcome.
    pub fn record(&mut self, juror: AccountId, vote: Vote) -> VoteOutcome {
        match vote {
            Vote::ForFreelancer => self.votes_for += 1,
            Vote::ForClient => self.votes_against += 1,
        }
        self.voted.insert(juror);
        self.outcome()
    }

    /// Whether the panel is exhausted without a majority.
    ///
    /// Only reachable with an even panel split exactly in half; see the
    /// module documentation.
    pub fn is_deadlocked(&self) -> bool {
        self.votes_cast() >= self.juror_count && !self.outcome().is_decided()
    }

    fn decide(votes_for: u32, votes_against: u32, juror_count: u32) -> VoteOutcome {
        let threshold = juror_count / 2;
        if votes_for > threshold {
            VoteOutcome::Freelancer
        } else if votes_against > threshold {
            VoteOutcome::Client
        } else {
            VoteOutcome::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn juror(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    #[test]
    fn fresh_tally_is_pending() {
        let tally = DisputeTally::open(JUROR_PANEL_SIZE);
        assert_eq!(tally.outcome(), VoteOutcome::Pending);
        assert_eq!(tally.votes_cast(), 0);
        assert_eq!(tally.majority_threshold(), 2);
    }

    #[test]
    fn three_of_five_for_freelancer_wins() {
        let mut tally = DisputeTally::open(5);
        assert_eq!(
            tally.record(juror("j1"), Vote::ForFreelancer),
            VoteOutcome::Pending
        );
        assert_eq!(
            tally.record(juror("j2"), Vote::ForFreelancer),
            VoteOutcome::Pending
        );
        assert_eq!(
            tally.record(juror("j3"), Vote::ForFreelancer),
            VoteOutcome::Freelancer
        );
    }

    #[test]
    fn three_of_five_for_client_wins() {
        let mut tally = DisputeTally::open(5);
        tally.record(juror("j1"), Vote::ForClient);
        tally.record(juror("j2"), Vote::ForClient);
        assert_eq!(
            tally.record(juror("j3"), Vote::ForClient),
            VoteOutcome::Client
        );
    }

    #[test]
    fn mixed_votes_stay_pending_until_majority() {
        let mut tally = DisputeTally::open(5);
        tally.record(juror("j1"), Vote::ForClient);
        tally.record(juror("j2"), Vote::ForFreelancer);
        tally.record(juror("j3"), Vote::ForClient);
        tally.record(juror("j4"), Vote::ForFreelancer);
        assert_eq!(tally.outcome(), VoteOutcome::Pending);
        assert_eq!(
            tally.record(juror("j5"), Vote::ForClient),
            VoteOutcome::Client
        );
    }

    #[test]
    fn outcome_with_does_not_mutate() {
        let mut tally = DisputeTally::open(5);
        tally.record(juror("j1"), Vote::ForFreelancer);
        tally.record(juror("j2"), Vote::ForFreelancer);

        assert_eq!(tally.outcome_with(Vote::ForFreelancer), VoteOutcome::Freelancer);
        // The preview committed nothing.
        assert_eq!(tally.votes_for(), 2);
        assert_eq!(tally.outcome(), VoteOutcome::Pending);
    }

    #[test]
    fn has_voted_tracks_identities() {
        let mut tally = DisputeTally::open(5);
        assert!(!tally.has_voted(&juror("j1")));
        tally.record(juror("j1"), Vote::ForClient);
        assert!(tally.has_voted(&juror("j1")));
        assert!(!tally.has_voted(&juror("j2")));
    }

    #[test]
    fn even_panel_split_deadlocks() {
        let mut tally = DisputeTally::open(4);
        assert_eq!(tally.majority_threshold(), 2);
        tally.record(juror("j1"), Vote::ForFreelancer);
        tally.record(juror("j2"), Vote::ForClient);
        tally.record(juror("j3"), Vote::ForFreelancer);
        assert!(!tally.is_deadlocked());
        tally.record(juror("j4"), Vote::ForClient);

        // 2/2 on a 4-panel: neither side strictly exceeds 2.
        assert_eq!(tally.outcome(), VoteOutcome::Pending);
        assert!(tally.is_deadlocked());
    }

    #[test]
    fn even_panel_can_still_resolve() {
        let mut tally = DisputeTally::open(4);
        tally.record(juror("j1"), Vote::ForFreelancer);
        tally.record(juror("j2"), Vote::ForFreelancer);
        assert_eq!(
            tally.record(juror("j3"), Vote::ForFreelancer),
            VoteOutcome::Freelancer
        );
    }

    #[test]
    fn odd_panel_never_deadlocks_at_capacity() {
        // 3/2 split on a 5-panel resolves on the final vote.
        let mut tally = DisputeTally::open(5);
        tally.record(juror("j1"), Vote::ForFreelancer);
        tally.record(juror("j2"), Vote::ForClient);
        tally.record(juror("j3"), Vote::ForFreelancer);
        tally.record(juror("j4"), Vote::ForClient);
        let outcome = tally.record(juror("j5"), Vote::ForFreelancer);
        assert_eq!(outcome, VoteOutcome::Freelancer);
        assert!(!tally.is_deadlocked());
    }

    #[test]
    fn roster_lookup_is_membership() {
        let mut roster = BTreeSet::new();
        roster.insert(juror("carol"));
        assert!(roster.is_juror_eligible(&juror("carol")));
        assert!(!roster.is_juror_eligible(&juror("mallory")));
    }

    #[test]
    fn tally_serialization_roundtrip() {
        let mut tally = DisputeTally::open(5);
        tally.record(juror("j1"), Vote::ForClient);
        let json = serde_json::to_string(&tally).unwrap();
        let back: DisputeTally = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tally);
    }

    proptest! {
        /// Votes are evaluated after each increment and stop once a side
        /// wins, so at no observable point can both sides strictly exceed
        /// the floor-division threshold — that would mean two payouts for
        /// one escrow.
        #[test]
        fn at_most_one_side_wins(
            juror_count in 1u32..64,
            votes in proptest::collection::vec(proptest::bool::ANY, 0..64),
        ) {
            let mut tally = DisputeTally::open(juror_count);
            for (i, for_freelancer) in votes.into_iter().enumerate() {
                if tally.outcome().is_decided() {
                    break;
                }
                let vote = if for_freelancer { Vote::ForFreelancer } else { Vote::ForClient };
                tally.record(AccountId::new(format!("j{i}")).unwrap(), vote);
                let threshold = tally.majority_threshold();
                prop_assert!(
                    !(tally.votes_for() > threshold && tally.votes_against() > threshold)
                );
            }
        }
    }
}
