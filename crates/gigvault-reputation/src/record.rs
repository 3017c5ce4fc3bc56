//! # Reputation Records
//!
//! Per-user reputation state and the score computation that gates juror
//! eligibility.
//!
//! ## Score Semantics
//!
//! The reputation score is `(positive − negative) * 100 / sbt_count` in
//! integer arithmetic, clamped to the `0..=100` range at both ends. A user
//! with no tokens has the neutral default score of 50. Division is floor
//! division on a non-negative numerator; a negative net rating clamps to 0
//! rather than reporting a negative score.
//!
//! ## Eligibility Invariant
//!
//! `juror_eligible ⇔ (sbt_count ≥ 10 ∧ score ≥ 70)`, re-evaluated after
//! every mutating ledger operation and stored on the record. Minting only
//! ever grants the flag; rating adjustments recompute it in both directions
//! and can revoke it.

use serde::{Deserialize, Serialize};

use gigvault_core::Timestamp;

use crate::error::ReputationError;

/// Neutral score reported for users with no reputation tokens.
pub const DEFAULT_SCORE: u64 = 50;

/// Upper bound of the reported score range.
pub const MAX_SCORE: u64 = 100;

/// Minimum token count required to serve as a dispute juror.
pub const JUROR_MIN_SBT_COUNT: u64 = 10;

/// Minimum reputation score required to serve as a dispute juror.
pub const JUROR_MIN_SCORE: u64 = 70;

// ── Rating ─────────────────────────────────────────────────────────────

/// A 1–5 star rating attached to a reputation token mint.
///
/// Ratings of 4 or 5 count as positive, 1 or 2 as negative, and 3 as
/// neutral (it affects neither counter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, validating the 1..=5 range.
    ///
    /// # Errors
    ///
    /// Returns [`ReputationError::InvalidRating`] for values outside 1..=5.
    pub fn new(stars: u8) -> Result<Self, ReputationError> {
        if !(1..=5).contains(&stars) {
            return Err(ReputationError::InvalidRating(stars));
        }
        Ok(Self(stars))
    }

    /// The raw star count.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Whether this rating increments the positive counter.
    pub fn is_positive(&self) -> bool {
        self.0 >= 4
    }

    /// Whether this rating increments the negative counter.
    pub fn is_negative(&self) -> bool {
        self.0 <= 2
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Rating Adjustments ─────────────────────────────────────────────────

/// A post-resolution rating adjustment applied by the platform.
///
/// Unlike a mint, an adjustment moves one of the rating counters without
/// issuing a token, so it can push a user's score in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingAdjustment {
    /// Increment the positive counter by one.
    Praise,
    /// Increment the negative counter by one.
    Demerit,
}

impl RatingAdjustment {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Praise => "praise",
            Self::Demerit => "demerit",
        }
    }
}

impl std::fmt::Display for RatingAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Merit Record ───────────────────────────────────────────────────────

/// Per-user reputation state.
///
/// Created lazily by the ledger on first mint. `sbt_count` is monotonically
/// non-decreasing and only ever incremented by mint; the rating counters
/// move on mints and adjustments. The `juror_eligible` flag is stored, not
/// derived on read, so reads observe exactly what the last mutation
/// computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeritRecord {
    /// Total reputation tokens earned.
    pub sbt_count: u64,
    /// Count of positive ratings received.
    pub positive: u64,
    /// Count of negative ratings received.
    pub negative: u64,
    /// When the most recent token was minted.
    pub last_earned_at: Option<Timestamp>,
    /// Whether this user may serve as a dispute juror.
    pub juror_eligible: bool,
}

impl MeritRecord {
    /// Compute the reputation score in the `0..=100` range.
    ///
    /// Users with no tokens score the neutral [`DEFAULT_SCORE`]. Otherwise
    /// the score is `(positive − negative) * 100 / sbt_count`, floor
    /// division, clamped to 0 when the net rating is negative and to
    /// [`MAX_SCORE`] when adjustments have pushed `positive` above
    /// `sbt_count`.
    pub fn score(&self) -> u64 {
        if self.sbt_count == 0 {
            return DEFAULT_SCORE;
        }
        let net = self.positive as i128 - self.negative as i128;
        if net <= 0 {
            return 0;
        }
        let raw = (net as u128 * 100) / self.sbt_count as u128;
        raw.min(MAX_SCORE as u128) as u64
    }

    /// Whether the record currently meets both juror thresholds.
    pub fn meets_juror_thresholds(&self) -> bool {
        self.sbt_count >= JUROR_MIN_SBT_COUNT && self.score() >= JUROR_MIN_SCORE
    }

    /// Grant eligibility if the thresholds are met. Never revokes.
    pub(crate) fn grant_eligibility_if_qualified(&mut self) {
        if self.meets_juror_thresholds() {
            self.juror_eligible = true;
        }
    }

    /// Recompute eligibility in both directions. Can revoke.
    pub(crate) fn recompute_eligibility(&mut self) {
        self.juror_eligible = self.meets_juror_thresholds();
    }
}
