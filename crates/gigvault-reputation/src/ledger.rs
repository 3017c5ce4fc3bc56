//! # Reputation Ledger
//!
//! Keyed storage of [`MeritRecord`]s plus the platform-gated mutating
//! operations. One ledger instance exists per marketplace deployment; the
//! platform identity is fixed at construction and is the only caller
//! permitted to mint tokens or adjust ratings.
//!
//! ## Security Invariant
//!
//! Authorization is checked before any state is touched, and every mutating
//! operation leaves the record with a freshly evaluated `juror_eligible`
//! flag. Reads never recompute: [`ReputationLedger::is_juror_eligible`]
//! reports exactly what the last mutation stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gigvault_core::{AccountId, Timestamp};

use crate::error::ReputationError;
use crate::record::{MeritRecord, Rating, RatingAdjustment, DEFAULT_SCORE};

/// The reputation ledger: per-user records, the platform identity, and the
/// process-wide token supply counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationLedger {
    platform: AccountId,
    records: BTreeMap<AccountId, MeritRecord>,
    total_supply: u64,
}

impl ReputationLedger {
    /// Create an empty ledger with the given platform identity.
    pub fn new(platform: AccountId) -> Self {
        Self {
            platform,
            records: BTreeMap::new(),
            total_supply: 0,
        }
    }

    /// The platform identity authorized to mutate this ledger.
    pub fn platform(&self) -> &AccountId {
        &self.platform
    }

    /// Total reputation tokens minted across all users.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// The stored record for a user, if any has been created.
    pub fn record(&self, user: &AccountId) -> Option<&MeritRecord> {
        self.records.get(user)
    }

    /// Mint a reputation token for `recipient` with the given rating.
    ///
    /// Lazily initializes the record, increments `sbt_count`
    /// unconditionally, moves the matching rating counter (4–5 stars
    /// positive, 1–2 negative, 3 neither), stamps `last_earned_at`, bumps
    /// the total supply, and grants juror eligibility if the thresholds are
    /// now met. Minting never revokes an already-granted flag.
    ///
    /// # Errors
    ///
    /// Returns [`ReputationError::Permission`] if `caller` is not the
    /// platform identity.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        rating: Rating,
    ) -> Result<(), ReputationError> {
        self.require_platform(caller, "mint_sbt")?;

        let record = self.records.entry(recipient.clone()).or_default();
        record.sbt_count += 1;
        if rating.is_positive() {
            record.positive += 1;
        } else if rating.is_negative() {
            record.negative += 1;
        }
        record.last_earned_at = Some(Timestamp::now());
        record.grant_eligibility_if_qualified();
        let sbt_count = record.sbt_count;
        self.total_supply += 1;

        tracing::info!(
            recipient = %recipient,
            rating = rating.as_u8(),
            sbt_count,
            total_supply = self.total_supply,
            "reputation token minted"
        );
        Ok(())
    }

    /// Apply a post-resolution rating adjustment to `recipient`.
    ///
    /// Moves one rating counter without issuing a token, then recomputes
    /// juror eligibility in both directions — unlike mint, this can revoke
    /// the flag. An absent record is lazily initialized with zeroed
    /// counters.
    ///
    /// # Errors
    ///
    /// Returns [`ReputationError::Permission`] if `caller` is not the
    /// platform identity.
    pub fn adjust(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        adjustment: RatingAdjustment,
    ) -> Result<(), ReputationError> {
        self.require_platform(caller, "update_rating")?;

        let record = self.records.entry(recipient.clone()).or_default();
        match adjustment {
            RatingAdjustment::Praise => record.positive += 1,
            RatingAdjustment::Demerit => record.negative += 1,
        }
        record.recompute_eligibility();

        tracing::info!(
            recipient = %recipient,
            adjustment = adjustment.as_str(),
            juror_eligible = record.juror_eligible,
            "rating adjusted"
        );
        Ok(())
    }

    /// The reputation score for a user, in `0..=100`.
    ///
    /// Users with no record score the neutral default of 50, identical to a
    /// record that exists but holds no tokens.
    pub fn reputation_score(&self, user: &AccountId) -> u64 {
        self.records
            .get(user)
            .map_or(DEFAULT_SCORE, MeritRecord::score)
    }

    /// Whether a user may serve as a dispute juror.
    ///
    /// Returns the stored flag; absent records are never eligible.
    pub fn is_juror_eligible(&self, user: &AccountId) -> bool {
        self.records.get(user).is_some_and(|r| r.juror_eligible)
    }

    fn require_platform(
        &self,
        caller: &AccountId,
        operation: &str,
    ) -> Result<(), ReputationError> {
        if caller != &self.platform {
            return Err(ReputationError::Permission {
                operation: operation.to_string(),
                caller: caller.to_string(),
            });
        }
        Ok(())
    }
}
