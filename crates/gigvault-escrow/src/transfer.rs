//! # Value Transfer Seam
//!
//! The escrow core never holds funds itself — it instructs a settlement
//! ledger to move value from the escrow holding account to the winning
//! party, atomically with the state transition that triggers the payout.
//! [`ValueTransfer`] is the only interface the core requires from that
//! collaborator.
//!
//! [`MemoryLedger`] is an in-process implementation used by tests and local
//! simulation. Production deployments supply an adapter over the real
//! settlement rail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gigvault_core::{AccountId, Amount};

/// Moves value between accounts on behalf of the escrow core.
///
/// Transfers are synchronous: the call returns only once the movement has
/// taken effect or failed. A failure must leave balances untouched so the
/// caller can abort its own mutation.
pub trait ValueTransfer {
    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] describing why the movement was refused;
    /// no partial movement may occur.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

/// Errors reported by the value-movement collaborator.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The source account does not hold enough value.
    #[error("account {account} holds {available}, cannot transfer {requested}")]
    InsufficientFunds {
        /// The source account.
        account: String,
        /// The requested transfer amount.
        requested: u64,
        /// The available balance.
        available: u64,
    },

    /// The source account is unknown to the ledger.
    #[error("unknown account {0}")]
    UnknownAccount(String),

    /// The ledger refused the transfer for an out-of-band reason.
    #[error("transfer rejected: {reason}")]
    Rejected {
        /// Why the ledger refused.
        reason: String,
    },
}

/// An in-memory balance ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: BTreeMap<AccountId, u64>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account, creating it if absent.
    pub fn credit(&mut self, account: &AccountId, amount: Amount) {
        *self.balances.entry(account.clone()).or_insert(0) += amount.as_units();
    }

    /// The balance of an account (zero if never seen).
    pub fn balance(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

impl ValueTransfer for MemoryLedger {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = *self
            .balances
            .get(from)
            .ok_or_else(|| TransferError::UnknownAccount(from.to_string()))?;
        let requested = amount.as_units();
        if requested > available {
            return Err(TransferError::InsufficientFunds {
                account: from.to_string(),
                requested,
                available,
            });
        }
        self.balances.insert(from.clone(), available - requested);
        *self.balances.entry(to.clone()).or_insert(0) += requested;
        Ok(())
    }
}
