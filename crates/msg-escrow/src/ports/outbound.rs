//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the escrow core depends on. The ledger runtime implements
//! these; [`crate::adapters::InMemoryLedger`] is the in-process test double.
//!
//! The runtime carries all the atomicity obligations: each committed effect
//! is applied as one indivisible transaction, operations addressing the same
//! derived address are serialized, and a rejected commit leaves no
//! observable side effect.

use crate::domain::entities::Effect;
use crate::domain::value_objects::{AccountId, RecordAddress};
use crate::errors::StoreError;

// =============================================================================
// STATE VIEW (consistent read snapshot)
// =============================================================================

/// Read access to a consistent snapshot of ledger state.
///
/// Operations validate against one snapshot; the runtime guarantees the
/// snapshot does not shift under a single operation.
pub trait StateView: Send + Sync {
    /// Returns the raw record at `address`, if occupied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on infrastructure faults only; an unoccupied
    /// address is `Ok(None)`.
    fn get_record(&self, address: &RecordAddress) -> Result<Option<Vec<u8>>, StoreError>;

    /// Returns true if a record occupies `address`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on infrastructure faults.
    fn record_exists(&self, address: &RecordAddress) -> Result<bool, StoreError> {
        Ok(self.get_record(address)?.is_some())
    }

    /// Returns the available (non-escrowed) balance of an account.
    ///
    /// Accounts the ledger has never seen have balance zero.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on infrastructure faults.
    fn balance_of(&self, account: &AccountId) -> Result<u64, StoreError>;
}

// =============================================================================
// LEDGER COMMIT (atomic effect application)
// =============================================================================

/// Atomic application of a validated [`Effect`].
pub trait LedgerCommit: Send + Sync {
    /// Applies the effect as one indivisible unit: every write, delete, and
    /// the fund transfer together, or nothing at all.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InsufficientFunds`] if a debit cannot be
    /// covered, or another [`StoreError`] on infrastructure faults. On any
    /// error, no part of the effect is visible.
    fn commit(&self, effect: Effect) -> Result<(), StoreError>;
}

// =============================================================================
// TESTS
// =============================================================================
