//! # In-Memory Ledger
//!
//! In-process implementation of the outbound ports for testing. A production
//! deployment replaces this with the real ledger runtime; this adapter keeps
//! the same contract: every commit is all-or-nothing, and a rejected commit
//! leaves no observable change.

use crate::domain::entities::{Effect, FundTransfer, Message, MESSAGE_SENDER_OFFSET};
use crate::domain::value_objects::{AccountId, RecordAddress, RecordKind};
use crate::errors::StoreError;
use crate::ports::outbound::{LedgerCommit, StateView};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct LedgerInner {
    /// Persisted records by derived address.
    records: HashMap<RecordAddress, Vec<u8>>,
    /// Available account balances.
    balances: HashMap<AccountId, u64>,
    /// Funds currently held in escrow across all pending messages.
    escrow_pool: u64,
}

/// In-memory records, balances, and escrow pool behind one lock, so a commit
/// mutates everything under a single write guard.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an account's available balance (test fixture hook).
    pub fn set_balance(&self, account: &AccountId, amount: u64) {
        self.inner
            .write()
            .expect("ledger lock poisoned")
            .balances
            .insert(*account, amount);
    }

    /// Returns the total funds currently held in escrow.
    #[must_use]
    pub fn escrowed_total(&self) -> u64 {
        self.inner.read().expect("ledger lock poisoned").escrow_pool
    }

    /// Scans raw records for the pending messages of one sender, filtering
    /// on the sender-identity bytes at their fixed offset. This mirrors how
    /// the external indexing collaborator discovers messages, which is why
    /// [`MESSAGE_SENDER_OFFSET`] must stay stable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lock is poisoned or a matching record
    /// fails to decode.
    pub fn pending_from(
        &self,
        sender: &AccountId,
    ) -> Result<Vec<(RecordAddress, Message)>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut found = Vec::new();
        for (address, bytes) in &inner.records {
            if bytes.first().copied() != Some(RecordKind::Message.discriminator()) {
                continue;
            }
            if bytes.len() < MESSAGE_SENDER_OFFSET + 32
                || &bytes[MESSAGE_SENDER_OFFSET..MESSAGE_SENDER_OFFSET + 32]
                    != sender.as_bytes()
            {
                continue;
            }
            found.push((*address, Message::decode(bytes)?));
        }
        Ok(found)
    }
}

impl StateView for InMemoryLedger {
    fn get_record(&self, address: &RecordAddress) -> Result<Option<Vec<u8>>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.records.get(address).cloned())
    }

    fn balance_of(&self, account: &AccountId) -> Result<u64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.balances.get(account).copied().unwrap_or(0))
    }
}

impl LedgerCommit for InMemoryLedger {
    fn commit(&self, effect: Effect) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        // Validate the entire effect before mutating anything.
        match &effect.transfer {
            Some(FundTransfer::EscrowDebit { from, amount }) => {
                let available = inner.balances.get(from).copied().unwrap_or(0);
                if available < *amount {
                    return Err(StoreError::InsufficientFunds {
                        account: *from,
                        required: *amount,
                        available,
                    });
                }
            }
            Some(FundTransfer::EscrowCredit { amount, .. }) => {
                if inner.escrow_pool < *amount {
                    return Err(StoreError::Corrupted(format!(
                        "escrow pool {} cannot cover credit {amount}",
                        inner.escrow_pool
                    )));
                }
            }
            None => {}
        }

        match effect.transfer {
            Some(FundTransfer::EscrowDebit { from, amount }) => {
                let balance = inner.balances.entry(from).or_insert(0);
                *balance -= amount;
                inner.escrow_pool += amount;
            }
            Some(FundTransfer::EscrowCredit { to, amount }) => {
                inner.escrow_pool -= amount;
                let balance = inner.balances.entry(to).or_insert(0);
                *balance = balance.saturating_add(amount);
            }
            None => {}
        }
        for (address, bytes) in effect.writes {
            inner.records.insert(address, bytes);
        }
        for address in &effect.deletes {
            inner.records.remove(address);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
