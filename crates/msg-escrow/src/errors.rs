//! # Error Types
//!
//! All error types for the escrow ledger core.

use crate::domain::value_objects::AccountId;
use thiserror::Error;

// =============================================================================
// ESCROW ERRORS
// =============================================================================

/// Errors reported by the escrow operations.
///
/// All of these are raised synchronously, before any record or fund mutation.
/// The core is fail-closed: a rejected operation leaves no observable effect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EscrowError {
    /// A record already occupies the derived address (duplicate registration
    /// or nonce reuse against a still-pending message).
    #[error("record already exists at derived address")]
    AlreadyExists,

    /// The addressed profile or message does not exist.
    #[error("record not found")]
    NotFound,

    /// Caller identity does not match the record's authorized identity.
    #[error("caller is not the authorized identity")]
    Unauthorized,

    /// Offered amount is below the recipient's configured price.
    #[error("amount below required price: offered {offered}, required {required}")]
    Underpriced {
        /// The recipient's configured minimum price.
        required: u64,
        /// The amount the sender offered.
        offered: u64,
    },

    /// Malformed input (e.g. oversized content).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Fault in the backing store or the ledger runtime.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl EscrowError {
    /// Returns true if the error is a validation rejection (the caller did
    /// something wrong) rather than an infrastructure fault.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the record store / ledger runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A lock protecting shared state was poisoned.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The account cannot cover the requested debit.
    #[error("insufficient funds for {account}: required {required}, available {available}")]
    InsufficientFunds {
        /// Account being debited.
        account: AccountId,
        /// Amount the effect requires.
        required: u64,
        /// Balance actually available.
        available: u64,
    },

    /// A persisted record failed to decode.
    #[error("record corrupted: {0}")]
    Corrupted(String),
}

// =============================================================================
// TESTS
// =============================================================================
