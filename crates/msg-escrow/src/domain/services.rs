//! # Domain Services
//!
//! Pure functions: deterministic record addressing and caller authorization.
//! No I/O, no async, no side effects.

use crate::domain::value_objects::{AccountId, RecordAddress};
use sha2::{Digest, Sha256};

// =============================================================================
// ADDRESS DERIVATION
// =============================================================================

/// Seed prefix for profile records.
pub const PROFILE_SEED: &[u8] = b"profile";

/// Seed prefix for message records.
pub const MESSAGE_SEED: &[u8] = b"message";

/// Derives the address of an owner's profile record.
///
/// Address = SHA-256("profile" ++ owner)
///
/// Identical inputs always yield the same address; distinct inputs collide
/// only with negligible probability. This derivation is the system's sole
/// duplicate-detection mechanism, so every create checks the derived address
/// is unoccupied before writing.
#[must_use]
pub fn profile_address(owner: &AccountId) -> RecordAddress {
    let mut hasher = Sha256::new();
    hasher.update(PROFILE_SEED);
    hasher.update(owner.as_bytes());
    RecordAddress::new(hasher.finalize().into())
}

/// Derives the address of a message record.
///
/// Address = SHA-256("message" ++ recipient ++ sender ++ nonce-as-LE-u64)
///
/// The nonce lets the same sender/recipient pair hold multiple pending
/// messages at once. A destroyed address is never reused unless the
/// derivation inputs change.
#[must_use]
pub fn message_address(recipient: &AccountId, sender: &AccountId, nonce: u64) -> RecordAddress {
    let mut hasher = Sha256::new();
    hasher.update(MESSAGE_SEED);
    hasher.update(recipient.as_bytes());
    hasher.update(sender.as_bytes());
    hasher.update(nonce.to_le_bytes());
    RecordAddress::new(hasher.finalize().into())
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

/// Outcome of an authorization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    /// Caller matches the record's authorized identity.
    Authorized,
    /// Caller does not match.
    Unauthorized,
}

impl AccessDecision {
    /// Returns true for [`AccessDecision::Authorized`].
    #[must_use]
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Pure authorization check: does the authenticated caller match the
/// record's authorized identity.
///
/// Invoked before any mutating effect in `update_price` and
/// `read_and_claim`. The ledger runtime has already authenticated the
/// caller; this is only an equality comparison.
#[must_use]
pub fn authorize(caller: &AccountId, authorized: &AccountId) -> AccessDecision {
    if caller == authorized {
        AccessDecision::Authorized
    } else {
        AccessDecision::Unauthorized
    }
}

// =============================================================================
// TESTS
// =============================================================================
