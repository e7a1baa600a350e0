//! # Value Objects
//!
//! Immutable domain primitives for the escrow ledger.
//! These types represent concepts defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ACCOUNT ID (32 bytes)
// =============================================================================

/// A 32-byte ledger identity.
///
/// All identity fields in persisted records are fixed-width `[u8; 32]`.
/// The ledger runtime authenticates callers; the core only compares these
/// values, it never verifies signatures.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The zero identity.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an identity from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an identity from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[28..])
        )
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<AccountId> for [u8; 32] {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

// =============================================================================
// RECORD ADDRESS (32 bytes)
// =============================================================================

/// A 32-byte deterministic record address.
///
/// Derived from seed tuples by [`crate::domain::services`]; derivation
/// collision is the system's sole duplicate-detection mechanism, so the
/// derivation must be cryptographic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RecordAddress(pub [u8; 32]);

impl RecordAddress {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an address from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[28..])
        )
    }
}

impl From<[u8; 32]> for RecordAddress {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// RECORD KIND (type discriminator)
// =============================================================================

/// Type discriminator stored as the first byte of every persisted record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum RecordKind {
    /// A recipient's price-configuration record.
    Profile = 0x01,
    /// A pending paid message with escrowed funds.
    Message = 0x02,
}

impl RecordKind {
    /// Returns the discriminator byte.
    #[must_use]
    pub const fn discriminator(self) -> u8 {
        self as u8
    }

    /// Parses a discriminator byte.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Profile),
            0x02 => Some(Self::Message),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
