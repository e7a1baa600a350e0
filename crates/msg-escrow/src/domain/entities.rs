//! # Core Domain Entities
//!
//! The two persisted records (`Profile`, `Message`), the fixed binary layout
//! they are stored under, and the `Effect` values that operations produce.
//!
//! ## Record Layout Stability
//!
//! Persisted records use a hand-rolled, offset-stable binary codec rather
//! than a serde format. An external indexer discovers a sender's pending
//! messages by reading the 32 bytes at [`MESSAGE_SENDER_OFFSET`] of raw
//! message records; that offset MUST NOT change across versions
//! (`test_message_sender_offset_is_stable` pins it).

use crate::domain::value_objects::{AccountId, RecordAddress, RecordKind};
use crate::errors::StoreError;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Maximum content length for a message, in bytes.
pub const MAX_CONTENT_LEN: usize = 256;

/// Encoded length of a profile record.
///
/// discriminator (1) + owner (32) + price (8) + inbox_count (8)
/// + received_total (8) + created_at (8)
pub const PROFILE_RECORD_LEN: usize = 1 + 32 + 8 + 8 + 8 + 8;

/// Encoded length of a message record header, before content bytes.
///
/// discriminator (1) + sender (32) + recipient (32) + nonce (8) + amount (8)
/// + created_at (8) + content length prefix (4)
pub const MESSAGE_HEADER_LEN: usize = 1 + 32 + 32 + 8 + 8 + 8 + 4;

/// Byte offset of the sender identity within an encoded message record.
///
/// External-indexer contract: stable across versions.
pub const MESSAGE_SENDER_OFFSET: usize = 1;

/// Byte offset of the recipient identity within an encoded message record.
pub const MESSAGE_RECIPIENT_OFFSET: usize = 33;

// =============================================================================
// PROFILE
// =============================================================================

/// A recipient's price-configuration record.
///
/// One profile per owner, enforced solely by address-derivation collision.
/// Profiles are never deleted; they persist for the lifetime of the system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// The identity that owns this profile (the only one allowed to change
    /// the price).
    pub owner: AccountId,
    /// Minimum acceptable payment, in the smallest currency unit.
    pub price_min_units: u64,
    /// Number of messages ever sent to this recipient.
    pub inbox_count: u64,
    /// Running sum of amounts claimed by this recipient.
    pub received_total: u64,
    /// Unix timestamp of registration, from the transaction context.
    pub created_at: i64,
}

impl Profile {
    /// Creates a fresh profile at registration time.
    #[must_use]
    pub fn new(owner: AccountId, price_min_units: u64, created_at: i64) -> Self {
        Self {
            owner,
            price_min_units,
            inbox_count: 0,
            received_total: 0,
            created_at,
        }
    }

    /// Encodes the profile into its fixed binary layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(PROFILE_RECORD_LEN);
        buf.push(RecordKind::Profile.discriminator());
        buf.extend_from_slice(self.owner.as_bytes());
        buf.extend_from_slice(&self.price_min_units.to_le_bytes());
        buf.extend_from_slice(&self.inbox_count.to_le_bytes());
        buf.extend_from_slice(&self.received_total.to_le_bytes());
        buf.extend_from_slice(&self.created_at.to_le_bytes());
        buf
    }

    /// Decodes a profile record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] on wrong length or discriminator.
    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        if bytes.len() != PROFILE_RECORD_LEN {
            return Err(StoreError::Corrupted(format!(
                "profile record length {} != {PROFILE_RECORD_LEN}",
                bytes.len()
            )));
        }
        if bytes[0] != RecordKind::Profile.discriminator() {
            return Err(StoreError::Corrupted(format!(
                "profile discriminator 0x{:02X}",
                bytes[0]
            )));
        }
        let owner = AccountId::from_slice(&bytes[1..33])
            .ok_or_else(|| StoreError::Corrupted("profile owner field".into()))?;
        Ok(Self {
            owner,
            price_min_units: read_u64_le(bytes, 33),
            inbox_count: read_u64_le(bytes, 41),
            received_total: read_u64_le(bytes, 49),
            created_at: read_i64_le(bytes, 57),
        })
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// A pending paid message with escrowed funds.
///
/// Created by `send_message`, destroyed exactly once by `read_and_claim`,
/// the only operation allowed to move the escrowed amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Who paid and wrote the message.
    pub sender: AccountId,
    /// Who may claim it.
    pub recipient: AccountId,
    /// Sender-chosen value distinguishing messages between the same pair.
    pub nonce: u64,
    /// Escrowed amount, in the smallest currency unit.
    pub amount: u64,
    /// Message text, at most [`MAX_CONTENT_LEN`] bytes.
    pub content: String,
    /// Unix timestamp of creation, from the transaction context.
    pub created_at: i64,
}

impl Message {
    /// Encodes the message into its fixed binary layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let content = self.content.as_bytes();
        let mut buf = Vec::with_capacity(MESSAGE_HEADER_LEN + content.len());
        buf.push(RecordKind::Message.discriminator());
        buf.extend_from_slice(self.sender.as_bytes());
        buf.extend_from_slice(self.recipient.as_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
        buf.extend_from_slice(&self.amount.to_le_bytes());
        buf.extend_from_slice(&self.created_at.to_le_bytes());
        buf.extend_from_slice(&(content.len() as u32).to_le_bytes());
        buf.extend_from_slice(content);
        buf
    }

    /// Decodes a message record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] on wrong length, discriminator,
    /// length prefix, or non-UTF-8 content.
    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        if bytes.len() < MESSAGE_HEADER_LEN {
            return Err(StoreError::Corrupted(format!(
                "message record length {} < header {MESSAGE_HEADER_LEN}",
                bytes.len()
            )));
        }
        if bytes[0] != RecordKind::Message.discriminator() {
            return Err(StoreError::Corrupted(format!(
                "message discriminator 0x{:02X}",
                bytes[0]
            )));
        }
        let sender = AccountId::from_slice(&bytes[MESSAGE_SENDER_OFFSET..MESSAGE_SENDER_OFFSET + 32])
            .ok_or_else(|| StoreError::Corrupted("message sender field".into()))?;
        let recipient =
            AccountId::from_slice(&bytes[MESSAGE_RECIPIENT_OFFSET..MESSAGE_RECIPIENT_OFFSET + 32])
                .ok_or_else(|| StoreError::Corrupted("message recipient field".into()))?;
        let nonce = read_u64_le(bytes, 65);
        let amount = read_u64_le(bytes, 73);
        let created_at = read_i64_le(bytes, 81);
        let content_len = read_u32_le(bytes, 89) as usize;
        if bytes.len() != MESSAGE_HEADER_LEN + content_len {
            return Err(StoreError::Corrupted(format!(
                "message content length prefix {content_len} does not match record"
            )));
        }
        let content = std::str::from_utf8(&bytes[MESSAGE_HEADER_LEN..])
            .map_err(|_| StoreError::Corrupted("message content is not UTF-8".into()))?
            .to_owned();
        Ok(Self {
            sender,
            recipient,
            nonce,
            amount,
            content,
            created_at,
        })
    }
}

fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(raw)
}

fn read_i64_le(bytes: &[u8], offset: usize) -> i64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    i64::from_le_bytes(raw)
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(raw)
}

// =============================================================================
// TRANSACTION CONTEXT
// =============================================================================

/// Runtime-supplied context for one operation.
///
/// The ledger runtime has already authenticated `caller`; the core trusts it
/// without re-verification. The timestamp comes from the runtime clock so
/// domain logic stays deterministic.
#[derive(Clone, Copy, Debug)]
pub struct TxContext {
    /// Authenticated caller identity.
    pub caller: AccountId,
    /// Unix timestamp (seconds) of the enclosing transaction.
    pub unix_timestamp: i64,
}

impl TxContext {
    /// Creates a transaction context.
    #[must_use]
    pub fn new(caller: AccountId, unix_timestamp: i64) -> Self {
        Self {
            caller,
            unix_timestamp,
        }
    }
}

// =============================================================================
// EFFECTS
// =============================================================================

/// A fund movement between an account and the escrow pool.
///
/// At most one transfer per operation: `send_message` debits the sender into
/// escrow, `read_and_claim` credits the recipient out of escrow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FundTransfer {
    /// Debit an account into the escrow pool.
    EscrowDebit {
        /// Account being debited.
        from: AccountId,
        /// Amount in smallest currency units.
        amount: u64,
    },
    /// Credit an account out of the escrow pool.
    EscrowCredit {
        /// Account being credited.
        to: AccountId,
        /// Amount in smallest currency units.
        amount: u64,
    },
}

/// The complete, validated outcome of one operation.
///
/// Operations are pure: they read a consistent snapshot and describe exactly
/// the record mutations and fund transfer they imply. The ledger runtime
/// applies an `Effect` as one indivisible transaction; the record mutation
/// and the fund transfer of the same operation are never committed
/// separately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effect {
    /// Records to write (create or overwrite), encoded.
    pub writes: Vec<(RecordAddress, Vec<u8>)>,
    /// Records to destroy.
    pub deletes: Vec<RecordAddress>,
    /// The fund movement, if any.
    pub transfer: Option<FundTransfer>,
}

impl Effect {
    /// Returns true if the effect performs no mutation at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.deletes.is_empty() && self.transfer.is_none()
    }
}

// =============================================================================
// TESTS
// =============================================================================
