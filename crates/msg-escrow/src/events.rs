//! # Entry-Point Payloads
//!
//! Serialized request/response shapes for the five entry points. These are
//! what a transport or gateway in front of the service exchanges; the caller
//! identity is NEVER part of a payload - it comes from the authenticated
//! transaction context supplied by the ledger runtime.

use crate::domain::value_objects::{AccountId, RecordAddress};
use crate::errors::EscrowError;
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUESTS
// =============================================================================

/// Bootstrap request. Carries nothing; the operation is a retained no-op.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InitializeRequestPayload {}

/// Request to register the caller's price-configuration profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterProfileRequestPayload {
    /// Minimum acceptable payment, smallest currency unit.
    pub price_min_units: u64,
}

/// Request to update a profile's minimum price.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdatePriceRequestPayload {
    /// Profile owner (must equal the authenticated caller).
    pub owner: AccountId,
    /// New minimum price.
    pub new_price: u64,
}

/// Request to send a paid message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendMessageRequestPayload {
    /// Recipient identity.
    pub recipient: AccountId,
    /// Sender-chosen nonce; retries must use a fresh one.
    pub nonce: u64,
    /// Amount to escrow.
    pub amount: u64,
    /// Message text.
    pub content: String,
}

/// Request to read a message and claim its escrowed funds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadAndClaimRequestPayload {
    /// Derived address of the message record.
    pub message_id: RecordAddress,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Response to profile registration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterProfileResponsePayload {
    /// Whether the registration was accepted.
    pub success: bool,
    /// Derived profile address on success.
    pub profile_address: Option<RecordAddress>,
    /// Rejection reason on failure.
    pub error: Option<String>,
}

impl RegisterProfileResponsePayload {
    /// Accepted registration.
    #[must_use]
    pub fn accepted(profile_address: RecordAddress) -> Self {
        Self {
            success: true,
            profile_address: Some(profile_address),
            error: None,
        }
    }

    /// Rejected registration.
    #[must_use]
    pub fn rejected(err: &EscrowError) -> Self {
        Self {
            success: false,
            profile_address: None,
            error: Some(err.to_string()),
        }
    }
}

/// Response to a price update or query.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceResponsePayload {
    /// Whether the operation was accepted.
    pub success: bool,
    /// The profile's (new) minimum price on success.
    pub price_min_units: Option<u64>,
    /// Rejection reason on failure.
    pub error: Option<String>,
}

/// Response to a paid send.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendMessageResponsePayload {
    /// Whether the send was accepted and escrowed.
    pub success: bool,
    /// Derived message address on success.
    pub message_id: Option<RecordAddress>,
    /// Rejection reason on failure.
    pub error: Option<String>,
}

/// Response to a read-and-claim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadAndClaimResponsePayload {
    /// Whether the claim succeeded.
    pub success: bool,
    /// Message content, returned only together with the payout.
    pub content: Option<String>,
    /// Amount credited to the recipient.
    pub amount_claimed: Option<u64>,
    /// Rejection reason on failure.
    pub error: Option<String>,
}

// =============================================================================
// TESTS
// =============================================================================
