//! # Driving Ports (API - Inbound)
//!
//! The public API of the escrow subsystem: four mutating entry points, one
//! read-only query, and the retained no-op `initialize`.
//!
//! Every entry point receives a [`TxContext`] whose caller identity the
//! ledger runtime has already authenticated; the core trusts it without
//! re-verification.

use crate::domain::entities::TxContext;
use crate::domain::value_objects::{AccountId, RecordAddress};
use crate::errors::EscrowError;
use async_trait::async_trait;

// =============================================================================
// ESCROW API (Primary Driving Port)
// =============================================================================

/// Primary API for the paid-messaging escrow ledger.
///
/// All errors are reported before any mutation; a failed call leaves no
/// observable record or fund change. The core never retries - a caller
/// retrying `send_message` must pick a fresh nonce.
#[async_trait]
pub trait EscrowApi: Send + Sync {
    /// Bootstrap entry point. Performs no state change; retained for
    /// compatibility with deployment tooling that invokes it once.
    async fn initialize(&self, ctx: TxContext) -> Result<(), EscrowError>;

    /// Registers a price-configuration profile for the caller.
    ///
    /// Fails `AlreadyExists` if the caller already registered.
    /// Returns the derived profile address.
    async fn register_profile(
        &self,
        ctx: TxContext,
        price_min_units: u64,
    ) -> Result<RecordAddress, EscrowError>;

    /// Updates the minimum price of `owner`'s profile.
    ///
    /// Fails `NotFound` if no such profile, `Unauthorized` unless the caller
    /// is the owner.
    async fn update_price(
        &self,
        ctx: TxContext,
        owner: AccountId,
        new_price: u64,
    ) -> Result<(), EscrowError>;

    /// Reads the current minimum price of `owner`'s profile.
    ///
    /// Fails `NotFound` if absent.
    async fn get_price(&self, owner: AccountId) -> Result<u64, EscrowError>;

    /// Sends a paid message: escrows `amount` from the caller and creates
    /// the message record in one atomic unit.
    ///
    /// Fails `InvalidArgument` (oversized content), `NotFound` (recipient
    /// not registered), `Underpriced` (amount below the recipient's price),
    /// or `AlreadyExists` (nonce reused against a still-pending message).
    /// Returns the derived message address.
    async fn send_message(
        &self,
        ctx: TxContext,
        recipient: AccountId,
        nonce: u64,
        amount: u64,
        content: String,
    ) -> Result<RecordAddress, EscrowError>;

    /// Reads a message and claims its escrowed funds in one atomic unit:
    /// credits the caller, destroys the record, returns the content.
    ///
    /// There is no way to view content without simultaneously releasing the
    /// funds. Fails `NotFound` (absent or already claimed) or `Unauthorized`
    /// (caller is not the recipient).
    async fn read_and_claim(
        &self,
        ctx: TxContext,
        message_id: RecordAddress,
    ) -> Result<String, EscrowError>;
}
