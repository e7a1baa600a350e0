//! # Message Escrow
//!
//! Validation cores for `send_message` and `read_and_claim`.
//!
//! Message lifecycle: `Nonexistent -> Pending` (send) `-> Nonexistent`
//! (claim, terminal). The escrowed amount and the record are coupled 1:1 in
//! the effects produced here: no effect destroys a message without paying
//! out its full balance to the recipient, and none pays out without
//! destroying the record.

use crate::domain::entities::{Effect, FundTransfer, Message, Profile, TxContext};
use crate::domain::services::{authorize, message_address, profile_address};
use crate::domain::value_objects::{AccountId, RecordAddress, RecordKind};
use crate::errors::{EscrowError, StoreError};
use crate::ports::outbound::StateView;

/// Validates a paid send and describes its effect.
///
/// Checks run fail-closed, before any effect is described: content length,
/// recipient profile existence, price floor (against the price at this
/// snapshot), and nonce-address collision. The effect debits the sender into
/// escrow, writes the message record, and bumps the recipient's inbox
/// counter, all as one unit.
///
/// # Errors
///
/// `InvalidArgument`, `NotFound`, `Underpriced`, `AlreadyExists`, or
/// `Store`.
pub fn send_message<S: StateView + ?Sized>(
    view: &S,
    ctx: &TxContext,
    recipient: &AccountId,
    nonce: u64,
    amount: u64,
    content: &str,
    max_content_len: usize,
) -> Result<(RecordAddress, Effect), EscrowError> {
    if content.len() > max_content_len {
        return Err(EscrowError::InvalidArgument(format!(
            "content length {} exceeds maximum {max_content_len}",
            content.len()
        )));
    }

    let recipient_address = profile_address(recipient);
    let profile_bytes = view
        .get_record(&recipient_address)?
        .ok_or(EscrowError::NotFound)?;
    let mut profile = Profile::decode(&profile_bytes)?;

    if amount < profile.price_min_units {
        return Err(EscrowError::Underpriced {
            required: profile.price_min_units,
            offered: amount,
        });
    }

    let address = message_address(recipient, &ctx.caller, nonce);
    if view.record_exists(&address)? {
        // Nonce reuse against a still-pending message. Not retried silently:
        // the caller must pick a fresh nonce.
        return Err(EscrowError::AlreadyExists);
    }

    let message = Message {
        sender: ctx.caller,
        recipient: *recipient,
        nonce,
        amount,
        content: content.to_owned(),
        created_at: ctx.unix_timestamp,
    };
    profile.inbox_count = profile.inbox_count.saturating_add(1);

    let effect = Effect {
        writes: vec![
            (address, message.encode()),
            (recipient_address, profile.encode()),
        ],
        deletes: vec![],
        transfer: Some(FundTransfer::EscrowDebit {
            from: ctx.caller,
            amount,
        }),
    };
    Ok((address, effect))
}

/// Validates a read-and-claim and describes its effect.
///
/// Read and claim are a single indivisible step: the returned content comes
/// with an effect that credits the full escrowed amount to the recipient and
/// destroys the record. There is no path that returns content without the
/// payout, which prevents a recipient from re-reading a free copy after a
/// partial failure.
///
/// # Errors
///
/// `NotFound` (absent or already claimed), `Unauthorized` (caller is not
/// the recipient), or `Store`.
pub fn read_and_claim<S: StateView + ?Sized>(
    view: &S,
    ctx: &TxContext,
    message_id: &RecordAddress,
) -> Result<(String, Effect), EscrowError> {
    let bytes = view.get_record(message_id)?.ok_or(EscrowError::NotFound)?;
    if bytes.first().copied() != Some(RecordKind::Message.discriminator()) {
        // Some other record kind lives here; no message at this id.
        return Err(EscrowError::NotFound);
    }
    let message = Message::decode(&bytes)?;

    if !authorize(&ctx.caller, &message.recipient).is_authorized() {
        return Err(EscrowError::Unauthorized);
    }

    let recipient_address = profile_address(&message.recipient);
    let profile_bytes = view.get_record(&recipient_address)?.ok_or_else(|| {
        StoreError::Corrupted("recipient profile missing for pending message".into())
    })?;
    let mut profile = Profile::decode(&profile_bytes)?;
    profile.received_total = profile.received_total.saturating_add(message.amount);

    let effect = Effect {
        writes: vec![(recipient_address, profile.encode())],
        deletes: vec![*message_id],
        transfer: Some(FundTransfer::EscrowCredit {
            to: message.recipient,
            amount: message.amount,
        }),
    };
    Ok((message.content, effect))
}

// =============================================================================
// TESTS
// =============================================================================
