//! # Domain Invariants
//!
//! Predicates over produced [`Effect`]s that MUST hold before the runtime is
//! asked to commit. The service checks these on every mutating operation
//! (see `ServiceConfig::verify_effects`).
//!
//! - INVARIANT-1: Escrow coupling - funds leave escrow only together with a
//!   record destruction, and enter escrow only together with a message
//!   creation.
//! - INVARIANT-2: Escrow conservation - the transferred amount equals the
//!   amount carried by the message record being created or destroyed.
//! - INVARIANT-3: Well-formed records - every written record decodes under
//!   the fixed binary layout.
//! - INVARIANT-4: Price floor - a message is only created with an amount at
//!   least the recipient's price at the same snapshot.

use crate::domain::entities::{Effect, FundTransfer, Message, Profile};
use crate::domain::value_objects::RecordKind;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Escrow coupling.
///
/// A credit out of escrow must destroy exactly one record; a debit into
/// escrow must destroy nothing. An effect without a transfer must not
/// destroy records either (only `read_and_claim` deletes, and it always
/// pays out).
#[must_use]
pub fn check_escrow_coupling_invariant(effect: &Effect) -> bool {
    match &effect.transfer {
        Some(FundTransfer::EscrowCredit { .. }) => effect.deletes.len() == 1,
        Some(FundTransfer::EscrowDebit { .. }) | None => effect.deletes.is_empty(),
    }
}

/// INVARIANT-2: Escrow conservation.
///
/// On a debit, the amount entering escrow equals the amount recorded in the
/// message being written. (The credited amount on claim is validated against
/// the stored record by the operation itself; the destroyed record is no
/// longer part of the effect.)
#[must_use]
pub fn check_escrow_conservation_invariant(effect: &Effect) -> bool {
    match &effect.transfer {
        Some(FundTransfer::EscrowDebit { from, amount }) => effect.writes.iter().any(|(_, bytes)| {
            Message::decode(bytes)
                .map(|m| m.sender == *from && m.amount == *amount)
                .unwrap_or(false)
        }),
        _ => true,
    }
}

/// INVARIANT-3: Well-formed records.
///
/// Every written record decodes as a profile or a message under the fixed
/// binary layout.
#[must_use]
pub fn check_records_well_formed_invariant(effect: &Effect) -> bool {
    effect.writes.iter().all(|(_, bytes)| {
        match bytes.first().and_then(|b| RecordKind::from_byte(*b)) {
            Some(RecordKind::Profile) => Profile::decode(bytes).is_ok(),
            Some(RecordKind::Message) => Message::decode(bytes).is_ok(),
            None => false,
        }
    })
}

/// INVARIANT-4: Price floor.
///
/// Evaluated at creation time against the same snapshot; later price changes
/// never retroactively affect pending messages.
#[must_use]
pub fn check_price_floor_invariant(recipient_profile: &Profile, amount: u64) -> bool {
    amount >= recipient_profile.price_min_units
}

/// Runs all effect-level invariant checks.
#[must_use]
pub fn check_all_effect_invariants(effect: &Effect) -> bool {
    check_escrow_coupling_invariant(effect)
        && check_escrow_conservation_invariant(effect)
        && check_records_well_formed_invariant(effect)
}

// =============================================================================
// TESTS
// =============================================================================
