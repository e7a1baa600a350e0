//! # Profile Registry
//!
//! Validation cores for `register_profile`, `update_price`, and `get_price`.
//! Uniqueness of profiles rests entirely on address-derivation collision:
//! there is no separate uniqueness index.

use crate::domain::entities::{Effect, Profile, TxContext};
use crate::domain::services::{authorize, profile_address};
use crate::domain::value_objects::{AccountId, RecordAddress};
use crate::errors::EscrowError;
use crate::ports::outbound::StateView;

/// Validates profile registration for the caller and describes its effect.
///
/// The derived profile address must be unoccupied; a second registration by
/// the same identity collides there and fails `AlreadyExists` with the
/// original record untouched.
///
/// # Errors
///
/// `AlreadyExists`, or `Store` on infrastructure faults.
pub fn register_profile<S: StateView + ?Sized>(
    view: &S,
    ctx: &TxContext,
    price_min_units: u64,
) -> Result<(RecordAddress, Effect), EscrowError> {
    let address = profile_address(&ctx.caller);
    if view.record_exists(&address)? {
        return Err(EscrowError::AlreadyExists);
    }

    let profile = Profile::new(ctx.caller, price_min_units, ctx.unix_timestamp);
    let effect = Effect {
        writes: vec![(address, profile.encode())],
        deletes: vec![],
        transfer: None,
    };
    Ok((address, effect))
}

/// Validates a price update and describes its effect.
///
/// Authorization runs before any mutating effect: only the profile owner may
/// change the price. Pending messages keep the price they were created
/// under; this only affects future sends.
///
/// # Errors
///
/// `NotFound`, `Unauthorized`, or `Store`.
pub fn update_price<S: StateView + ?Sized>(
    view: &S,
    ctx: &TxContext,
    owner: &AccountId,
    new_price: u64,
) -> Result<Effect, EscrowError> {
    let address = profile_address(owner);
    let bytes = view.get_record(&address)?.ok_or(EscrowError::NotFound)?;
    let mut profile = Profile::decode(&bytes)?;

    if !authorize(&ctx.caller, &profile.owner).is_authorized() {
        return Err(EscrowError::Unauthorized);
    }

    profile.price_min_units = new_price;
    Ok(Effect {
        writes: vec![(address, profile.encode())],
        deletes: vec![],
        transfer: None,
    })
}

/// Reads the current minimum price of `owner`'s profile.
///
/// # Errors
///
/// `NotFound` if the profile is absent, or `Store`.
pub fn get_price<S: StateView + ?Sized>(
    view: &S,
    owner: &AccountId,
) -> Result<u64, EscrowError> {
    let address = profile_address(owner);
    let bytes = view.get_record(&address)?.ok_or(EscrowError::NotFound)?;
    let profile = Profile::decode(&bytes)?;
    Ok(profile.price_min_units)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::ports::outbound::LedgerCommit;

    fn ctx(byte: u8) -> TxContext {
        TxContext::new(AccountId::new([byte; 32]), 1_700_000_000)
    }

    #[test]
    fn test_register_then_get_price() {
        let ledger = InMemoryLedger::new();
        let owner_ctx = ctx(1);

        let (address, effect) = register_profile(&ledger, &owner_ctx, 1_000_000).unwrap();
        assert_eq!(address, profile_address(&owner_ctx.caller));
        ledger.commit(effect).unwrap();

        assert_eq!(get_price(&ledger, &owner_ctx.caller).unwrap(), 1_000_000);
    }

    #[test]
    fn test_register_zero_price_is_valid() {
        let ledger = InMemoryLedger::new();
        let (_, effect) = register_profile(&ledger, &ctx(1), 0).unwrap();
        ledger.commit(effect).unwrap();
        assert_eq!(get_price(&ledger, &ctx(1).caller).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let ledger = InMemoryLedger::new();
        let owner_ctx = ctx(1);

        let (_, effect) = register_profile(&ledger, &owner_ctx, 1_000_000).unwrap();
        ledger.commit(effect).unwrap();

        let err = register_profile(&ledger, &owner_ctx, 5).unwrap_err();
        assert_eq!(err, EscrowError::AlreadyExists);

        // Original price untouched.
        assert_eq!(get_price(&ledger, &owner_ctx.caller).unwrap(), 1_000_000);
    }

    #[test]
    fn test_update_price_by_owner() {
        let ledger = InMemoryLedger::new();
        let owner_ctx = ctx(1);

        let (_, effect) = register_profile(&ledger, &owner_ctx, 100).unwrap();
        ledger.commit(effect).unwrap();

        let effect = update_price(&ledger, &owner_ctx, &owner_ctx.caller, 200).unwrap();
        ledger.commit(effect).unwrap();

        assert_eq!(get_price(&ledger, &owner_ctx.caller).unwrap(), 200);
    }

    #[test]
    fn test_update_price_by_stranger_unauthorized() {
        let ledger = InMemoryLedger::new();
        let owner_ctx = ctx(1);
        let stranger_ctx = ctx(2);

        let (_, effect) = register_profile(&ledger, &owner_ctx, 100).unwrap();
        ledger.commit(effect).unwrap();

        let err = update_price(&ledger, &stranger_ctx, &owner_ctx.caller, 0).unwrap_err();
        assert_eq!(err, EscrowError::Unauthorized);
        assert_eq!(get_price(&ledger, &owner_ctx.caller).unwrap(), 100);
    }

    #[test]
    fn test_update_price_missing_profile() {
        let ledger = InMemoryLedger::new();
        let owner_ctx = ctx(1);
        let err = update_price(&ledger, &owner_ctx, &owner_ctx.caller, 1).unwrap_err();
        assert_eq!(err, EscrowError::NotFound);
    }

    #[test]
    fn test_get_price_missing_profile() {
        let ledger = InMemoryLedger::new();
        assert_eq!(
            get_price(&ledger, &AccountId::new([9u8; 32])).unwrap_err(),
            EscrowError::NotFound
        );
    }

    #[test]
    fn test_update_preserves_counters() {
        let ledger = InMemoryLedger::new();
        let owner_ctx = ctx(1);

        let (address, effect) = register_profile(&ledger, &owner_ctx, 100).unwrap();
        ledger.commit(effect).unwrap();

        let effect = update_price(&ledger, &owner_ctx, &owner_ctx.caller, 300).unwrap();
        ledger.commit(effect).unwrap();

        let profile = Profile::decode(&ledger.get_record(&address).unwrap().unwrap()).unwrap();
        assert_eq!(profile.price_min_units, 300);
        assert_eq!(profile.inbox_count, 0);
        assert_eq!(profile.received_total, 0);
        assert_eq!(profile.created_at, 1_700_000_000);
    }
}
