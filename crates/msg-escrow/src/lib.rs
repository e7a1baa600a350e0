//! # msg-escrow - Paid-Messaging Escrow Ledger Core
//!
//! ## Purpose
//!
//! A recipient advertises a price; a sender paying at least that price can
//! attach a message; the funds stay in escrow until the recipient performs
//! an explicit read that atomically releases the funds and destroys the
//! message. This crate is the validation and state-transition core for the
//! four operations (register profile, update price, send paid message,
//! read-and-claim), deterministic record addressing, authorization, and the
//! description of atomic fund/record mutations.
//!
//! The ledger runtime around this core authenticates callers, applies each
//! committed effect as one indivisible transaction, serializes operations on
//! the same derived address, and rolls back rejected operations completely.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Escrow coupling: funds move iff the record is created/destroyed with them | `domain/invariants.rs` - `check_escrow_coupling_invariant()` |
//! | INVARIANT-2 | Escrow conservation: transferred amount equals the recorded amount | `domain/invariants.rs` - `check_escrow_conservation_invariant()` |
//! | INVARIANT-3 | Well-formed records under the fixed binary layout | `domain/invariants.rs` - `check_records_well_formed_invariant()` |
//! | INVARIANT-4 | Price floor at creation time; later changes are not retroactive | `engine/escrow.rs` - `send_message()` |
//!
//! ## Record Addressing
//!
//! Record identity is derived, not indexed: SHA-256 over seed tuples
//! (`"profile" ++ owner`, `"message" ++ recipient ++ sender ++ nonce-LE`).
//! Derivation collision is the sole duplicate-detection mechanism; every
//! create first checks the derived address is unoccupied.
//!
//! ## Usage Example
//!
//! ```
//! use msg_escrow::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), EscrowError> {
//! let service = EscrowService::new(Arc::new(InMemoryLedger::new()), ServiceConfig::default());
//!
//! let recipient = TxContext::new(AccountId::new([1u8; 32]), 1_700_000_000);
//! let sender = TxContext::new(AccountId::new([2u8; 32]), 1_700_000_060);
//!
//! service.register_profile(recipient, 1_000_000).await?;
//! service.ledger().set_balance(&sender.caller, 5_000_000);
//!
//! let id = service
//!     .send_message(sender, recipient.caller, 1, 2_000_000, "hello there".into())
//!     .await?;
//! let content = service.read_and_claim(recipient, id).await?;
//! assert_eq!(content, "hello there");
//! # Ok(())
//! # }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Effect, FundTransfer, Message, Profile, TxContext, MAX_CONTENT_LEN,
        MESSAGE_SENDER_OFFSET,
    };

    // Value objects
    pub use crate::domain::value_objects::{AccountId, RecordAddress, RecordKind};

    // Domain services
    pub use crate::domain::services::{
        authorize, message_address, profile_address, AccessDecision,
    };

    // Invariants
    pub use crate::domain::invariants::check_all_effect_invariants;

    // Engine
    pub use crate::engine::{
        get_price, read_and_claim, register_profile, send_message, update_price,
    };

    // Ports
    pub use crate::ports::inbound::EscrowApi;
    pub use crate::ports::outbound::{LedgerCommit, StateView};

    // Errors
    pub use crate::errors::{EscrowError, StoreError};

    // Adapters
    pub use crate::adapters::InMemoryLedger;

    // Service
    pub use crate::service::{create_test_service, EscrowService, ServiceConfig, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
