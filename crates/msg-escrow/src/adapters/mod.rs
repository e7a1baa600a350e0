//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.
//!
//! Only the in-memory test double lives here; in production the ledger
//! runtime itself implements [`StateView`](crate::ports::outbound::StateView)
//! and [`LedgerCommit`](crate::ports::outbound::LedgerCommit).

pub mod memory_ledger;

pub use memory_ledger::*;
