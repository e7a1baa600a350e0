//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the escrow subsystem.
//!
//! - **Driving Port (Inbound)**: [`EscrowApi`]
//! - **Driven Ports (Outbound)**: [`StateView`], [`LedgerCommit`]
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
