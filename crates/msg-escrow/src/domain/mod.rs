//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the escrow ledger.
//! NO I/O, NO async, NO external dependencies beyond hashing.
//!
//! - All types here are pure domain concepts.
//! - Dependencies point INWARD only (engine, adapters, and service depend on
//!   this layer, never the other way around).

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
