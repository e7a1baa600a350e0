//! # Escrow Engine
//!
//! The validation core. Each operation reads a consistent [`StateView`]
//! snapshot, checks every precondition in fail-closed order, and returns an
//! [`Effect`](crate::domain::entities::Effect) describing exactly the record
//! mutations and fund transfer it implies. Nothing here mutates state; the
//! ledger runtime commits effects atomically.
//!
//! - [`registry`] - profile registration and price configuration
//! - [`escrow`] - paid-message creation and atomic read-and-claim
//!
//! [`StateView`]: crate::ports::outbound::StateView

pub mod escrow;
pub mod registry;

pub use escrow::*;
pub use registry::*;
