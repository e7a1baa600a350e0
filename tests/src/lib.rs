//! # Paid-Messaging Escrow Test Suite
//!
//! Unified test crate.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end flows through the service + in-memory ledger
//!     └── escrow_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p escrow-tests
//!
//! # By category
//! cargo test -p escrow-tests integration::
//! ```

#![allow(unused_imports)]

pub mod integration;
