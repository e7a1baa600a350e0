//! # Integration Tests
//!
//! End-to-end flows exercising the escrow service through the inbound API
//! with the in-memory ledger standing in for the runtime.

pub mod escrow_flows;
