//! Integration Tests Module
//!
//! End-to-end tests of the token ledger adapter against an in-memory ledger.
//!
//! Test categories:
//! - `ledger_flow`: token client operations (setup, mint, transfer, burn, queries)
//! - `wallet_flow`: per-user wallet state (open, refresh, submit)

mod fake_ledger;
