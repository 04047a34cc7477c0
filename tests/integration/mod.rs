//! Integration Tests Module
//!
//! End-to-end tests of the driver flow and the command surface over
//! in-memory adapters.
//!
//! Test categories:
//! - `delivery_flow`: accept, complete, reward minting and sharing
//! - `command_flow`: parsed commands against an assembled app

mod delivery_flow;
