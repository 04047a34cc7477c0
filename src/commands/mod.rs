//! Command-line surface
//!
//! Every command prints a [`CommandResult`] as JSON on stdout. Logs go to
//! stderr so the output stays machine-readable.

pub mod account;
pub mod delivery;
pub mod payment;
pub mod token;

use crate::app::App;
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

// ==================== Command Result Wrapper ====================

#[derive(Debug, Clone, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Display) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

// ==================== CLI ====================

/// PailotPH - delivery booking on Pi Network with PAILOT rewards
#[derive(Debug, Parser)]
#[command(name = "pailot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pi account: sign-in, profile, transactions, sharing
    #[command(subcommand)]
    Account(account::AccountCommand),

    /// Pi payments
    #[command(subcommand)]
    Payment(payment::PaymentCommand),

    /// Delivery orders on the backend
    #[command(subcommand)]
    Order(payment::OrderCommand),

    /// PAILOT token operations on the ledger
    #[command(subcommand)]
    Token(token::TokenCommand),

    /// Driver delivery flow
    #[command(subcommand)]
    Delivery(delivery::DeliveryCommand),
}

/// Run one command against the assembled app
pub async fn run(command: Command, app: App) -> Result<Value> {
    match command {
        Command::Account(cmd) => account::run(cmd, app).await,
        Command::Payment(cmd) => payment::run(cmd, app).await,
        Command::Order(cmd) => payment::run_order(cmd, app).await,
        Command::Token(cmd) => token::run(cmd, app).await,
        Command::Delivery(cmd) => delivery::run(cmd, app).await,
    }
}

/// Parse a JSON argument
pub(crate) fn parse_json(raw: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))
}
