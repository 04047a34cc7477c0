//! Payment and order commands

use super::parse_json;
use crate::app::App;
use anyhow::Result;
use clap::Subcommand;
use pailot_platform::PaymentData;
use serde_json::Value;

#[derive(Debug, Subcommand)]
pub enum PaymentCommand {
    /// Create a payment (signs in first to identify the payer)
    Create {
        /// Amount in Pi
        #[arg(long)]
        amount: f64,

        #[arg(long)]
        memo: String,

        /// Metadata JSON attached to the payment
        #[arg(long, value_parser = parse_json, default_value = "{}")]
        metadata: Value,
    },

    /// Submit a created payment for approval
    Submit { payment_id: String },

    /// Complete a payment once its ledger transaction exists
    Complete { payment_id: String },

    /// Cancel a payment
    Cancel { payment_id: String },

    /// Payment status as recorded by the backend
    Status { payment_id: String },
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Create an order from a JSON object
    Create {
        #[arg(value_parser = parse_json)]
        order: Value,
    },

    /// Show an order's status
    Status { order_id: String },
}

pub async fn run(command: PaymentCommand, mut app: App) -> Result<Value> {
    let payment = match command {
        PaymentCommand::Create {
            amount,
            memo,
            metadata,
        } => {
            app.platform.sign_in().await?;
            app.platform
                .create_payment(&PaymentData::new(amount, memo, metadata))
                .await?
        }
        PaymentCommand::Submit { payment_id } => app.platform.submit_payment(&payment_id).await?,
        PaymentCommand::Complete { payment_id } => {
            app.platform.complete_payment(&payment_id).await?
        }
        PaymentCommand::Cancel { payment_id } => app.platform.cancel_payment(&payment_id).await?,
        PaymentCommand::Status { payment_id } => {
            let status = app.platform.payment_status(&payment_id).await?;
            return Ok(serde_json::to_value(status)?);
        }
    };

    Ok(serde_json::to_value(payment)?)
}

pub async fn run_order(command: OrderCommand, app: App) -> Result<Value> {
    match command {
        OrderCommand::Create { order } => Ok(app.platform.create_order(&order).await?),
        OrderCommand::Status { order_id } => Ok(app.platform.order_status(&order_id).await?),
    }
}
