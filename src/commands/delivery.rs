//! Driver delivery commands

use crate::app::App;
use crate::driver::DriverService;
use crate::reward::calculate_reward;
use anyhow::{Context, Result};
use clap::Subcommand;
use pailot_platform::Delivery;
use serde_json::{json, Value};

#[derive(Debug, Subcommand)]
pub enum DeliveryCommand {
    /// All deliveries on the backend
    History,

    /// Deliveries waiting for a driver
    Pending,

    /// Deliveries that are no longer pending
    Past,

    /// Reward a delivery would earn on completion
    Reward { delivery_id: String },

    /// Accept a pending delivery
    Accept { delivery_id: String },

    /// Pay, complete, mint the reward and share
    Complete { delivery_id: String },
}

fn find(driver: &DriverService, delivery_id: &str) -> Result<Delivery> {
    driver
        .pending()
        .into_iter()
        .chain(driver.past())
        .find(|d| d.id == delivery_id)
        .cloned()
        .with_context(|| format!("Delivery {} not found", delivery_id))
}

pub async fn run(command: DeliveryCommand, app: App) -> Result<Value> {
    let mut driver = app.into_driver();

    match command {
        DeliveryCommand::History => {
            let deliveries = driver.load_history().await?;
            Ok(serde_json::to_value(deliveries)?)
        }
        DeliveryCommand::Pending => {
            driver.load_history().await?;
            Ok(serde_json::to_value(driver.pending())?)
        }
        DeliveryCommand::Past => {
            driver.load_history().await?;
            Ok(serde_json::to_value(driver.past())?)
        }
        DeliveryCommand::Reward { delivery_id } => {
            driver.load_history().await?;
            let delivery = find(&driver, &delivery_id)?;
            Ok(json!({
                "delivery_id": delivery.id,
                "reward": calculate_reward(&delivery),
            }))
        }
        DeliveryCommand::Accept { delivery_id } => {
            driver.sign_in().await?;
            driver.load_history().await?;
            let delivery = find(&driver, &delivery_id)?;
            Ok(serde_json::to_value(driver.accept_delivery(&delivery).await?)?)
        }
        DeliveryCommand::Complete { delivery_id } => {
            driver.sign_in().await?;
            driver.load_history().await?;
            let delivery = find(&driver, &delivery_id)?;
            Ok(serde_json::to_value(driver.complete_delivery(&delivery).await?)?)
        }
    }
}
