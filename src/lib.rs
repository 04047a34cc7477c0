//! PailotPH
//!
//! Delivery booking on Pi Network. Drivers sign in with their Pi wallet,
//! accept and complete deliveries, get paid in Pi and earn PAILOT reward
//! tokens on the Pi ledger.

pub mod app;
pub mod commands;
pub mod config;
pub mod driver;
pub mod reward;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use driver::{CompletedDelivery, DeliveryDetails, DriverError, DriverService};
pub use reward::calculate_reward;
