//! Account commands

use super::parse_json;
use crate::app::App;
use anyhow::Result;
use clap::Subcommand;
use pailot_platform::ShareContent;
use serde_json::{json, Value};

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Authenticate with the Pi wallet and register with the backend
    SignIn,

    /// Show the backend profile
    Profile,

    /// Replace profile fields with a JSON object
    UpdateProfile {
        #[arg(value_parser = parse_json)]
        profile: Value,
    },

    /// Show the backend transaction history
    Transactions,

    /// Share content through the wallet
    Share {
        #[arg(long)]
        title: String,

        #[arg(long)]
        text: String,

        #[arg(long)]
        url: String,
    },
}

pub async fn run(command: AccountCommand, mut app: App) -> Result<Value> {
    match command {
        AccountCommand::SignIn => {
            let auth = app.platform.sign_in().await?;
            Ok(serde_json::to_value(auth)?)
        }
        AccountCommand::Profile => Ok(app.platform.user_profile().await?),
        AccountCommand::UpdateProfile { profile } => {
            Ok(app.platform.update_user_profile(&profile).await?)
        }
        AccountCommand::Transactions => Ok(app.platform.transaction_history().await?),
        AccountCommand::Share { title, text, url } => {
            let content = ShareContent { title, text, url };
            app.platform.share_content(&content).await?;
            Ok(json!({ "shared": true }))
        }
    }
}
