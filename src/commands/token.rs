//! Token commands
//!
//! Mint, transfer and burn print an unsigned transaction. Sign it in the
//! source account's wallet, then pass the signed envelope to `token submit`.

use crate::app::App;
use anyhow::Result;
use clap::Subcommand;
use pailot_payments::{inspect_envelope, TokenClient, TokenWallet};
use serde_json::{json, Value};

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Open an account's wallet: trustline state, balance and history
    Status { public_key: String },

    /// Build the trustline transaction for an account
    Setup { public_key: String },

    /// Token balance of an account
    Balance { public_key: String },

    /// Token payments to and from an account
    History { public_key: String },

    /// Build a mint from the issuer
    Mint { destination: String, amount: String },

    /// Build a transfer between two accounts
    Transfer {
        from: String,
        to: String,
        amount: String,
    },

    /// Build a burn back to the issuer
    Burn { holder: String, amount: String },

    /// Submit a signed transaction envelope (base64 XDR)
    Submit { envelope_xdr: String },

    /// Decode a transaction envelope without submitting it
    Inspect { envelope_xdr: String },
}

pub async fn run(command: TokenCommand, app: App) -> Result<Value> {
    // Only `inspect` works without a configured issuer
    let value = match command {
        TokenCommand::Inspect { envelope_xdr } => inspect(&envelope_xdr)?,
        command => with_client(command, app.tokens()?).await?,
    };

    Ok(value)
}

fn inspect(envelope_xdr: &str) -> Result<Value> {
    Ok(serde_json::to_value(inspect_envelope(envelope_xdr)?)?)
}

async fn with_client(command: TokenCommand, client: &TokenClient) -> Result<Value> {
    let value = match command {
        TokenCommand::Status { public_key } => {
            let mut wallet = TokenWallet::new(client.clone(), Some(public_key.clone()));
            let setup = wallet.open().await?;
            json!({
                "public_key": public_key,
                "setup": setup,
                "balance": wallet.balance(),
                "history": wallet.history(),
            })
        }
        TokenCommand::Setup { public_key } => {
            serde_json::to_value(client.initialize_token_account(&public_key).await?)?
        }
        TokenCommand::Balance { public_key } => json!({
            "public_key": public_key,
            "asset_code": client.config().token_code,
            "balance": client.get_token_balance(&public_key).await?,
        }),
        TokenCommand::History { public_key } => {
            serde_json::to_value(client.get_token_history(&public_key).await?)?
        }
        TokenCommand::Mint {
            destination,
            amount,
        } => serde_json::to_value(client.mint_tokens(&destination, &amount).await?)?,
        TokenCommand::Transfer { from, to, amount } => {
            serde_json::to_value(client.transfer_tokens(&from, &to, &amount).await?)?
        }
        TokenCommand::Burn { holder, amount } => {
            serde_json::to_value(client.burn_tokens(&holder, &amount).await?)?
        }
        TokenCommand::Submit { envelope_xdr } => {
            let response = client.submit_transaction(&envelope_xdr).await?;
            json!({
                "hash": response.hash,
                "ledger": response.ledger,
                "successful": response.successful,
                "explorer_url": client.config().explorer_tx_url(&response.hash),
            })
        }
        TokenCommand::Inspect { envelope_xdr } => inspect(&envelope_xdr)?,
    };

    Ok(value)
}
