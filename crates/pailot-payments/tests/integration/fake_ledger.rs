//! In-memory ledger server shared by the integration tests.

use async_trait::async_trait;
use pailot_payments::horizon::error_for_status;
use pailot_payments::{
    encode_account_id, AccountInfo, Balance, JoinedTransaction, LedgerConfig, LedgerServer,
    PaymentError, PaymentRecord, Result, TokenClient, TransactionResponse,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE_FEE: u32 = 100_000;

/// Deterministic G... address for a seed byte
pub fn key(seed: u8) -> String {
    encode_account_id(&[seed; 32])
}

pub fn issuer() -> String {
    key(1)
}

pub fn config() -> LedgerConfig {
    LedgerConfig::testnet(&issuer())
}

pub fn native(amount: &str) -> Balance {
    Balance {
        asset_type: "native".to_string(),
        asset_code: String::new(),
        asset_issuer: String::new(),
        balance: amount.to_string(),
        limit: None,
    }
}

pub fn trustline(code: &str, issuer: &str, amount: &str) -> Balance {
    Balance {
        asset_type: "credit_alphanum12".to_string(),
        asset_code: code.to_string(),
        asset_issuer: issuer.to_string(),
        balance: amount.to_string(),
        limit: Some("1000000.0000000".to_string()),
    }
}

pub fn payment(id: &str, code: &str, issuer: &str, from: &str, to: &str, amount: &str) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        kind: "payment".to_string(),
        created_at: "2024-05-01T10:00:00Z".to_string(),
        transaction_hash: format!("hash-{}", id),
        asset_type: Some("credit_alphanum12".to_string()),
        asset_code: Some(code.to_string()),
        asset_issuer: Some(issuer.to_string()),
        from: Some(from.to_string()),
        to: Some(to.to_string()),
        amount: Some(amount.to_string()),
        transaction: Some(JoinedTransaction {
            hash: format!("hash-{}", id),
            memo: None,
            memo_type: Some("none".to_string()),
            successful: true,
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }),
    }
}

#[derive(Default)]
pub struct FakeLedger {
    accounts: Mutex<HashMap<String, AccountInfo>>,
    payments: Mutex<HashMap<String, Vec<PaymentRecord>>>,
    submitted: Mutex<Vec<String>>,
    load_failure: Mutex<Option<u16>>,
    fee_failure: Mutex<Option<u16>>,
}

impl FakeLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_account(&self, id: &str, sequence: i64, balances: Vec<Balance>) {
        self.accounts.lock().unwrap().insert(
            id.to_string(),
            AccountInfo {
                id: id.to_string(),
                sequence: sequence.to_string(),
                balances,
                subentry_count: 0,
            },
        );
    }

    pub fn set_balances(&self, id: &str, balances: Vec<Balance>) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(id) {
            account.balances = balances;
        }
    }

    pub fn add_payments(&self, id: &str, records: Vec<PaymentRecord>) {
        self.payments
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .extend(records);
    }

    /// Make every account load fail with an HTTP status
    pub fn fail_loads_with(&self, status: u16) {
        *self.load_failure.lock().unwrap() = Some(status);
    }

    /// Make fee stats fail with an HTTP status
    pub fn fail_fee_stats_with(&self, status: u16) {
        *self.fee_failure.lock().unwrap() = Some(status);
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerServer for FakeLedger {
    async fn load_account(&self, address: &str) -> Result<AccountInfo> {
        if let Some(status) = *self.load_failure.lock().unwrap() {
            return Err(error_for_status(status, "fake failure", Some(address)));
        }
        self.accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| PaymentError::AccountNotFound(address.to_string()))
    }

    async fn fetch_base_fee(&self) -> Result<u32> {
        if let Some(status) = *self.fee_failure.lock().unwrap() {
            return Err(error_for_status(status, "fake failure", None));
        }
        Ok(BASE_FEE)
    }

    async fn payments_for_account(&self, address: &str) -> Result<Vec<PaymentRecord>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_transaction(&self, envelope_xdr: &str) -> Result<TransactionResponse> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(envelope_xdr.to_string());
        Ok(TransactionResponse {
            hash: format!("submitted-{}", submitted.len()),
            ledger: 1000 + submitted.len() as u64,
            envelope_xdr: envelope_xdr.to_string(),
            result_xdr: String::new(),
            fee_charged: Some(BASE_FEE.to_string()),
            successful: true,
        })
    }
}

/// Token client over a fake ledger that already knows the issuer and two users
pub fn client_with_ledger() -> (TokenClient, Arc<FakeLedger>) {
    let ledger = FakeLedger::new();
    ledger.add_account(&issuer(), 500, vec![native("1000.0000000")]);
    ledger.add_account(&key(2), 10, vec![native("50.0000000")]);
    ledger.add_account(&key(3), 20, vec![native("50.0000000")]);

    let client = TokenClient::new(config(), ledger.clone()).unwrap();
    (client, ledger)
}
