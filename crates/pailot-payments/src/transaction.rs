// ============================================================================
// PAILOT-PAYMENTS - Transaction Builder
// ============================================================================
// Builds unsigned, single-operation token transactions.
//
// A transaction consists of:
// - Source account and sequence number (account sequence + 1)
// - Fee (network base fee, in stroops)
// - Time bounds (now + validity window)
// - One operation: a token payment or a change-trust
//
// Signing happens in the user's wallet; this module only produces the
// base64 XDR envelope and its network-scoped hash.
// ============================================================================

use crate::amount::{from_stroops, to_stroops};
use crate::config::LedgerConfig;
use crate::error::PaymentError;
use crate::horizon::AccountInfo;
use crate::strkey::{account_id, muxed_account, muxed_to_address};
use crate::Result;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stellar_xdr::curr::{
    AlphaNum12, AlphaNum4, Asset, AssetCode12, AssetCode4, ChangeTrustAsset, ChangeTrustOp, Hash,
    Limits, Memo, Operation as XdrOperation, OperationBody, PaymentOp, Preconditions, ReadXdr,
    SequenceNumber, TimeBounds, TimePoint, Transaction, TransactionEnvelope, TransactionExt,
    TransactionSignaturePayload, TransactionSignaturePayloadTaggedTransaction,
    TransactionV1Envelope, VecM, WriteXdr,
};

// ============================================================================
// TRANSACTION TYPES
// ============================================================================

/// Token operation carried by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Payment of the configured token
    Payment { destination: String, amount: String },

    /// Create or modify the trustline to the configured token
    ChangeTrust { limit: String },
}

/// Unsigned transaction ready for the wallet to sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Source account (G... address)
    pub source: String,

    /// Sequence number this transaction consumes
    pub sequence: i64,

    /// Total fee in stroops
    pub fee: u32,

    pub min_time: u64,

    /// Unix time after which the network rejects the transaction
    pub max_time: u64,

    pub operation: Operation,

    /// Hex encoded transaction hash (what the signer signs)
    pub hash: String,

    /// Base64 XDR transaction envelope, no signatures
    pub envelope_xdr: String,
}

// ============================================================================
// TRANSACTION BUILDER
// ============================================================================

/// Builder for token transactions
pub struct TransactionBuilder {
    config: LedgerConfig,
    source_account: String,
    sequence: i64,
    fee: u32,
    operation: Option<Operation>,
    timeout_seconds: u64,
}

impl TransactionBuilder {
    /// Create a builder consuming the next sequence number of `source_account`
    pub fn new(config: &LedgerConfig, source_account: &AccountInfo) -> Result<Self> {
        let sequence = source_account
            .sequence_number()?
            .checked_add(1)
            .ok_or_else(|| PaymentError::InvalidTransaction("sequence number overflow".into()))?;

        Ok(Self {
            config: config.clone(),
            source_account: source_account.id.clone(),
            sequence,
            fee: config.base_fee,
            operation: None,
            timeout_seconds: config.tx_timeout_secs,
        })
    }

    /// Set fee per operation (in stroops)
    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    /// Set validity window
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Token payment to `destination`
    pub fn payment(mut self, destination: &str, amount: &str) -> Self {
        self.operation = Some(Operation::Payment {
            destination: destination.to_string(),
            amount: amount.trim().to_string(),
        });
        self
    }

    /// Trustline to the configured token
    pub fn change_trust(mut self, limit: &str) -> Self {
        self.operation = Some(Operation::ChangeTrust {
            limit: limit.trim().to_string(),
        });
        self
    }

    /// Build the transaction (returns XDR envelope ready for signing)
    pub fn build(self) -> Result<UnsignedTransaction> {
        let operation = self.operation.ok_or_else(|| {
            PaymentError::InvalidTransaction("Transaction must have one operation".to_string())
        })?;

        let body = match &operation {
            Operation::Payment {
                destination,
                amount,
            } => OperationBody::Payment(PaymentOp {
                destination: muxed_account(destination)?,
                asset: token_asset(&self.config)?,
                amount: to_stroops(amount)?,
            }),
            Operation::ChangeTrust { limit } => OperationBody::ChangeTrust(ChangeTrustOp {
                line: change_trust_asset(&self.config)?,
                limit: to_stroops(limit)?,
            }),
        };

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let max_time = now + self.timeout_seconds;

        let tx = Transaction {
            source_account: muxed_account(&self.source_account)?,
            fee: self.fee,
            seq_num: SequenceNumber(self.sequence),
            cond: Preconditions::Time(TimeBounds {
                min_time: TimePoint(0),
                max_time: TimePoint(max_time),
            }),
            memo: Memo::None,
            operations: vec![XdrOperation {
                source_account: None,
                body,
            }]
            .try_into()?,
            ext: TransactionExt::V0,
        };

        let hash = transaction_hash(&tx, &self.config.network_passphrase)?;

        let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
            tx,
            signatures: VecM::default(),
        });
        let envelope_xdr = BASE64_STANDARD.encode(envelope.to_xdr(Limits::none())?);

        Ok(UnsignedTransaction {
            source: self.source_account,
            sequence: self.sequence,
            fee: self.fee,
            min_time: 0,
            max_time,
            operation,
            hash: hex::encode(hash),
            envelope_xdr,
        })
    }
}

// ============================================================================
// XDR HELPERS
// ============================================================================

fn asset_code_bytes<const N: usize>(code: &str) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes[..code.len()].copy_from_slice(code.as_bytes());
    bytes
}

/// XDR asset for the configured token (alphanum4 up to 4 chars, else alphanum12)
fn token_asset(config: &LedgerConfig) -> Result<Asset> {
    config.validate()?;
    let issuer = account_id(&config.token_issuer)?;
    let code = config.token_code.as_str();

    Ok(if code.len() <= 4 {
        Asset::CreditAlphanum4(AlphaNum4 {
            asset_code: AssetCode4(asset_code_bytes(code)),
            issuer,
        })
    } else {
        Asset::CreditAlphanum12(AlphaNum12 {
            asset_code: AssetCode12(asset_code_bytes(code)),
            issuer,
        })
    })
}

fn change_trust_asset(config: &LedgerConfig) -> Result<ChangeTrustAsset> {
    Ok(match token_asset(config)? {
        Asset::CreditAlphanum4(a) => ChangeTrustAsset::CreditAlphanum4(a),
        Asset::CreditAlphanum12(a) => ChangeTrustAsset::CreditAlphanum12(a),
        Asset::Native => ChangeTrustAsset::Native,
    })
}

/// sha256 over the network-scoped signature payload
fn transaction_hash(tx: &Transaction, network_passphrase: &str) -> Result<[u8; 32]> {
    let network_id = Hash(Sha256::digest(network_passphrase.as_bytes()).into());
    let payload = TransactionSignaturePayload {
        network_id,
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    let payload_bytes = payload.to_xdr(Limits::none())?;
    Ok(Sha256::digest(&payload_bytes).into())
}

/// Decode a base64 XDR transaction envelope
pub fn decode_envelope(envelope_xdr: &str) -> Result<TransactionEnvelope> {
    let bytes = BASE64_STANDARD.decode(envelope_xdr.trim())?;
    Ok(TransactionEnvelope::from_xdr(bytes, Limits::none())?)
}

/// Readable view of a single-transaction envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeSummary {
    pub source: String,
    pub sequence: i64,
    pub fee: u32,
    pub max_time: Option<u64>,
    pub operations: Vec<OperationSummary>,
    pub signature_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationSummary {
    Payment {
        destination: String,
        asset_code: String,
        amount: String,
        stroops: i64,
    },
    ChangeTrust {
        asset_code: String,
        limit: String,
    },
    Other {
        name: String,
    },
}

fn asset_code_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

fn asset_code_of(asset: &Asset) -> String {
    match asset {
        Asset::Native => "native".to_string(),
        Asset::CreditAlphanum4(a) => asset_code_string(&a.asset_code.0),
        Asset::CreditAlphanum12(a) => asset_code_string(&a.asset_code.0),
    }
}

/// Summarize a base64 envelope (only v1 transaction envelopes)
pub fn inspect_envelope(envelope_xdr: &str) -> Result<EnvelopeSummary> {
    let envelope = decode_envelope(envelope_xdr)?;
    let v1 = match envelope {
        TransactionEnvelope::Tx(v1) => v1,
        _ => {
            return Err(PaymentError::InvalidTransaction(
                "Unsupported transaction type".to_string(),
            ))
        }
    };

    let max_time = match &v1.tx.cond {
        Preconditions::Time(bounds) => Some(bounds.max_time.0),
        Preconditions::V2(v2) => v2.time_bounds.as_ref().map(|b| b.max_time.0),
        Preconditions::None => None,
    };

    let operations = v1
        .tx
        .operations
        .iter()
        .map(|op| match &op.body {
            OperationBody::Payment(p) => OperationSummary::Payment {
                destination: muxed_to_address(&p.destination),
                asset_code: asset_code_of(&p.asset),
                amount: from_stroops(p.amount),
                stroops: p.amount,
            },
            OperationBody::ChangeTrust(ct) => OperationSummary::ChangeTrust {
                asset_code: match &ct.line {
                    ChangeTrustAsset::CreditAlphanum4(a) => asset_code_string(&a.asset_code.0),
                    ChangeTrustAsset::CreditAlphanum12(a) => asset_code_string(&a.asset_code.0),
                    ChangeTrustAsset::Native => "native".to_string(),
                    ChangeTrustAsset::PoolShare(_) => "pool_share".to_string(),
                },
                limit: from_stroops(ct.limit),
            },
            other => OperationSummary::Other {
                name: other.name().to_string(),
            },
        })
        .collect();

    Ok(EnvelopeSummary {
        source: muxed_to_address(&v1.tx.source_account),
        sequence: v1.tx.seq_num.0,
        fee: v1.tx.fee,
        max_time,
        operations,
        signature_count: v1.signatures.len(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
