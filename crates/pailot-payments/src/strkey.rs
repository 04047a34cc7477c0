// ============================================================================
// PAILOT-PAYMENTS - StrKey Encoding/Decoding
// ============================================================================
// Account ids on the ledger are "StrKey" encoded Ed25519 public keys:
// base32(version byte + key + CRC16 checksum), always starting with 'G'.
// ============================================================================

use crate::error::PaymentError;
use crate::Result;
use stellar_xdr::curr::{AccountId, MuxedAccount, PublicKey, Uint256};

/// Decode a G... account id to raw Ed25519 public key bytes
pub fn decode_account_id(address: &str) -> Result<[u8; 32]> {
    let key: stellar_strkey::ed25519::PublicKey = address
        .parse()
        .map_err(|e| PaymentError::InvalidAccountId(format!("{}: {:?}", address, e)))?;
    Ok(key.0)
}

/// Encode raw Ed25519 public key bytes as a G... account id
pub fn encode_account_id(key_bytes: &[u8; 32]) -> String {
    stellar_strkey::ed25519::PublicKey(*key_bytes).to_string()
}

/// Check an account id without keeping the decoded key
pub fn is_valid_account_id(address: &str) -> bool {
    decode_account_id(address).is_ok()
}

/// XDR `AccountId` for a G... address
pub(crate) fn account_id(address: &str) -> Result<AccountId> {
    let bytes = decode_account_id(address)?;
    Ok(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(bytes))))
}

/// XDR `MuxedAccount` (plain ed25519 variant) for a G... address
pub(crate) fn muxed_account(address: &str) -> Result<MuxedAccount> {
    let bytes = decode_account_id(address)?;
    Ok(MuxedAccount::Ed25519(Uint256(bytes)))
}

/// G... address of an XDR `MuxedAccount`
pub(crate) fn muxed_to_address(account: &MuxedAccount) -> String {
    match account {
        MuxedAccount::Ed25519(Uint256(bytes)) => encode_account_id(bytes),
        MuxedAccount::MuxedEd25519(muxed) => encode_account_id(&muxed.ed25519.0),
    }
}

// ============================================================================
// TESTS
// ============================================================================
