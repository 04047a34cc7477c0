// ============================================================================
// PAILOT-PAYMENTS - Token Amounts
// ============================================================================
// Ledger amounts are decimal strings with at most 7 fractional digits,
// carried on the wire as i64 "stroops" (1 token = 10^7 stroops).
// ============================================================================

use crate::error::PaymentError;
use crate::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Stroops per whole token
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Maximum fractional digits the ledger accepts
pub const MAX_DECIMALS: u32 = 7;

/// Parse a positive decimal amount string to stroops
pub fn to_stroops(amount: &str) -> Result<i64> {
    let trimmed = amount.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| PaymentError::InvalidAmount(format!("not a decimal number: {:?}", amount)))?;

    if value <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(format!(
            "amount must be positive: {}",
            trimmed
        )));
    }

    if value.normalize().scale() > MAX_DECIMALS {
        return Err(PaymentError::InvalidAmount(format!(
            "more than {} decimal places: {}",
            MAX_DECIMALS, trimmed
        )));
    }

    value
        .checked_mul(Decimal::from(STROOPS_PER_UNIT))
        .and_then(|stroops| stroops.to_i64())
        .ok_or_else(|| PaymentError::InvalidAmount(format!("amount out of range: {}", trimmed)))
}

/// Format stroops as a ledger decimal string ("12.0000000")
pub fn from_stroops(stroops: i64) -> String {
    Decimal::new(stroops, MAX_DECIMALS).to_string()
}
