//! Feature derivation: expiry, maturity, side and moneyness from the
//! fixed-layout contract code.
//!
//! The feed encodes the side marker at byte offset 1 and an eight-digit
//! `YYYYMMDD` expiry at offsets 3..11 (e.g. `OCE20250620C09750`). These
//! offsets are a preserved feed contract: they are deliberately not
//! generalized, and a code that violates them fails the quote loudly.

use chrono::NaiveDate;

use super::normalize::NormalizedQuote;
use super::types::{ImpliedVol, OptionQuote, OptionSide};
use crate::error::{EngineError, Result};

/// Byte offset of the call/put marker in the contract code.
const SIDE_OFFSET: usize = 1;
/// Byte range of the `YYYYMMDD` expiry substring.
const EXPIRY_RANGE: std::ops::Range<usize> = 3..11;
/// ACT/365 day count, matching the source feed's convention.
const DAYS_PER_YEAR: f64 = 365.0;

fn malformed(code: &str, reason: impl Into<String>) -> EngineError {
    EngineError::MalformedContractCode {
        code: code.to_string(),
        reason: reason.into(),
    }
}

/// Decode the expiry date from offsets 3..11 of the contract code.
pub fn expiration_date(contract_code: &str) -> Result<NaiveDate> {
    let digits = contract_code
        .get(EXPIRY_RANGE)
        .ok_or_else(|| malformed(contract_code, "shorter than the fixed expiry field"))?;

    NaiveDate::parse_from_str(digits, "%Y%m%d")
        .map_err(|_| malformed(contract_code, format!("'{digits}' is not a YYYYMMDD date")))
}

/// Decode the option side from the marker at offset 1.
///
/// Only `C` and `P` are accepted; any other marker is treated as a
/// feed-format violation rather than defaulting to a side.
pub fn side(contract_code: &str) -> Result<OptionSide> {
    match contract_code.as_bytes().get(SIDE_OFFSET) {
        Some(b'C') => Ok(OptionSide::Call),
        Some(b'P') => Ok(OptionSide::Put),
        Some(other) => Err(malformed(
            contract_code,
            format!("side marker '{}' is neither C nor P", *other as char),
        )),
        None => Err(malformed(contract_code, "shorter than the side marker field")),
    }
}

/// Derive all per-quote features for one normalized quote.
///
/// `underlying_price > 0` is a caller-level precondition, validated once per
/// snapshot, not re-checked here. `days_to_expiry` may be zero or negative;
/// such quotes are kept and later marked [`ImpliedVol::Undefined`] by the
/// solver.
pub fn derive_features(
    quote: NormalizedQuote,
    snapshot_date: NaiveDate,
    underlying_price: f64,
) -> Result<OptionQuote> {
    let expiration = expiration_date(&quote.contract_code)?;
    let side = side(&quote.contract_code)?;

    let days_to_expiry = (expiration - snapshot_date).num_days();
    let time_to_maturity = days_to_expiry as f64 / DAYS_PER_YEAR;
    let moneyness = side.moneyness(quote.strike, underlying_price);

    Ok(OptionQuote {
        contract_code: quote.contract_code,
        strike: quote.strike,
        last_price: quote.last_price,
        expiration_date: expiration,
        days_to_expiry,
        time_to_maturity,
        side,
        moneyness,
        implied_vol: ImpliedVol::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_substring_round_trips() {
        let date = expiration_date("OCE20250620C09750").unwrap();
        assert_eq!(date.format("%Y%m%d").to_string(), "20250620");
    }

    #[test]
    fn side_marker_decodes() {
        assert_eq!(side("OCE20250620C09750").unwrap(), OptionSide::Call);
        assert_eq!(side("OPE20250620P09750").unwrap(), OptionSide::Put);
    }

    #[test]
    fn unknown_side_marker_is_malformed() {
        let err = side("OXE20250620C09750").unwrap_err();
        assert!(matches!(err, EngineError::MalformedContractCode { .. }));
    }

    #[test]
    fn short_code_is_malformed() {
        assert!(expiration_date("OC").is_err());
        assert!(side("").is_err());
    }

    #[test]
    fn impossible_calendar_date_is_malformed() {
        let err = expiration_date("OCE20251340C09750").unwrap_err();
        assert!(matches!(err, EngineError::MalformedContractCode { .. }));
    }
}
