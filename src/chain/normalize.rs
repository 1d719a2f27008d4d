//! Quote normalization: localized numeric text to numbers, unusable rows out.
//!
//! The feed prints decimals in a locale where `.` separates thousands and `,`
//! marks the decimal point (`"10.500"` is ten thousand five hundred,
//! `"125,30"` is 125.30), and marks untraded contracts with a dash. This is a
//! data-quality filter: anything unusable is dropped, never escalated.

use tracing::debug;

use super::types::RawQuoteRow;

/// A raw row after sentinel filtering and numeric normalization, before
/// feature derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuote {
    pub contract_code: String,
    pub strike: f64,
    pub last_price: f64,
}

/// True if `last_price_raw` is the feed's "no trade" marker: empty/whitespace
/// or containing a dash-like character.
pub fn is_no_quote(last_price_raw: &str) -> bool {
    let trimmed = last_price_raw.trim();
    trimmed.is_empty() || trimmed.contains('-') || trimmed.contains('\u{2013}')
}

/// Parse a locale-formatted decimal: strip `.` thousands separators, swap the
/// `,` decimal comma for `.`, then parse. Returns `None` for non-numeric
/// residue or non-finite results.
pub fn parse_localized_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Normalize one raw row, or report why it is unusable.
///
/// Exclusion reasons are internal: callers of [`normalize_rows`] only observe
/// a smaller output set.
fn normalize_row(row: &RawQuoteRow) -> Option<NormalizedQuote> {
    if is_no_quote(&row.last_price_raw) {
        debug!(code = %row.contract_code, "dropping row: no-quote sentinel");
        return None;
    }

    let Some(strike) = parse_localized_decimal(&row.strike_raw) else {
        debug!(code = %row.contract_code, strike_raw = %row.strike_raw,
            "dropping row: unparseable strike");
        return None;
    };
    let Some(last_price) = parse_localized_decimal(&row.last_price_raw) else {
        debug!(code = %row.contract_code, last_price_raw = %row.last_price_raw,
            "dropping row: unparseable last price");
        return None;
    };

    // Retained-quote invariants: strike strictly positive, premium non-negative.
    if strike <= 0.0 {
        debug!(code = %row.contract_code, strike, "dropping row: non-positive strike");
        return None;
    }
    if last_price < 0.0 {
        debug!(code = %row.contract_code, last_price, "dropping row: negative last price");
        return None;
    }

    Some(NormalizedQuote {
        contract_code: row.contract_code.clone(),
        strike,
        last_price,
    })
}

/// Normalize a batch of raw rows, preserving input order.
///
/// Rows that fail the sentinel or numeric checks are dropped silently; the
/// only trace is a smaller output and a debug log line per exclusion.
pub fn normalize_rows(rows: &[RawQuoteRow]) -> Vec<NormalizedQuote> {
    let normalized: Vec<NormalizedQuote> = rows.iter().filter_map(normalize_row).collect();

    let dropped = rows.len() - normalized.len();
    if dropped > 0 {
        debug!(total = rows.len(), dropped, "normalization excluded rows");
    }

    normalized
}
