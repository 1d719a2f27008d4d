#![allow(dead_code)] // Each test binary uses a subset of these helpers.

use chrono::NaiveDate;
use iv_surface_lib::{option_price, ImpliedVol, OptionQuote, OptionSide, RawQuoteRow, Snapshot};

/// Format a non-negative number the way the feed prints it: `.` as the
/// thousands separator, `,` as the decimal comma, two decimals.
/// `10500.0` -> `"10.500,00"`.
pub fn locale_fmt(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (int_part, frac_part) = formatted.split_once('.').unwrap();

    let mut grouped = String::new();
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit as char);
    }
    format!("{grouped},{frac_part}")
}

/// Build a feed-layout contract code: side marker at offset 1, `YYYYMMDD`
/// expiry at offsets 3..11, strike tag after.
pub fn contract_code(side: OptionSide, expiry: &str, strike: f64) -> String {
    let marker = match side {
        OptionSide::Call => 'C',
        OptionSide::Put => 'P',
    };
    format!("O{marker}E{expiry}{marker}{:05}", strike as u64)
}

/// A raw feed row with locale-formatted numerics. `last_price = None` yields
/// the "no trade" dash sentinel.
pub fn raw_row(
    side: OptionSide,
    expiry: &str,
    strike: f64,
    last_price: Option<f64>,
) -> RawQuoteRow {
    RawQuoteRow::new(
        contract_code(side, expiry, strike),
        locale_fmt(strike),
        last_price.map_or_else(|| "-".to_string(), locale_fmt),
    )
}

/// A raw feed row whose premium is consistent with `sigma_pct` (percentage
/// points) under the zero-rate pricing model.
pub fn raw_row_at_sigma(
    side: OptionSide,
    expiry: &str,
    strike: f64,
    underlying: f64,
    ttm: f64,
    sigma_pct: f64,
) -> RawQuoteRow {
    let price = option_price(side, underlying, strike, ttm, sigma_pct / 100.0);
    raw_row(side, expiry, strike, Some(price))
}

/// An already-enriched quote placed directly at (moneyness, ttm) for surface
/// tests, bypassing the solver.
pub fn scatter_quote(side: OptionSide, moneyness: f64, ttm: f64, iv: ImpliedVol) -> OptionQuote {
    OptionQuote {
        contract_code: contract_code(side, "20250620", moneyness * 10_000.0),
        strike: moneyness * 10_000.0,
        last_price: 100.0,
        expiration_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
        days_to_expiry: (ttm * 365.0).round() as i64,
        time_to_maturity: ttm,
        side,
        moneyness,
        implied_vol: iv,
    }
}

/// A snapshot wrapping pre-built quotes.
pub fn snapshot_of(quotes: Vec<OptionQuote>) -> Snapshot {
    Snapshot {
        date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        underlying_price: 10_000.0,
        quotes,
    }
}
