//! Per-expiration smile access: the raw (strike, implied volatility) pairs
//! the dashboard plots for one expiry and side.

use chrono::NaiveDate;

use crate::chain::types::{OptionSide, Snapshot};

/// One point on a volatility smile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmilePoint {
    pub strike: f64,
    /// Implied volatility in percentage points.
    pub implied_vol: f64,
}

/// Sorted unique expiration dates present in a snapshot.
pub fn expirations(snapshot: &Snapshot) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = snapshot.quotes.iter().map(|q| q.expiration_date).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// The smile for one expiration and side, sorted by strike.
///
/// Quotes whose implied volatility is undefined are omitted: they appear as
/// gaps in the plotted smile, never as zeros.
pub fn smile_for_expiry(snapshot: &Snapshot, expiry: NaiveDate, side: OptionSide) -> Vec<SmilePoint> {
    let mut points: Vec<SmilePoint> = snapshot
        .quotes_for_side(side)
        .filter(|q| q.expiration_date == expiry)
        .filter_map(|q| {
            q.implied_vol.value().map(|implied_vol| SmilePoint {
                strike: q.strike,
                implied_vol,
            })
        })
        .collect();

    points.sort_by(|a, b| a.strike.partial_cmp(&b.strike).unwrap());
    points
}
