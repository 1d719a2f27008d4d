//! # IV-Surface-Lib: Implied Volatility Extraction and Surface Interpolation
//!
//! `iv-surface-lib` turns raw, locale-formatted option-quote rows into a
//! cleaned, numerically consistent set of per-contract implied volatilities,
//! and condenses that set into an interpolated volatility surface on demand.
//!
//! ## Core Features
//!
//! - **Quote Normalization**: locale-aware numeric parsing (`.` thousands,
//!   `,` decimal) with sentinel-aware exclusion of untraded contracts
//! - **Feature Derivation**: expiry, maturity, side and moneyness decoded
//!   from the feed's fixed-layout contract codes
//! - **Implied Volatility**: bracketed Brent inversion of a zero-rate
//!   Black-Scholes-Merton price, with explicit undefined outcomes
//! - **Surface Interpolation**: Delaunay-based linear interpolation of the
//!   (moneyness, maturity) scatter onto a regular grid, no extrapolation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use iv_surface_lib::{build_surface, enrich_snapshot, OptionSide, RawQuoteRow};
//!
//! let rows = vec![
//!     RawQuoteRow::new("OCE20250620C09750", "9.750", "125,30"),
//!     RawQuoteRow::new("OPE20250620P09750", "9.750", "98,15"),
//!     RawQuoteRow::new("OCE20250620C10000", "10.000", "-"), // untraded, dropped
//! ];
//!
//! let snapshot_date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let snapshot = enrich_snapshot(&rows, 10_500.0, snapshot_date)?;
//!
//! for quote in &snapshot.quotes {
//!     println!("{} IV: {:?}", quote.contract_code, quote.implied_vol);
//! }
//!
//! let surface = build_surface(&snapshot, OptionSide::Call)?;
//! println!("grid: {} x {}", surface.ttm_axis.len(), surface.moneyness_axis.len());
//! # Ok::<(), iv_surface_lib::EngineError>(())
//! ```
//!
//! ## Boundaries
//!
//! The crate starts once raw textual quotes and an underlying price are
//! available and ends once each quote carries an implied volatility and a
//! grid surface can be produced. Fetching the feed, persisting snapshots and
//! rendering charts belong to external collaborators.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod chain;
pub mod error;
pub mod pricing;
pub mod surface;

// ================================================================================================
// IMPORTS
// ================================================================================================

use chrono::NaiveDate;
use tracing::{info, warn};

use chain::features::derive_features;
use chain::normalize::normalize_rows;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use chain::types::{ImpliedVol, OptionQuote, OptionSide, RawQuoteRow, Snapshot};
pub use error::{EngineError, Result};
pub use pricing::{implied_vol, option_price, SIGMA_MAX};
pub use surface::{build_surface, expirations, smile_for_expiry, SmilePoint, VolatilitySurface};

// ================================================================================================
// ENRICHMENT PIPELINE
// ================================================================================================

/// Run the full enrichment pipeline for one scrape cycle:
/// normalize raw rows, derive per-contract features, and invert each premium
/// into an implied volatility.
///
/// Input row order is preserved end to end, so the storage collaborator keeps
/// a stable association between each raw row and its enriched counterpart.
///
/// # Errors
///
/// * [`EngineError::InvalidUnderlying`] if `underlying_price` is not a finite
///   positive number (validated once per snapshot).
/// * [`EngineError::MalformedContractCode`] if any retained row's contract
///   code violates the feed's fixed layout: a feed-format change worth
///   surfacing, not a row to drop.
///
/// Unparseable or sentinel-priced rows are excluded silently; non-invertible
/// premiums come back as [`ImpliedVol::Undefined`] on the quote, never as an
/// error.
pub fn enrich_snapshot(
    rows: &[RawQuoteRow],
    underlying_price: f64,
    snapshot_date: NaiveDate,
) -> Result<Snapshot> {
    if !underlying_price.is_finite() || underlying_price <= 0.0 {
        return Err(EngineError::InvalidUnderlying(underlying_price));
    }

    let normalized = normalize_rows(rows);
    let dropped = rows.len() - normalized.len();
    if dropped * 2 > rows.len() {
        warn!(
            total = rows.len(),
            dropped, "more than half of the raw rows were unusable"
        );
    }

    let quotes: Vec<OptionQuote> = normalized
        .into_iter()
        .map(|q| derive_features(q, snapshot_date, underlying_price))
        .collect::<Result<_>>()?;

    let quotes = solve_all(quotes, underlying_price);

    let undefined = quotes.iter().filter(|q| !q.implied_vol.is_defined()).count();
    info!(
        quotes = quotes.len(),
        dropped, undefined, "snapshot enriched"
    );

    Ok(Snapshot {
        date: snapshot_date,
        underlying_price,
        quotes,
    })
}

fn solve_quote(mut quote: OptionQuote, underlying_price: f64) -> OptionQuote {
    quote.implied_vol = implied_vol(
        quote.side,
        underlying_price,
        quote.strike,
        quote.time_to_maturity,
        quote.last_price,
    );
    quote
}

/// Per-quote solves are independent, so with the `parallel` feature the solve
/// step fans out across a rayon pool. `collect` keeps input order either way.
#[cfg(feature = "parallel")]
fn solve_all(quotes: Vec<OptionQuote>, underlying_price: f64) -> Vec<OptionQuote> {
    use rayon::prelude::*;

    quotes
        .into_par_iter()
        .map(|q| solve_quote(q, underlying_price))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn solve_all(quotes: Vec<OptionQuote>, underlying_price: f64) -> Vec<OptionQuote> {
    quotes
        .into_iter()
        .map(|q| solve_quote(q, underlying_price))
        .collect()
}
