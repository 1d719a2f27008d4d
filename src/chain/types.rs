use chrono::NaiveDate;

/// One raw row as delivered by the scraping collaborator.
///
/// `strike_raw` and `last_price_raw` are locale-formatted decimal strings
/// (`.` thousands separator, `,` decimal separator); `last_price_raw` may be
/// the feed's dash-like "no trade" sentinel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawQuoteRow {
    /// Opaque contract identifier encoding side and expiry at fixed offsets.
    pub contract_code: String,
    /// Strike price as localized text.
    pub strike_raw: String,
    /// Last traded premium as localized text, or a "no quote" sentinel.
    pub last_price_raw: String,
}

impl RawQuoteRow {
    pub fn new(
        contract_code: impl Into<String>,
        strike_raw: impl Into<String>,
        last_price_raw: impl Into<String>,
    ) -> Self {
        Self {
            contract_code: contract_code.into(),
            strike_raw: strike_raw.into(),
            last_price_raw: last_price_raw.into(),
        }
    }
}

/// Option side, decoded from the contract code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    /// Moneyness convention: `strike/underlying` for calls,
    /// `underlying/strike` for puts.
    pub fn moneyness(&self, strike: f64, underlying: f64) -> f64 {
        match self {
            OptionSide::Call => strike / underlying,
            OptionSide::Put => underlying / strike,
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionSide::Call => write!(f, "CALL"),
            OptionSide::Put => write!(f, "PUT"),
        }
    }
}

/// Implied-volatility state on a quote.
///
/// A three-state enum rather than a bare `f64` so that "not yet computed",
/// "computed, non-convergent" and "computed, valid" never blur into NaN
/// arithmetic. An undefined value renders as a gap downstream, never as a
/// plotted zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpliedVol {
    /// Enrichment has not run for this quote yet.
    #[default]
    Pending,
    /// The inversion did not converge, or the contract had non-positive
    /// time-to-maturity.
    Undefined,
    /// Implied volatility in percentage points (e.g. `20.0` for 20%).
    Value(f64),
}

impl ImpliedVol {
    /// The volatility in percentage points, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            ImpliedVol::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, ImpliedVol::Value(_))
    }
}

/// One enriched market quote for one contract on one snapshot date.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Contract identifier as supplied by the source feed.
    pub contract_code: String,
    /// Strike price, always > 0 for retained quotes.
    pub strike: f64,
    /// Last traded premium, >= 0.
    pub last_price: f64,
    /// Expiry decoded from the contract code.
    pub expiration_date: NaiveDate,
    /// Whole days from snapshot date to expiry; may be <= 0 for same-day or
    /// expired contracts, which are kept, not filtered.
    pub days_to_expiry: i64,
    /// `days_to_expiry / 365.0`, in years (ACT/365).
    pub time_to_maturity: f64,
    pub side: OptionSide,
    pub moneyness: f64,
    pub implied_vol: ImpliedVol,
}

/// One scrape cycle's worth of data: a single underlying price plus the
/// ordered, enriched quote collection.
///
/// Immutable once created. Persistence and retrieval belong to the storage
/// collaborator; this crate only produces and consumes the two parts. The
/// storage layer may quantize numeric fields to fixed decimal precision; no
/// rounding happens here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Calendar date the quotes were captured.
    pub date: NaiveDate,
    /// Futures/spot price of the underlying, > 0.
    pub underlying_price: f64,
    /// Enriched quotes in original feed order.
    pub quotes: Vec<OptionQuote>,
}

impl Snapshot {
    /// Quotes for one side of the chain.
    pub fn quotes_for_side(&self, side: OptionSide) -> impl Iterator<Item = &OptionQuote> {
        self.quotes.iter().filter(move |q| q.side == side)
    }
}
