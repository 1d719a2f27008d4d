//! Quote-chain handling: raw feed rows in, enriched quotes out.
//!
//! The pipeline is linear and pure: [`normalize`] filters and parses the
//! localized text, [`features`] decodes the fixed-layout contract code, and
//! the pricing module attaches implied volatilities.

pub mod features;
pub mod normalize;
pub mod types;

pub use normalize::{normalize_rows, NormalizedQuote};
pub use types::{ImpliedVol, OptionQuote, OptionSide, RawQuoteRow, Snapshot};
