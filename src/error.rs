//! Error types for the implied-volatility engine.
//!
//! Only structural problems surface as errors: a contract code that no longer
//! matches the feed's fixed layout, a non-positive underlying, or a surface
//! request with too little data to triangulate. Data-quality problems (sentinel
//! prices, unparseable numerics) drop rows silently, and a non-convergent
//! inversion is recorded on the quote as [`ImpliedVol::Undefined`], never
//! raised.
//!
//! [`ImpliedVol::Undefined`]: crate::chain::types::ImpliedVol::Undefined

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during quote enrichment and surface construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The contract identifier does not match the feed's fixed-layout encoding
    /// (side marker at offset 1, `YYYYMMDD` expiry at offsets 3..11).
    ///
    /// This is a feed-contract violation, not a data-quality nuisance: it is
    /// escalated to the caller rather than dropping the row.
    #[error("malformed contract code '{code}': {reason}")]
    MalformedContractCode { code: String, reason: String },

    /// The snapshot's underlying price is not strictly positive.
    ///
    /// Validated once per snapshot, before any per-quote derivation.
    #[error("underlying price must be positive, got {0}")]
    InvalidUnderlying(f64),

    /// Fewer than 3 non-collinear scatter points were available, so no
    /// triangulation exists and the surface is entirely undefined.
    ///
    /// The presentation layer reports this as "surface unavailable".
    #[error("insufficient surface data: {usable} usable point(s), need at least 3 non-collinear")]
    InsufficientSurfaceData { usable: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_code() {
        let err = EngineError::MalformedContractCode {
            code: "OCEXXXXC".into(),
            reason: "expiry substring is not a valid YYYYMMDD date".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("OCEXXXXC"));
        assert!(display.contains("YYYYMMDD"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
