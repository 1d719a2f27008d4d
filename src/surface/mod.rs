//! Volatility-surface construction and smile access for the presentation
//! layer.
//!
//! A surface is a request-scoped artifact: it is rebuilt from the enriched
//! quotes on every call, carries no identity beyond that call, and is never
//! persisted.

pub mod interp;
pub mod smile;

pub use interp::build_surface;
pub use smile::{expirations, smile_for_expiry, SmilePoint};

use crate::chain::types::OptionSide;

/// A regular (moneyness, time-to-maturity) grid of interpolated implied
/// volatilities for one side of the chain.
///
/// Axes are the sorted unique coordinate values observed in the usable input
/// scatter. Cells outside the convex hull of the scatter hold `None`; they
/// render as gaps, never as zeros.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilitySurface {
    pub side: OptionSide,
    /// Sorted unique moneyness values (grid columns).
    pub moneyness_axis: Vec<f64>,
    /// Sorted unique time-to-maturity values in years (grid rows).
    pub ttm_axis: Vec<f64>,
    /// Interpolated volatility in percentage points, `values[ttm_idx][moneyness_idx]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl VolatilitySurface {
    /// Interpolated value at a grid node, if the node lies inside the convex
    /// hull of the input scatter.
    pub fn value_at(&self, moneyness_idx: usize, ttm_idx: usize) -> Option<f64> {
        self.values.get(ttm_idx)?.get(moneyness_idx).copied()?
    }

    /// Number of grid nodes carrying a defined value.
    pub fn defined_count(&self) -> usize {
        self.values
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| v.is_some())
            .count()
    }
}
