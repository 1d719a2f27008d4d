//! Implied-volatility inversion: find the σ that reproduces an observed
//! premium under the zero-rate pricing model.
//!
//! The price is monotone in σ for positive maturity, so a bracketed Brent
//! search over [0, [`SIGMA_MAX`]] is robust; a short vega-based Newton polish
//! tightens the result where vega allows. Every failure mode degrades to
//! [`ImpliedVol::Undefined`] rather than a wrong finite number or a panic:
//! expired contracts, premiums outside the achievable range, non-convergence,
//! and near-zero-vega regimes where the model price is insensitive to σ.

use roots::{find_root_brent, SimpleConvergency};
use statrs::distribution::{Continuous, Normal};
use tracing::trace;

use super::{intrinsic_value, option_price};
use crate::chain::types::{ImpliedVol, OptionSide};

/// Upper bound of the volatility search bracket (500% annualized).
pub const SIGMA_MAX: f64 = 5.0;

/// Acceptance tolerance on the reproduced price.
const PRICE_TOL: f64 = 1e-4;

/// Iteration cap for the bracketed search; acts as the implicit cancellation
/// rule for pathological inputs.
const MAX_ITER: usize = 100;

/// Newton polish steps after the bracketed search.
const REFINE_STEPS: usize = 3;

/// Vega under zero rate and dividend yield: `F * phi(d1) * sqrt(t)`.
fn vega(underlying: f64, strike: f64, t: f64, sigma: f64) -> f64 {
    if t <= 0.0 || sigma <= 0.0 {
        return 0.0;
    }
    let sqrt_t = t.sqrt();
    let d1 = ((underlying / strike).ln() + 0.5 * sigma * sigma * t) / (sigma * sqrt_t);
    let normal = Normal::new(0.0, 1.0).unwrap();
    underlying * normal.pdf(d1) * sqrt_t
}

/// Invert the pricing model for one quote.
///
/// Deterministic: identical inputs always yield the identical result, defined
/// or not. The returned volatility is on the percentage scale (σ* × 100).
pub fn implied_vol(
    side: OptionSide,
    underlying: f64,
    strike: f64,
    time_to_maturity: f64,
    last_price: f64,
) -> ImpliedVol {
    // An expired or same-day contract cannot be priced under this model.
    if time_to_maturity <= 0.0 {
        return ImpliedVol::Undefined;
    }
    if !last_price.is_finite() || last_price < 0.0 {
        return ImpliedVol::Undefined;
    }

    // Achievable price range for sigma in [0, SIGMA_MAX]; a premium outside it
    // has no root and is rejected up front instead of burning iterations.
    let floor = intrinsic_value(side, underlying, strike);
    let ceiling = option_price(side, underlying, strike, time_to_maturity, SIGMA_MAX);
    if last_price < floor - PRICE_TOL || last_price > ceiling + PRICE_TOL {
        trace!(
            side = %side, strike, last_price, floor, ceiling,
            "premium outside achievable range"
        );
        return ImpliedVol::Undefined;
    }

    let objective =
        |sigma: f64| option_price(side, underlying, strike, time_to_maturity, sigma) - last_price;

    let mut convergency = SimpleConvergency {
        eps: 1e-9f64,
        max_iter: MAX_ITER,
    };
    let mut sigma = match find_root_brent(0.0, SIGMA_MAX, &objective, &mut convergency) {
        Ok(root) => root,
        Err(_) => {
            trace!(side = %side, strike, last_price, "bracketed search failed to converge");
            return ImpliedVol::Undefined;
        }
    };

    // Newton polish where vega carries enough signal; skipped otherwise.
    for _ in 0..REFINE_STEPS {
        let v = vega(underlying, strike, time_to_maturity, sigma);
        if v < 1e-12 {
            break;
        }
        let step = objective(sigma) / v;
        let next = (sigma - step).clamp(0.0, SIGMA_MAX);
        if (next - sigma).abs() < 1e-12 {
            break;
        }
        sigma = next;
    }

    // Accept only a root that actually reproduces the market premium; in
    // near-zero-vega regimes the search can stall on a flat objective.
    if !sigma.is_finite() || sigma < 0.0 || objective(sigma).abs() > PRICE_TOL {
        return ImpliedVol::Undefined;
    }

    ImpliedVol::Value(sigma * 100.0)
}
