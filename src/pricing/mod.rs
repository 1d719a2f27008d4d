//! Black-Scholes-Merton pricing with both the risk-free rate and the dividend
//! yield fixed at zero, matching the source feed's convention of quoting
//! against the futures price. This is not a general-purpose pricing library;
//! the discount factors are deliberately absent.

pub mod implied;

pub use implied::{implied_vol, SIGMA_MAX};

use crate::chain::types::OptionSide;

fn norm_cdf(x: f64) -> f64 {
    // 0.5 * [1 + erf(x / sqrt(2))]
    0.5 * (1.0 + libm::erf(x / (2.0_f64).sqrt()))
}

/// European option price under zero rate and zero dividend yield.
///
/// `underlying` is the snapshot's futures price. Degenerate inputs
/// (`t <= 0` or `sigma <= 0`) collapse to intrinsic value.
pub fn option_price(side: OptionSide, underlying: f64, strike: f64, t: f64, sigma: f64) -> f64 {
    if t <= 0.0 || sigma <= 0.0 {
        return intrinsic_value(side, underlying, strike);
    }

    let sqrt_t = t.sqrt();
    let d1 = ((underlying / strike).ln() + 0.5 * sigma * sigma * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;

    match side {
        OptionSide::Call => underlying * norm_cdf(d1) - strike * norm_cdf(d2),
        OptionSide::Put => strike * norm_cdf(-d2) - underlying * norm_cdf(-d1),
    }
}

/// Option payoff at zero volatility (the lower bound of the achievable
/// price range under this model).
pub fn intrinsic_value(side: OptionSide, underlying: f64, strike: f64) -> f64 {
    match side {
        OptionSide::Call => (underlying - strike).max(0.0),
        OptionSide::Put => (strike - underlying).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_call_parity_zero_rates() {
        // With r = q = 0: call - put = F - K.
        let (f, k, t, sigma) = (10500.0, 10000.0, 0.25, 0.2);
        let call = option_price(OptionSide::Call, f, k, t, sigma);
        let put = option_price(OptionSide::Put, f, k, t, sigma);
        assert!(((call - put) - (f - k)).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_collapse_to_intrinsic() {
        assert_eq!(option_price(OptionSide::Call, 110.0, 100.0, 0.0, 0.2), 10.0);
        assert_eq!(option_price(OptionSide::Put, 110.0, 100.0, 0.25, 0.0), 0.0);
    }

    #[test]
    fn price_increases_with_volatility() {
        let lo = option_price(OptionSide::Call, 100.0, 100.0, 0.5, 0.1);
        let hi = option_price(OptionSide::Call, 100.0, 100.0, 0.5, 0.4);
        assert!(hi > lo);
    }
}
