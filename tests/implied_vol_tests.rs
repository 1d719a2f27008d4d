mod test_utils;

use chrono::NaiveDate;
use iv_surface_lib::{enrich_snapshot, implied_vol, option_price, ImpliedVol, OptionSide};
use test_utils::raw_row_at_sigma;

/// Non-positive maturity can never be priced: the solver must report
/// undefined, never a finite number.
#[test]
fn non_positive_maturity_is_undefined() {
    for ttm in [0.0, -0.1, -3.0] {
        let iv = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, ttm, 200.0);
        assert_eq!(iv, ImpliedVol::Undefined, "ttm={ttm}");
    }
}

/// Spec scenario: ATM call, underlying 10500, strike 10500, ttm 0.25, premium
/// generated at sigma = 20% must invert back to ~20.0 percentage points.
#[test]
fn atm_call_recovers_twenty_percent() {
    let premium = option_price(OptionSide::Call, 10_500.0, 10_500.0, 0.25, 0.20);
    let iv = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, 0.25, premium);

    let value = iv.value().expect("ATM inversion must be defined");
    assert!(
        (value - 20.0).abs() < 1e-2,
        "expected ~20.0, got {value}"
    );
}

#[test]
fn put_premium_inverts_too() {
    let premium = option_price(OptionSide::Put, 10_500.0, 9_750.0, 0.5, 0.25);
    let iv = implied_vol(OptionSide::Put, 10_500.0, 9_750.0, 0.5, premium);

    let value = iv.value().expect("put inversion must be defined");
    assert!((value - 25.0).abs() < 1e-2, "expected ~25.0, got {value}");
}

/// Short-dated ATM contracts have large vega: inversion must stay tight.
#[test]
fn short_dated_atm_is_stable() {
    let ttm = 2.0 / 365.0;
    let premium = option_price(OptionSide::Call, 10_500.0, 10_500.0, ttm, 0.18);
    let iv = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, ttm, premium);

    let value = iv.value().expect("short-dated ATM must be defined");
    assert!((value - 18.0).abs() < 1e-2, "expected ~18.0, got {value}");
}

#[test]
fn out_of_the_money_call_recovers_sigma() {
    let premium = option_price(OptionSide::Call, 10_500.0, 12_000.0, 0.25, 0.30);
    let iv = implied_vol(OptionSide::Call, 10_500.0, 12_000.0, 0.25, premium);

    let value = iv.value().expect("OTM inversion must be defined");
    assert!((value - 30.0).abs() < 5e-2, "expected ~30.0, got {value}");
}

/// A call can never be worth more than the underlying under this model: a
/// premium above the sigma = 5 ceiling has no root.
#[test]
fn premium_above_achievable_range_is_undefined() {
    let iv = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, 0.25, 11_000.0);
    assert_eq!(iv, ImpliedVol::Undefined);
}

/// A premium below intrinsic value has no root either (stale or crossed
/// quote); the solver must degrade to undefined, not a wrong finite sigma.
#[test]
fn premium_below_intrinsic_is_undefined() {
    // Intrinsic value of this call is 1500.
    let iv = implied_vol(OptionSide::Call, 10_500.0, 9_000.0, 0.25, 1_400.0);
    assert_eq!(iv, ImpliedVol::Undefined);
}

#[test]
fn garbage_premiums_are_undefined() {
    for premium in [f64::NAN, f64::INFINITY, -1.0] {
        let iv = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, 0.25, premium);
        assert_eq!(iv, ImpliedVol::Undefined);
    }
}

/// Identical inputs must yield bit-identical outputs, defined or not.
#[test]
fn solver_is_deterministic() {
    let premium = option_price(OptionSide::Call, 10_500.0, 11_000.0, 0.25, 0.22);
    let first = implied_vol(OptionSide::Call, 10_500.0, 11_000.0, 0.25, premium);
    let second = implied_vol(OptionSide::Call, 10_500.0, 11_000.0, 0.25, premium);
    assert_eq!(first, second);

    let undef_a = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, -1.0, premium);
    let undef_b = implied_vol(OptionSide::Call, 10_500.0, 10_500.0, -1.0, premium);
    assert_eq!(undef_a, undef_b);
}

/// End to end: a locale-formatted feed row whose premium was generated at a
/// known sigma comes out of the pipeline with that sigma attached.
#[test]
fn pipeline_attaches_recovered_sigma() {
    let snapshot_date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let ttm = 98.0 / 365.0; // 2025-03-14 -> 2025-06-20
    let rows = vec![raw_row_at_sigma(
        OptionSide::Call,
        "20250620",
        10_500.0,
        10_500.0,
        ttm,
        20.0,
    )];

    let snapshot = enrich_snapshot(&rows, 10_500.0, snapshot_date).expect("enrichment failed");
    let value = snapshot.quotes[0]
        .implied_vol
        .value()
        .expect("IV must be defined");

    // The raw row carries the premium rounded to two decimals, so allow a
    // slightly looser tolerance than the direct inversion tests.
    assert!((value - 20.0).abs() < 0.05, "expected ~20.0, got {value}");
}
