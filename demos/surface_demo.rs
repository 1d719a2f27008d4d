use chrono::NaiveDate;
use iv_surface_lib::{build_surface, enrich_snapshot, option_price, OptionSide, RawQuoteRow};

/// Format a number the way the feed prints it (`.` thousands, `,` decimal).
fn locale_fmt(value: f64) -> String {
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Volatility Surface Demo");
    println!("=======================");

    let underlying: f64 = 10_500.0;
    let snapshot_date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    // Synthesize a two-expiry chain whose premiums follow a mild smile, then
    // feed it through the pipeline as locale-formatted text.
    let mut rows = Vec::new();
    for (expiry, dte) in [("20250620", 98.0), ("20250919", 189.0)] {
        let ttm = dte / 365.0;
        for strike in [9_000.0, 9_750.0, 10_500.0, 11_250.0, 12_000.0] {
            let smile_sigma = 0.20 + 0.08 * ((strike / underlying) - 1.0).powi(2) * 10.0;
            let premium = option_price(OptionSide::Call, underlying, strike, ttm, smile_sigma);
            rows.push(RawQuoteRow::new(
                format!("OCE{expiry}C{:05}", strike as u64),
                locale_fmt(strike),
                locale_fmt(premium),
            ));
        }
    }

    let snapshot = enrich_snapshot(&rows, underlying, snapshot_date)?;
    let surface = build_surface(&snapshot, OptionSide::Call)?;

    println!(
        "\nGrid: {} maturities x {} moneyness levels, {} defined nodes\n",
        surface.ttm_axis.len(),
        surface.moneyness_axis.len(),
        surface.defined_count()
    );

    print!("{:>10}", "ttm\\mny");
    for m in &surface.moneyness_axis {
        print!("{m:>9.4}");
    }
    println!();

    for (ti, t) in surface.ttm_axis.iter().enumerate() {
        print!("{t:>10.4}");
        for mi in 0..surface.moneyness_axis.len() {
            match surface.value_at(mi, ti) {
                Some(v) => print!("{v:>9.2}"),
                None => print!("{:>9}", "."),
            }
        }
        println!();
    }

    Ok(())
}
