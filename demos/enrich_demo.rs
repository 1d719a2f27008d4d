use chrono::NaiveDate;
use iv_surface_lib::{enrich_snapshot, expirations, smile_for_expiry, OptionSide, RawQuoteRow};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Quote Enrichment Demo");
    println!("=====================");

    // Raw rows as the scraping collaborator delivers them: locale-formatted
    // numerics, dash sentinel for untraded contracts.
    let rows = vec![
        RawQuoteRow::new("OCE20250620C09750", "9.750", "822,40"),
        RawQuoteRow::new("OCE20250620C10500", "10.500", "310,00"),
        RawQuoteRow::new("OCE20250620C11250", "11.250", "65,10"),
        RawQuoteRow::new("OPE20250620P09750", "9.750", "72,15"),
        RawQuoteRow::new("OPE20250620P10500", "10.500", "309,55"),
        RawQuoteRow::new("OPE20250620P11250", "11.250", "-"),
        RawQuoteRow::new("OCE20250919C10500", "10.500", "478,90"),
        RawQuoteRow::new("OPE20250919P10500", "10.500", "480,20"),
    ];

    let underlying = 10_500.0;
    let snapshot_date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let snapshot = enrich_snapshot(&rows, underlying, snapshot_date)?;

    println!("\nUnderlying (futures): {underlying}");
    println!(
        "{} raw rows -> {} enriched quotes\n",
        rows.len(),
        snapshot.quotes.len()
    );

    println!(
        "{:<20} {:>8} {:>9} {:>5} {:>10} {:>8}",
        "contract", "strike", "last", "dte", "moneyness", "iv%"
    );
    for q in &snapshot.quotes {
        let iv = q
            .implied_vol
            .value()
            .map_or_else(|| "undef".to_string(), |v| format!("{v:.2}"));
        println!(
            "{:<20} {:>8.0} {:>9.2} {:>5} {:>10.4} {:>8}",
            q.contract_code, q.strike, q.last_price, q.days_to_expiry, q.moneyness, iv
        );
    }

    for expiry in expirations(&snapshot) {
        let smile = smile_for_expiry(&snapshot, expiry, OptionSide::Call);
        println!("\nCall smile for {expiry}:");
        for point in smile {
            println!("  strike {:>8.0}  iv {:>6.2}%", point.strike, point.implied_vol);
        }
    }

    Ok(())
}
