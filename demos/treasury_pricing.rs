//! Treasury-bill pricing walkthrough.
//!
//! Shows the full chain for the one computed category: tenor parsing,
//! curve interpolation, discounting, and the final comparison.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use valuation_recon::core::isin::Isin;
use valuation_recon::core::reference::ReferenceRecord;
use valuation_recon::core::sources::CurveObservation;
use valuation_recon::curve::interpolate::YieldCurve;
use valuation_recon::curve::tenor::{calendar_days_between, tenor_to_days};
use valuation_recon::recon::treasury::{self, discounted_price};

fn main() {
    println!("╔══════════════════════════════════════════════════╗");
    println!("║  valuation-recon: Treasury Pricing Walkthrough   ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    // --- Step 1: parse the published tenors ---
    println!("━━━ Step 1: Tenor Parsing ━━━\n");
    for tenor in ["7 Days", "1M", "3M", "6M", "1Y"] {
        match tenor_to_days(tenor) {
            Some(days) => println!("  {:<8} → {:>4} days", tenor, days),
            None => println!("  {:<8} → unparseable", tenor),
        }
    }
    println!();

    // --- Step 2: build the curve ---
    println!("━━━ Step 2: Curve Construction ━━━\n");
    let observations = vec![
        CurveObservation::new("1M", dec!(6.00)),
        CurveObservation::new("3M", dec!(6.50)),
        CurveObservation::new("6M", dec!(6.75)),
        CurveObservation::new("-- select --", dec!(9.99)),
    ];
    let curve = YieldCurve::build(&observations).unwrap();
    println!(
        "  {} of {} observations survived validation",
        curve.len(),
        observations.len()
    );
    for point in curve.points() {
        println!("  {:<8} {:>4} days at {}%", point.tenor, point.days, point.rate);
    }
    println!();

    // --- Step 3: interpolate and discount ---
    println!("━━━ Step 3: Interpolation and Discounting ━━━\n");
    for days in [15i64, 60, 120, 365] {
        let rate = curve.rate_at(days);
        let price = discounted_price(dec!(100), rate, days);
        println!("  {:>3} days: yield {:>7}%  price {:>6}", days, rate.round_dp(4), price);
    }
    println!();

    // --- Step 4: the comparison itself ---
    println!("━━━ Step 4: Reconciliation ━━━\n");
    let valuation = NaiveDate::from_ymd_opt(2025, 6, 27).unwrap();
    let maturity = NaiveDate::from_ymd_opt(2025, 8, 26).unwrap();
    println!(
        "  Bill matures {} days after valuation date",
        calendar_days_between(valuation, maturity)
    );

    let bills = vec![
        // Stated 99.00 against a computed 98.98.
        ReferenceRecord::new(Isin::new("IN002025X011"), "Treasury Bills", dec!(99.00))
            .with_face_value(dec!(100))
            .with_dates(valuation, maturity),
        // Stated exactly at the computed price.
        ReferenceRecord::new(Isin::new("IN002025X029"), "Treasury Bills", dec!(98.98))
            .with_face_value(dec!(100))
            .with_dates(valuation, maturity),
    ];
    let mismatches = treasury::reconcile(&bills, &observations);

    for mismatch in &mismatches {
        println!("  flagged: {}", mismatch);
    }
    println!(
        "\n  {} of {} bills flagged",
        mismatches.len(),
        bills.len()
    );
}
