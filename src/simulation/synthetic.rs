//! Synthetic valuation runs for demos, stress tests and benchmarks.
//!
//! Generates reference rows with corroborating quotes at configurable
//! mismatch and missing-data rates, across all six categories.

use crate::core::isin::Isin;
use crate::core::reference::ReferenceRecord;
use crate::core::run::{RunId, ValuationRun};
use crate::core::sources::{
    CdQuote, CorporateTrade, CurveObservation, GsecQuote, NseQuote, SdlQuote, SlvQuote,
    StripsQuote,
};
use crate::curve::interpolate::YieldCurve;
use crate::recon::treasury::discounted_price;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a synthetic run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Reference rows per category.
    pub instruments_per_category: usize,
    /// Fraction of corroborated rows whose market price is pushed out
    /// of tolerance.
    pub mismatch_rate: f64,
    /// Fraction of reference rows left without corroborating data.
    pub missing_rate: f64,
    /// Valuation date stamped on treasury bills.
    pub valuation_date: NaiveDate,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            instruments_per_category: 50,
            mismatch_rate: 0.05,
            missing_rate: 0.02,
            valuation_date: NaiveDate::from_ymd_opt(2025, 6, 27).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// What one generated instrument should do when reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Clean,
    Mismatched,
    Missing,
}

fn roll_outcome(rng: &mut impl Rng, config: &RunConfig) -> Outcome {
    if rng.gen::<f64>() < config.missing_rate {
        Outcome::Missing
    } else if rng.gen::<f64>() < config.mismatch_rate {
        Outcome::Mismatched
    } else {
        Outcome::Clean
    }
}

fn random_price(rng: &mut impl Rng) -> Decimal {
    Decimal::from_f64_retain(rng.gen_range(80.0..120.0))
        .unwrap_or(dec!(100))
        .round_dp(2)
}

/// An offset comfortably beyond every category tolerance.
fn out_of_tolerance_offset(rng: &mut impl Rng) -> Decimal {
    Decimal::from_f64_retain(rng.gen_range(0.5..5.0))
        .unwrap_or(dec!(1))
        .round_dp(2)
}

/// Generate a full synthetic run covering all six categories.
pub fn generate_run(config: &RunConfig) -> ValuationRun {
    let mut rng = rand::thread_rng();
    let mut run = ValuationRun::new(RunId::new());

    generate_central_govt(&mut run, &mut rng, config);
    generate_state_govt(&mut run, &mut rng, config);
    generate_equities(&mut run, &mut rng, config);
    generate_treasury_bills(&mut run, &mut rng, config);
    generate_cds(&mut run, &mut rng, config);
    generate_corporates(&mut run, &mut rng, config);
    run
}

fn generate_central_govt(run: &mut ValuationRun, rng: &mut impl Rng, config: &RunConfig) {
    for i in 0..config.instruments_per_category {
        let isin = Isin::new(format!("IN00{:08}", i));
        let price = random_price(rng);
        run.add_reference(ReferenceRecord::new(
            isin.clone(),
            "CENTRAL GOVT BONDS",
            price,
        ));
        let quote = match roll_outcome(rng, config) {
            Outcome::Missing => continue,
            Outcome::Mismatched => price + out_of_tolerance_offset(rng),
            Outcome::Clean => price,
        };
        // Alternate rows between the two sources the category merges.
        if i % 2 == 0 {
            run.add_gsec(GsecQuote::new(isin, quote));
        } else {
            run.add_strips(StripsQuote::new(isin, quote));
        }
    }
}

fn generate_state_govt(run: &mut ValuationRun, rng: &mut impl Rng, config: &RunConfig) {
    for i in 0..config.instruments_per_category {
        let isin = Isin::new(format!("IN10{:08}", i));
        let price = random_price(rng);
        run.add_reference(ReferenceRecord::new(
            isin.clone(),
            "STATE GOVT BONDS",
            price,
        ));
        match roll_outcome(rng, config) {
            Outcome::Missing => {}
            Outcome::Mismatched => {
                run.add_sdl(SdlQuote::new(isin, price + out_of_tolerance_offset(rng)));
            }
            Outcome::Clean => {
                run.add_sdl(SdlQuote::new(isin, price));
            }
        }
    }
}

fn generate_equities(run: &mut ValuationRun, rng: &mut impl Rng, config: &RunConfig) {
    for i in 0..config.instruments_per_category {
        let isin = Isin::new(format!("INE{:06}E01", i));
        let price = random_price(rng);
        run.add_reference(ReferenceRecord::new(isin.clone(), "EQUITY SHARES", price));
        let settlement = match roll_outcome(rng, config) {
            Outcome::Missing => continue,
            Outcome::Mismatched => price + out_of_tolerance_offset(rng),
            Outcome::Clean => price,
        };
        run.add_nse(NseQuote {
            ticker: Some(format!("SYN{:03}", i)),
            ..NseQuote::new(isin, settlement)
        });
    }
}

fn generate_treasury_bills(run: &mut ValuationRun, rng: &mut impl Rng, config: &RunConfig) {
    let observations = vec![
        CurveObservation::new("7 Days", dec!(5.80)),
        CurveObservation::new("14 Days", dec!(5.90)),
        CurveObservation::new("1M", dec!(6.00)),
        CurveObservation::new("3M", dec!(6.50)),
        CurveObservation::new("6M", dec!(6.75)),
        CurveObservation::new("1Y", dec!(7.10)),
    ];
    for obs in &observations {
        run.add_curve_observation(obs.clone());
    }
    let curve = match YieldCurve::build(&observations) {
        Some(curve) => curve,
        None => return,
    };

    for i in 0..config.instruments_per_category {
        let isin = Isin::new(format!("IN0025TB{:04}", i));
        let days: i64 = rng.gen_range(7..365);
        let maturity = config.valuation_date + Duration::days(days);
        let fair = discounted_price(dec!(100), curve.rate_at(days), days);
        match roll_outcome(rng, config) {
            // A bill without dates is the treasury analog of a missing
            // quote: the rule skips it.
            Outcome::Missing => {
                run.add_reference(
                    ReferenceRecord::new(isin, "Treasury Bills", fair).with_face_value(dec!(100)),
                );
            }
            Outcome::Mismatched => {
                run.add_reference(
                    ReferenceRecord::new(
                        isin,
                        "Treasury Bills",
                        fair + out_of_tolerance_offset(rng),
                    )
                    .with_face_value(dec!(100))
                    .with_dates(config.valuation_date, maturity),
                );
            }
            Outcome::Clean => {
                run.add_reference(
                    ReferenceRecord::new(isin, "Treasury Bills", fair)
                        .with_face_value(dec!(100))
                        .with_dates(config.valuation_date, maturity),
                );
            }
        }
    }
}

fn generate_cds(run: &mut ValuationRun, rng: &mut impl Rng, config: &RunConfig) {
    for i in 0..config.instruments_per_category {
        let isin = Isin::new(format!("INE{:06}CD1", i));
        let price = random_price(rng);
        run.add_reference(ReferenceRecord::new(
            isin.clone(),
            "CERTIFICATE OF DEPOSITS",
            price,
        ));
        let quote = match roll_outcome(rng, config) {
            Outcome::Missing => continue,
            Outcome::Mismatched => price + out_of_tolerance_offset(rng),
            Outcome::Clean => price,
        };
        run.add_cd_quote(CdQuote {
            issuer: Some(format!("Synthetic Bank {}", i % 7)),
            ..CdQuote::new(isin, quote)
        });
    }
}

fn generate_corporates(run: &mut ValuationRun, rng: &mut impl Rng, config: &RunConfig) {
    for i in 0..config.instruments_per_category {
        let isin = Isin::new(format!("INE{:06}B07", i));
        let price = random_price(rng);
        let outcome = roll_outcome(rng, config);
        // Every tenth clean row goes out zero-priced with a trade row
        // backing it, exercising the substitution path end to end.
        let zero_priced = outcome == Outcome::Clean && i % 10 == 9;

        let stated = if zero_priced { Decimal::ZERO } else { price };
        run.add_reference(
            ReferenceRecord::new(isin.clone(), "CORPORATE BONDS", stated)
                .with_valuation_price(stated),
        );
        let quote = match outcome {
            Outcome::Missing => continue,
            Outcome::Mismatched => price + out_of_tolerance_offset(rng),
            Outcome::Clean => price,
        };
        run.add_slv(SlvQuote {
            rating: Some("AAA".to_string()),
            ..SlvQuote::new(isin.clone(), quote)
        });
        // Trades must carry the same price the merge ends on, or the
        // override would shift the comparison target.
        if zero_priced || i % 3 == 0 {
            run.add_corporate_trade(CorporateTrade {
                trade_count: Some(rng.gen_range(1..40)),
                ..CorporateTrade::new(isin, quote)
            });
        }
    }
}
