use crate::core::category::Category;
use crate::core::reference::ReferenceRecord;
use crate::core::sources::CurveObservation;
use crate::curve::interpolate::YieldCurve;
use crate::curve::tenor::{calendar_days_between, DAYS_PER_YEAR};
use crate::recon::mismatch::Mismatch;
use log::{debug, info};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Differences strictly greater than this are reported.
const PRICE_TOLERANCE: Decimal = dec!(0.01);

/// Price a discount instrument from an annualized percent yield.
///
/// `price = face / (1 + yield * days / 365)`, rounded to two decimal
/// places half-away-from-zero to match the sheet arithmetic the result
/// is compared against.
///
/// # Examples
///
/// ```
/// use valuation_recon::recon::treasury::discounted_price;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(discounted_price(dec!(100), dec!(6.25), 60), dec!(98.98));
/// ```
pub fn discounted_price(face_value: Decimal, annual_rate_pct: Decimal, days: i64) -> Decimal {
    let rate = annual_rate_pct / dec!(100);
    let denominator = Decimal::ONE + rate * Decimal::from(days) / Decimal::from(DAYS_PER_YEAR);
    (face_value / denominator).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The treasury-bill valuation rule.
///
/// The one category whose comparison price is computed instead of
/// looked up: each bill's days to maturity is read off the published
/// curve, the interpolated yield discounts the face value, and the
/// computed price is compared to the stated market price. Bills
/// missing either date are skipped; an unusable curve skips the whole
/// category.
pub fn reconcile(
    reference: &[ReferenceRecord],
    observations: &[CurveObservation],
) -> Vec<Mismatch> {
    if reference.is_empty() {
        info!("Treasury Bills: no reference rows, nothing to value");
        return Vec::new();
    }
    let curve = match YieldCurve::build(observations) {
        Some(curve) => curve,
        None => {
            info!("Treasury Bills: no usable curve points, skipping valuation");
            return Vec::new();
        }
    };

    let mut mismatches = Vec::new();
    for bill in reference {
        let (valuation, maturity) = match (bill.valuation_date(), bill.maturity_date()) {
            (Some(valuation), Some(maturity)) => (valuation, maturity),
            _ => {
                debug!("Treasury Bills: {} missing a date, skipped", bill.isin());
                continue;
            }
        };
        let days = calendar_days_between(valuation, maturity);
        let rate = curve.rate_at(days);
        let calculated = discounted_price(bill.face_value_per_unit(), rate, days);
        let difference = (bill.market_price() - calculated)
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if difference > PRICE_TOLERANCE {
            mismatches.push(Mismatch::price_mismatch(
                bill.isin().clone(),
                bill.market_price(),
                calculated,
                difference,
                Category::TreasuryBills,
            ));
        } else {
            debug!(
                "Treasury Bills: {} within tolerance ({} vs calculated {})",
                bill.isin(),
                bill.market_price(),
                calculated
            );
        }
    }
    info!(
        "Treasury Bills: {} mismatches across {} bills",
        mismatches.len(),
        reference.len()
    );
    mismatches
}
