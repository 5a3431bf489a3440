use crate::core::sources::CurveObservation;
use crate::curve::tenor::tenor_to_days;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One validated point on a yield curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Normalized tenor label, uppercased.
    pub tenor: String,
    /// Horizon in days, from [`tenor_to_days`].
    pub days: i64,
    /// Annualized rate in percent.
    pub rate: Decimal,
}

/// An annualized yield curve over day-count horizons.
///
/// Built from raw observations: points with unparseable tenors or
/// missing rates are dropped, survivors are sorted ascending by day
/// count. A curve is never empty; [`YieldCurve::build`] returns `None`
/// when nothing survives, which callers treat the same as a missing
/// input.
///
/// # Examples
///
/// ```
/// use valuation_recon::core::sources::CurveObservation;
/// use valuation_recon::curve::interpolate::YieldCurve;
/// use rust_decimal_macros::dec;
///
/// let curve = YieldCurve::build(&[
///     CurveObservation::new("3M", dec!(6.50)),
///     CurveObservation::new("1M", dec!(6.00)),
///     CurveObservation::new("-- select --", dec!(9.99)),
/// ]).unwrap();
///
/// assert_eq!(curve.len(), 2);
/// assert_eq!(curve.rate_at(60), dec!(6.25));
/// assert_eq!(curve.rate_at(7), dec!(6.00));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldCurve {
    points: Vec<CurvePoint>,
}

impl YieldCurve {
    /// Validate and sort raw observations into a curve.
    ///
    /// Returns `None` when no observation survives validation.
    pub fn build(observations: &[CurveObservation]) -> Option<Self> {
        let mut points: Vec<CurvePoint> = observations
            .iter()
            .filter_map(|obs| {
                let days = tenor_to_days(&obs.tenor)?;
                let rate = obs.rate?;
                Some(CurvePoint {
                    tenor: obs.tenor.trim().to_ascii_uppercase(),
                    days,
                    rate,
                })
            })
            .collect();
        if points.is_empty() {
            return None;
        }
        points.sort_by_key(|p| p.days);
        Some(Self { points })
    }

    /// Validated points, ascending by day count.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Shortest observed horizon in days.
    pub fn min_days(&self) -> i64 {
        self.points[0].days
    }

    /// Longest observed horizon in days.
    pub fn max_days(&self) -> i64 {
        self.points[self.points.len() - 1].days
    }

    /// The annualized rate at `target_days`.
    ///
    /// Linear between the bracketing points, flat beyond either end of
    /// the observed range.
    pub fn rate_at(&self, target_days: i64) -> Decimal {
        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];
        if target_days <= first.days {
            return first.rate;
        }
        if target_days >= last.days {
            return last.rate;
        }
        for pair in self.points.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            // A zero-width bracket from duplicate tenors would divide
            // by zero; the neighboring windows already cover it.
            if upper.days == lower.days {
                continue;
            }
            if target_days >= lower.days && target_days <= upper.days {
                let span = Decimal::from(upper.days - lower.days);
                let progress = Decimal::from(target_days - lower.days);
                return lower.rate + (upper.rate - lower.rate) * progress / span;
            }
        }
        last.rate
    }
}
