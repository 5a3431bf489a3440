use chrono::NaiveDate;

/// Fixed day count of one month on the curve basis.
pub const DAYS_PER_MONTH: i64 = 30;

/// Fixed day count of one year on the curve basis.
pub const DAYS_PER_YEAR: i64 = 365;

/// Convert a free-form tenor label to a day count.
///
/// Accepts `<integer><unit>` with optional whitespace between the two,
/// case-insensitive. Units are `d`/`day`/`days`, `m`/`month`/`months`
/// and `y`/`year`/`years`; a month is 30 days and a year 365, with no
/// calendar awareness. Anything else returns `None`, and curve
/// construction drops such points silently.
///
/// # Examples
///
/// ```
/// use valuation_recon::curve::tenor::tenor_to_days;
///
/// assert_eq!(tenor_to_days("91 Days"), Some(91));
/// assert_eq!(tenor_to_days("3M"), Some(90));
/// assert_eq!(tenor_to_days("1 year"), Some(365));
/// assert_eq!(tenor_to_days("overnight"), None);
/// ```
pub fn tenor_to_days(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().to_ascii_lowercase();
    let unit_start = cleaned.find(|c: char| !c.is_ascii_digit())?;
    let (digits, unit) = cleaned.split_at(unit_start);
    let value: i64 = digits.parse().ok()?;
    match unit.trim() {
        "d" | "day" | "days" => Some(value),
        "m" | "month" | "months" => Some(value * DAYS_PER_MONTH),
        "y" | "year" | "years" => Some(value * DAYS_PER_YEAR),
        _ => None,
    }
}

/// Calendar-day difference `to - from`.
///
/// Negative when `to` precedes `from`; time-of-day never enters into
/// it. Treasury valuation feeds this straight into the discount
/// formula.
pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
