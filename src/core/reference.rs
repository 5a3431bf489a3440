use crate::core::category::Category;
use crate::core::isin::Isin;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One instrument row from the reference valuation sheet.
///
/// Carries the stated prices the corroborating sources are checked
/// against. Only the fields a category's rule reads need to be
/// populated; the builder methods fill in the rest.
///
/// # Examples
///
/// ```
/// use valuation_recon::core::isin::Isin;
/// use valuation_recon::core::reference::ReferenceRecord;
/// use rust_decimal_macros::dec;
///
/// let record = ReferenceRecord::new(Isin::new("INE000A01001"), "EQUITY SHARES", dec!(101.25));
/// assert_eq!(record.market_price(), dec!(101.25));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    isin: Isin,
    /// Raw category tag as it appeared on the sheet.
    category: String,
    /// Stated market price.
    market_price: Decimal,
    /// Stated price as per valuation; the corporate rule compares this
    /// column instead of `market_price`.
    #[serde(default)]
    valuation_price: Decimal,
    /// Face value per unit, used when a price has to be computed.
    #[serde(default)]
    face_value_per_unit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valuation_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maturity_date: Option<NaiveDate>,
}

impl ReferenceRecord {
    /// Create a reference row with the fields every category reads.
    pub fn new(isin: Isin, category: impl Into<String>, market_price: Decimal) -> Self {
        Self {
            isin,
            category: category.into(),
            market_price,
            valuation_price: Decimal::ZERO,
            face_value_per_unit: Decimal::ZERO,
            valuation_date: None,
            maturity_date: None,
        }
    }

    /// Set the stated price as per valuation.
    pub fn with_valuation_price(mut self, price: Decimal) -> Self {
        self.valuation_price = price;
        self
    }

    /// Set the face value per unit.
    pub fn with_face_value(mut self, face_value: Decimal) -> Self {
        self.face_value_per_unit = face_value;
        self
    }

    /// Set the valuation and maturity dates.
    pub fn with_dates(mut self, valuation: NaiveDate, maturity: NaiveDate) -> Self {
        self.valuation_date = Some(valuation);
        self.maturity_date = Some(maturity);
        self
    }

    pub fn isin(&self) -> &Isin {
        &self.isin
    }

    /// The raw category tag from the sheet.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn market_price(&self) -> Decimal {
        self.market_price
    }

    pub fn valuation_price(&self) -> Decimal {
        self.valuation_price
    }

    pub fn face_value_per_unit(&self) -> Decimal {
        self.face_value_per_unit
    }

    pub fn valuation_date(&self) -> Option<NaiveDate> {
        self.valuation_date
    }

    pub fn maturity_date(&self) -> Option<NaiveDate> {
        self.maturity_date
    }

    /// Whether this row belongs to `category` per its tag.
    pub fn is_in(&self, category: Category) -> bool {
        category.matches(&self.category)
    }
}

/// All reference rows of one valuation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSet {
    records: Vec<ReferenceRecord>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ReferenceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose tag selects `category`, in sheet order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ReferenceRecord> {
        self.records.iter().filter(move |r| r.is_in(category))
    }
}

impl FromIterator<ReferenceRecord> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = ReferenceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_populates_optional_fields() {
        let record = ReferenceRecord::new(Isin::new("IN002025X011"), "Treasury Bills", dec!(98.98))
            .with_face_value(dec!(100))
            .with_dates(date(2025, 6, 27), date(2025, 8, 26));

        assert_eq!(record.face_value_per_unit(), dec!(100));
        assert_eq!(record.valuation_date(), Some(date(2025, 6, 27)));
        assert_eq!(record.maturity_date(), Some(date(2025, 8, 26)));
        assert_eq!(record.valuation_price(), Decimal::ZERO);
    }

    #[test]
    fn test_in_category_preserves_sheet_order() {
        let set: ReferenceSet = vec![
            ReferenceRecord::new(Isin::new("INE001"), "EQUITY SHARES", dec!(10)),
            ReferenceRecord::new(Isin::new("INE002"), "CENTRAL GOVT BONDS", dec!(99)),
            ReferenceRecord::new(Isin::new("INE003"), "EQUITY SHARES", dec!(20)),
        ]
        .into_iter()
        .collect();

        let equities: Vec<&str> = set
            .in_category(Category::EquityShares)
            .map(|r| r.isin().as_str())
            .collect();
        assert_eq!(equities, vec!["INE001", "INE003"]);
        assert_eq!(set.in_category(Category::StateGovtBonds).count(), 0);
    }

    #[test]
    fn test_category_tag_matching_is_exact_for_bonds() {
        let record = ReferenceRecord::new(Isin::new("INE004"), "central govt bonds", dec!(99));
        assert!(!record.is_in(Category::CentralGovtBonds));
    }
}
