use crate::core::isin::Isin;
use crate::core::sources::SourceQuotes;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// ISIN to corroborating price, merged from one or more sources.
///
/// Sources are merged in the fixed order the category rule dictates;
/// when the same ISIN appears in more than one source, the price merged
/// last wins. The merge is not commutative, so callers rely on the
/// rule's ordering and never on the data.
///
/// # Examples
///
/// ```
/// use valuation_recon::core::isin::Isin;
/// use valuation_recon::core::price_map::PriceMap;
/// use rust_decimal_macros::dec;
///
/// let mut map = PriceMap::new();
/// map.insert(Isin::new("IN0020240016"), dec!(99.61));
/// map.insert(Isin::new("IN0020240016"), dec!(99.70));
/// assert_eq!(map.price(&Isin::new("IN0020240016")), Some(dec!(99.70)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriceMap {
    prices: HashMap<Isin, Decimal>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one price, overwriting any earlier entry for the ISIN.
    pub fn insert(&mut self, isin: Isin, price: Decimal) {
        self.prices.insert(isin, price);
    }

    /// Merge every priced row of `source`, later rows overwriting
    /// earlier ones.
    pub fn merge(&mut self, source: &SourceQuotes) {
        for (isin, price) in source.quotes() {
            self.prices.insert(isin.clone(), *price);
        }
    }

    /// The corroborating price for `isin`, if any source supplied one.
    pub fn price(&self, isin: &Isin) -> Option<Decimal> {
        self.prices.get(isin).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
