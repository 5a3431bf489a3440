use crate::core::isin::Isin;
use crate::core::reference::ReferenceRecord;
use crate::core::sources::CorporateTrade;
use crate::recon::lookup::ReferencePriceResolver;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// External price-model collaborator keyed by ISIN.
///
/// The engine only asks for a modeled price; how it is derived lives
/// outside this crate.
pub trait PriceModel {
    fn model_price(&self, isin: &Isin) -> Option<Decimal>;
}

/// A model with no opinion on any instrument.
pub struct NoPriceModel;

impl PriceModel for NoPriceModel {
    fn model_price(&self, _isin: &Isin) -> Option<Decimal> {
        None
    }
}

/// Table-backed price model, for fixtures and the CLI model file.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceModel {
    prices: HashMap<Isin, Decimal>,
}

impl StaticPriceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, isin: Isin, price: Decimal) {
        self.prices.insert(isin, price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(Isin, Decimal)> for StaticPriceModel {
    fn from_iter<I: IntoIterator<Item = (Isin, Decimal)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

impl PriceModel for StaticPriceModel {
    fn model_price(&self, isin: &Isin) -> Option<Decimal> {
        self.prices.get(isin).copied()
    }
}

/// Corporate-bond zero-price substitution.
///
/// A stated valuation price of exactly zero means the reference sheet
/// had nothing for the instrument. Before comparison the resolver
/// tries, in order: the weighted-average price of the first trade row
/// for the ISIN, then the external price model. When neither answers,
/// the zero stands and the comparison proceeds against it.
pub struct ZeroPriceFallback<'a> {
    trades: &'a [CorporateTrade],
    model: &'a dyn PriceModel,
}

impl<'a> ZeroPriceFallback<'a> {
    pub fn new(trades: &'a [CorporateTrade], model: &'a dyn PriceModel) -> Self {
        Self { trades, model }
    }
}

impl ReferencePriceResolver for ZeroPriceFallback<'_> {
    fn resolve(&self, record: &ReferenceRecord, stated: Decimal) -> Decimal {
        if !stated.is_zero() {
            return stated;
        }
        let traded = self
            .trades
            .iter()
            .find(|trade| trade.isin == *record.isin())
            .and_then(|trade| trade.weighted_avg_price);
        if let Some(price) = traded {
            debug!(
                "substituted weighted-average price {} for zero-priced {}",
                price,
                record.isin()
            );
            return price;
        }
        if let Some(price) = self.model.model_price(record.isin()) {
            debug!(
                "substituted model price {} for zero-priced {}",
                price,
                record.isin()
            );
            return price;
        }
        stated
    }
}
