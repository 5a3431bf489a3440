use crate::core::category::Category;
use crate::core::price_map::PriceMap;
use crate::core::reference::ReferenceRecord;
use crate::core::sources::SourceQuotes;
use crate::recon::mismatch::Mismatch;
use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Which reference-sheet column a category compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    /// The stated market price column.
    MarketPrice,
    /// The stated price as per valuation; the corporate rule reads
    /// this one.
    ValuationPrice,
}

impl ReferenceField {
    pub fn extract(&self, record: &ReferenceRecord) -> Decimal {
        match self {
            ReferenceField::MarketPrice => record.market_price(),
            ReferenceField::ValuationPrice => record.valuation_price(),
        }
    }
}

/// Per-category parameterization of the lookup comparison.
#[derive(Debug, Clone, Copy)]
pub struct LookupConfig {
    pub category: Category,
    /// Differences strictly greater than this are reported.
    pub tolerance: Decimal,
    pub reference_field: ReferenceField,
}

impl LookupConfig {
    pub fn central_govt_bonds() -> Self {
        Self {
            category: Category::CentralGovtBonds,
            tolerance: dec!(0.01),
            reference_field: ReferenceField::MarketPrice,
        }
    }

    pub fn state_govt_bonds() -> Self {
        Self {
            category: Category::StateGovtBonds,
            tolerance: dec!(0.01),
            reference_field: ReferenceField::MarketPrice,
        }
    }

    pub fn equity_shares() -> Self {
        Self {
            category: Category::EquityShares,
            tolerance: dec!(0.01),
            reference_field: ReferenceField::MarketPrice,
        }
    }

    pub fn certificates_of_deposit() -> Self {
        Self {
            category: Category::CertificatesOfDeposit,
            tolerance: dec!(0.01),
            reference_field: ReferenceField::MarketPrice,
        }
    }

    /// Corporate bonds compare the valuation-price column under a much
    /// tighter tolerance than the other categories.
    pub fn corporate_bonds() -> Self {
        Self {
            category: Category::CorporateBonds,
            tolerance: dec!(0.0001),
            reference_field: ReferenceField::ValuationPrice,
        }
    }
}

/// Resolves the effective reference price for one record before it is
/// compared.
///
/// Most categories take the stated price as-is; the corporate rule
/// substitutes traded or modeled prices for zero-priced rows. See
/// [`ZeroPriceFallback`].
///
/// [`ZeroPriceFallback`]: crate::recon::corporate::ZeroPriceFallback
pub trait ReferencePriceResolver {
    fn resolve(&self, record: &ReferenceRecord, stated: Decimal) -> Decimal;
}

/// The stated price stands.
pub struct StatedPrice;

impl ReferencePriceResolver for StatedPrice {
    fn resolve(&self, _record: &ReferenceRecord, stated: Decimal) -> Decimal {
        stated
    }
}

/// Run the lookup comparison for one category.
///
/// Merges `sources` into a price map in the given order, then walks
/// the reference rows: an ISIN absent from the map is reported as not
/// found, and a present price whose absolute difference from the
/// resolved reference price exceeds the tolerance is reported as a
/// price mismatch. A difference equal to the tolerance passes.
///
/// Two short-circuits return no mismatches at all: no reference rows
/// for the category, or any required source that delivered zero rows.
/// In both cases there is nothing trustworthy to compare against, and
/// silence must not be read as agreement.
pub fn reconcile(
    reference: &[ReferenceRecord],
    sources: &[SourceQuotes],
    config: &LookupConfig,
    resolver: &dyn ReferencePriceResolver,
) -> Vec<Mismatch> {
    if reference.is_empty() {
        info!(
            "{}: no reference rows, nothing to reconcile",
            config.category
        );
        return Vec::new();
    }
    for source in sources {
        if source.is_empty() {
            info!(
                "{}: no {} rows, skipping comparison",
                config.category,
                source.source()
            );
            return Vec::new();
        }
    }

    let mut prices = PriceMap::new();
    for source in sources {
        prices.merge(source);
    }

    let mut mismatches = Vec::new();
    for record in reference {
        let stated = config.reference_field.extract(record);
        let reference_price = resolver.resolve(record, stated);
        match prices.price(record.isin()) {
            None => {
                mismatches.push(Mismatch::not_found(
                    record.isin().clone(),
                    reference_price,
                    config.category,
                ));
            }
            Some(market_price) => {
                let difference = (reference_price - market_price).abs();
                if difference > config.tolerance {
                    mismatches.push(Mismatch::price_mismatch(
                        record.isin().clone(),
                        reference_price,
                        market_price,
                        difference,
                        config.category,
                    ));
                } else {
                    debug!(
                        "{}: {} within tolerance ({} vs {})",
                        config.category,
                        record.isin(),
                        reference_price,
                        market_price
                    );
                }
            }
        }
    }
    info!(
        "{}: {} mismatches across {} reference rows",
        config.category,
        mismatches.len(),
        reference.len()
    );
    mismatches
}
