use crate::core::category::Category;
use crate::core::sources::{SourceKind, SourceQuotes};
use crate::core::store::{MarketDataStore, StoreError};
use crate::recon::corporate::{PriceModel, ZeroPriceFallback};
use crate::recon::lookup::{self, LookupConfig, StatedPrice};
use crate::recon::mismatch::Mismatch;
use crate::recon::report::ReconReport;
use crate::recon::treasury;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which input record sets arrived for a run.
///
/// A category is only attempted when every source it needs is flagged;
/// ingestion states what arrived, or [`RunManifest::from_store`]
/// derives the flags from store contents. Gating on arrival rather
/// than emptiness keeps "the file never came" distinct from "the file
/// came empty": the first skips the category outright, the second runs
/// it and lets the comparison short-circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    pub gsec: bool,
    pub strips: bool,
    pub sdl: bool,
    pub nse: bool,
    pub treasury_curve: bool,
    pub cd_quotes: bool,
    pub slv: bool,
    pub corporate_trades: bool,
}

impl RunManifest {
    /// Every input present; selects all six categories.
    pub fn all() -> Self {
        Self {
            gsec: true,
            strips: true,
            sdl: true,
            nse: true,
            treasury_curve: true,
            cd_quotes: true,
            slv: true,
            corporate_trades: true,
        }
    }

    /// Derive presence flags from what the store holds.
    pub fn from_store<S: MarketDataStore>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            gsec: !store.gsec_quotes()?.is_empty(),
            strips: !store.strips_quotes()?.is_empty(),
            sdl: !store.sdl_quotes()?.is_empty(),
            nse: !store.nse_quotes()?.is_empty(),
            treasury_curve: !store.treasury_curve()?.is_empty(),
            cd_quotes: !store.cd_quotes()?.is_empty(),
            slv: !store.slv_quotes()?.is_empty(),
            corporate_trades: !store.corporate_trades()?.is_empty(),
        })
    }

    /// Whether the inputs `category` needs are all present.
    pub fn selects(&self, category: Category) -> bool {
        match category {
            Category::CentralGovtBonds => self.gsec && self.strips,
            Category::StateGovtBonds => self.sdl,
            Category::EquityShares => self.nse,
            Category::TreasuryBills => self.treasury_curve,
            Category::CertificatesOfDeposit => self.cd_quotes,
            Category::CorporateBonds => self.slv && self.corporate_trades,
        }
    }
}

/// Central government bonds: G-Sec merged with STRIPS, in that order.
pub fn central_govt_bonds<S: MarketDataStore>(store: &S) -> Result<Vec<Mismatch>, StoreError> {
    let reference = store.reference_by_category(Category::CentralGovtBonds)?;
    let gsec = store.gsec_quotes()?;
    let strips = store.strips_quotes()?;
    Ok(lookup::reconcile(
        &reference,
        &[
            SourceQuotes::collect(SourceKind::Gsec, &gsec),
            SourceQuotes::collect(SourceKind::Strips, &strips),
        ],
        &LookupConfig::central_govt_bonds(),
        &StatedPrice,
    ))
}

/// State government bonds against the SDL sheet.
pub fn state_govt_bonds<S: MarketDataStore>(store: &S) -> Result<Vec<Mismatch>, StoreError> {
    let reference = store.reference_by_category(Category::StateGovtBonds)?;
    let sdl = store.sdl_quotes()?;
    Ok(lookup::reconcile(
        &reference,
        &[SourceQuotes::collect(SourceKind::Sdl, &sdl)],
        &LookupConfig::state_govt_bonds(),
        &StatedPrice,
    ))
}

/// Equity shares against exchange settlement prices.
pub fn equity_shares<S: MarketDataStore>(store: &S) -> Result<Vec<Mismatch>, StoreError> {
    let reference = store.reference_by_category(Category::EquityShares)?;
    let nse = store.nse_quotes()?;
    Ok(lookup::reconcile(
        &reference,
        &[SourceQuotes::collect(SourceKind::Nse, &nse)],
        &LookupConfig::equity_shares(),
        &StatedPrice,
    ))
}

/// Treasury bills priced off the published curve.
pub fn treasury_bills<S: MarketDataStore>(store: &S) -> Result<Vec<Mismatch>, StoreError> {
    let reference = store.reference_by_category(Category::TreasuryBills)?;
    let observations = store.treasury_curve()?;
    Ok(treasury::reconcile(&reference, &observations))
}

/// Certificates of deposit against their quote sheet.
pub fn certificates_of_deposit<S: MarketDataStore>(
    store: &S,
) -> Result<Vec<Mismatch>, StoreError> {
    let reference = store.reference_by_category(Category::CertificatesOfDeposit)?;
    let quotes = store.cd_quotes()?;
    Ok(lookup::reconcile(
        &reference,
        &[SourceQuotes::collect(SourceKind::CdQuotes, &quotes)],
        &LookupConfig::certificates_of_deposit(),
        &StatedPrice,
    ))
}

/// Corporate bonds: SLV merged with trade averages, zero-priced rows
/// substituted before comparison.
pub fn corporate_bonds<S: MarketDataStore>(
    store: &S,
    model: &dyn PriceModel,
) -> Result<Vec<Mismatch>, StoreError> {
    let reference = store.reference_by_category(Category::CorporateBonds)?;
    let slv = store.slv_quotes()?;
    let trades = store.corporate_trades()?;
    let resolver = ZeroPriceFallback::new(&trades, model);
    Ok(lookup::reconcile(
        &reference,
        &[
            SourceQuotes::collect(SourceKind::Slv, &slv),
            SourceQuotes::collect(SourceKind::CorporateTrades, &trades),
        ],
        &LookupConfig::corporate_bonds(),
        &resolver,
    ))
}

/// Run every category the manifest selects and assemble the report.
///
/// Store failures propagate; absence of data never does. Categories
/// run in a fixed order and the walk is deterministic, so two runs
/// over the same store produce the same report body.
pub fn run_reconciliation<S: MarketDataStore>(
    store: &S,
    manifest: &RunManifest,
    model: &dyn PriceModel,
) -> Result<ReconReport, StoreError> {
    info!("starting reconciliation for run {}", store.run_id());
    let mut categories = BTreeMap::new();
    let mut skipped = Vec::new();
    for category in Category::ALL {
        if !manifest.selects(category) {
            info!("{}: required inputs absent, skipped", category);
            skipped.push(category);
            continue;
        }
        let mismatches = match category {
            Category::CentralGovtBonds => central_govt_bonds(store)?,
            Category::StateGovtBonds => state_govt_bonds(store)?,
            Category::EquityShares => equity_shares(store)?,
            Category::TreasuryBills => treasury_bills(store)?,
            Category::CertificatesOfDeposit => certificates_of_deposit(store)?,
            Category::CorporateBonds => corporate_bonds(store, model)?,
        };
        categories.insert(category, mismatches);
    }
    Ok(ReconReport::assemble(store.run_id(), categories, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::isin::Isin;
    use crate::core::reference::ReferenceRecord;
    use crate::core::run::{RunId, ValuationRun};
    use crate::core::sources::{GsecQuote, NseQuote, SdlQuote, StripsQuote};
    use crate::recon::corporate::NoPriceModel;
    use rust_decimal_macros::dec;

    #[test]
    fn test_manifest_gates_on_source_pairs() {
        let manifest = RunManifest {
            gsec: true,
            strips: false,
            slv: true,
            corporate_trades: true,
            ..RunManifest::default()
        };
        assert!(!manifest.selects(Category::CentralGovtBonds));
        assert!(manifest.selects(Category::CorporateBonds));
        assert!(!manifest.selects(Category::StateGovtBonds));
    }

    #[test]
    fn test_manifest_from_store_reflects_contents() {
        let mut run = ValuationRun::new(RunId::new());
        run.add_sdl(SdlQuote::new(Isin::new("IN1020240019"), dec!(99.00)));
        let manifest = RunManifest::from_store(&run).unwrap();

        assert!(manifest.sdl);
        assert!(!manifest.gsec);
        assert!(manifest.selects(Category::StateGovtBonds));
        assert!(!manifest.selects(Category::EquityShares));
    }

    #[test]
    fn test_skipped_categories_are_absent_from_the_report() {
        let mut run = ValuationRun::new(RunId::new());
        run.add_reference(ReferenceRecord::new(
            Isin::new("INE000A01001"),
            "EQUITY SHARES",
            dec!(101.25),
        ));
        run.add_nse(NseQuote::new(Isin::new("INE000A01001"), dec!(101.10)));

        let manifest = RunManifest::from_store(&run).unwrap();
        let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();

        assert_eq!(report.summary.categories_run, vec![Category::EquityShares]);
        assert_eq!(report.summary.categories_skipped.len(), 5);
        assert!(report.mismatches(Category::StateGovtBonds).is_none());
        assert_eq!(report.total_mismatches(), 1);
    }

    #[test]
    fn test_central_govt_requires_both_sources() {
        let mut run = ValuationRun::new(RunId::new());
        run.add_reference(ReferenceRecord::new(
            Isin::new("IN0020240016"),
            "CENTRAL GOVT BONDS",
            dec!(99.61),
        ));
        run.add_gsec(GsecQuote::new(Isin::new("IN0020240016"), dec!(99.61)));

        let manifest = RunManifest::from_store(&run).unwrap();
        assert!(!manifest.selects(Category::CentralGovtBonds));

        run.add_strips(StripsQuote::new(Isin::new("IN0020240099"), dec!(64.20)));
        let manifest = RunManifest::from_store(&run).unwrap();
        assert!(manifest.selects(Category::CentralGovtBonds));

        let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_forced_manifest_runs_category_with_empty_store_sets() {
        // The file arrived but held nothing: the category runs and the
        // comparison short-circuits to a clean empty result.
        let mut run = ValuationRun::new(RunId::new());
        run.add_reference(ReferenceRecord::new(
            Isin::new("IN1020240019"),
            "STATE GOVT BONDS",
            dec!(99.00),
        ));

        let report = run_reconciliation(&run, &RunManifest::all(), &NoPriceModel).unwrap();
        assert_eq!(
            report.mismatches(Category::StateGovtBonds).map(|m| m.len()),
            Some(0)
        );
        assert_eq!(report.summary.categories_run.len(), 6);
    }
}
