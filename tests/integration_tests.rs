use chrono::NaiveDate;
use rust_decimal_macros::dec;
use valuation_recon::core::category::Category;
use valuation_recon::core::isin::Isin;
use valuation_recon::core::reference::ReferenceRecord;
use valuation_recon::core::run::{RunId, ValuationRun};
use valuation_recon::core::sources::{
    CdQuote, CorporateTrade, CurveObservation, GsecQuote, NseQuote, SdlQuote, SlvQuote,
    StripsQuote,
};
use valuation_recon::core::store::{MarketDataStore, StoreError};
use valuation_recon::recon::corporate::NoPriceModel;
use valuation_recon::recon::mismatch::MismatchStatus;
use valuation_recon::recon::orchestrator::{run_reconciliation, RunManifest};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Full pipeline test: ingestion → manifest → all six categories → report.
#[test]
fn full_pipeline_valuation_run() {
    let mut run = ValuationRun::new(RunId::new());

    // Central govt bonds: clean, flagged, STRIPS-only, and absent.
    run.add_reference(ReferenceRecord::new(
        Isin::new("IN0020240016"),
        "CENTRAL GOVT BONDS",
        dec!(99.61),
    ));
    run.add_reference(ReferenceRecord::new(
        Isin::new("IN0020240024"),
        "CENTRAL GOVT BONDS",
        dec!(101.05),
    ));
    run.add_reference(ReferenceRecord::new(
        Isin::new("IN0020240032"),
        "CENTRAL GOVT BONDS",
        dec!(64.20),
    ));
    run.add_reference(ReferenceRecord::new(
        Isin::new("IN0020249999"),
        "CENTRAL GOVT BONDS",
        dec!(88.00),
    ));
    run.add_gsec(GsecQuote::new(Isin::new("IN0020240016"), dec!(99.61)));
    run.add_gsec(GsecQuote::new(Isin::new("IN0020240024"), dec!(101.02)));
    run.add_strips(StripsQuote::new(Isin::new("IN0020240032"), dec!(64.20)));

    // State govt bonds: agrees.
    run.add_reference(ReferenceRecord::new(
        Isin::new("IN1020240019"),
        "STATE GOVT BONDS",
        dec!(99.45),
    ));
    run.add_sdl(SdlQuote::new(Isin::new("IN1020240019"), dec!(99.45)));

    // Equities: one out of tolerance, one clean.
    run.add_reference(ReferenceRecord::new(
        Isin::new("INE000A01001"),
        "EQUITY SHARES",
        dec!(101.25),
    ));
    run.add_reference(ReferenceRecord::new(
        Isin::new("INE000A01002"),
        "EQUITY SHARES",
        dec!(55.40),
    ));
    run.add_nse(NseQuote::new(Isin::new("INE000A01001"), dec!(101.10)));
    run.add_nse(NseQuote::new(Isin::new("INE000A01002"), dec!(55.40)));

    // Treasury bills: a 60-day bill stated 0.02 above its computed
    // price, and one stated exactly at it.
    run.add_curve_observation(CurveObservation::new("1M", dec!(6.00)));
    run.add_curve_observation(CurveObservation::new("3M", dec!(6.50)));
    run.add_reference(
        ReferenceRecord::new(Isin::new("IN002025X011"), "Treasury Bills", dec!(99.00))
            .with_face_value(dec!(100))
            .with_dates(date(2025, 6, 27), date(2025, 8, 26)),
    );
    run.add_reference(
        ReferenceRecord::new(Isin::new("IN002025X029"), "Treasury Bills", dec!(98.98))
            .with_face_value(dec!(100))
            .with_dates(date(2025, 6, 27), date(2025, 8, 26)),
    );

    // Certificates of deposit: agrees.
    run.add_reference(ReferenceRecord::new(
        Isin::new("INE000111CD1"),
        "CERTIFICATE OF DEPOSITS",
        dec!(97.80),
    ));
    run.add_cd_quote(CdQuote::new(Isin::new("INE000111CD1"), dec!(97.80)));

    // Corporate bonds: a zero-priced row healed by trade data, and a
    // row 0.0002 off the SLV final price.
    run.add_reference(
        ReferenceRecord::new(Isin::new("INE001B07019"), "CORPORATE BONDS", dec!(0))
            .with_valuation_price(dec!(0)),
    );
    run.add_reference(
        ReferenceRecord::new(Isin::new("INE002C07024"), "CORPORATE BONDS", dec!(98.55))
            .with_valuation_price(dec!(98.5532)),
    );
    run.add_slv(SlvQuote::new(Isin::new("INE001B07019"), dec!(98.40)));
    run.add_slv(SlvQuote::new(Isin::new("INE002C07024"), dec!(98.5530)));
    run.add_corporate_trade(CorporateTrade::new(Isin::new("INE001B07019"), dec!(98.40)));

    // Every source arrived, so every category runs.
    let manifest = RunManifest::from_store(&run).unwrap();
    for category in Category::ALL {
        assert!(manifest.selects(category), "{} not selected", category);
    }

    let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();

    // Summary counts.
    assert_eq!(report.summary.categories_run.len(), 6);
    assert!(report.summary.categories_skipped.is_empty());
    assert_eq!(report.total_mismatches(), 5);
    assert_eq!(report.summary.price_mismatches, 4);
    assert_eq!(report.summary.not_found, 1);
    assert!(!report.is_clean());

    // Central: one flagged price, one absent, in sheet order.
    let central = report.mismatches(Category::CentralGovtBonds).unwrap();
    assert_eq!(central.len(), 2);
    assert_eq!(central[0].isin.as_str(), "IN0020240024");
    assert_eq!(central[0].status, MismatchStatus::PriceMismatch);
    assert_eq!(central[0].difference, Some(dec!(0.03)));
    assert_eq!(central[1].isin.as_str(), "IN0020249999");
    assert_eq!(central[1].status, MismatchStatus::NotFound);

    // State and CD reconcile clean but still appear.
    assert_eq!(
        report.mismatches(Category::StateGovtBonds).map(|m| m.len()),
        Some(0)
    );
    assert_eq!(
        report
            .mismatches(Category::CertificatesOfDeposit)
            .map(|m| m.len()),
        Some(0)
    );

    // Equity: the 0.15 difference.
    let equities = report.mismatches(Category::EquityShares).unwrap();
    assert_eq!(equities.len(), 1);
    assert_eq!(equities[0].difference, Some(dec!(0.15)));

    // Treasury: the interpolated 6.25% yield prices the bill at 98.98.
    let bills = report.mismatches(Category::TreasuryBills).unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].isin.as_str(), "IN002025X011");
    assert_eq!(bills[0].reference_price, dec!(99.00));
    assert_eq!(bills[0].market_price, Some(dec!(98.98)));
    assert_eq!(bills[0].difference, Some(dec!(0.02)));

    // Corporate: substitution healed the zero row, the 0.0002 gap is
    // past the tighter tolerance.
    let corporates = report.mismatches(Category::CorporateBonds).unwrap();
    assert_eq!(corporates.len(), 1);
    assert_eq!(corporates[0].isin.as_str(), "INE002C07024");
    assert_eq!(corporates[0].difference, Some(dec!(0.0002)));
}

/// The same absolute gap clears the equity tolerance but not the
/// corporate one.
#[test]
fn corporate_tolerance_is_tighter_than_lookup_tolerance() {
    let mut run = ValuationRun::new(RunId::new());
    run.add_reference(
        ReferenceRecord::new(Isin::new("INE002C07024"), "CORPORATE BONDS", dec!(98.55))
            .with_valuation_price(dec!(98.5532)),
    );
    run.add_reference(ReferenceRecord::new(
        Isin::new("INE000A01001"),
        "EQUITY SHARES",
        dec!(101.2502),
    ));
    run.add_slv(SlvQuote::new(Isin::new("INE002C07024"), dec!(98.5530)));
    run.add_corporate_trade(CorporateTrade::new(Isin::new("INE002C07024"), dec!(98.5530)));
    run.add_nse(NseQuote::new(Isin::new("INE000A01001"), dec!(101.2500)));

    let manifest = RunManifest::from_store(&run).unwrap();
    let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();

    assert_eq!(
        report.mismatches(Category::EquityShares).map(|m| m.len()),
        Some(0)
    );
    assert_eq!(
        report.mismatches(Category::CorporateBonds).map(|m| m.len()),
        Some(1)
    );
}

/// Reference tags match case-insensitively for bills only.
#[test]
fn treasury_tag_casing_is_forgiven_end_to_end() {
    let mut run = ValuationRun::new(RunId::new());
    run.add_curve_observation(CurveObservation::new("1M", dec!(6.00)));
    run.add_curve_observation(CurveObservation::new("3M", dec!(6.50)));
    run.add_reference(
        ReferenceRecord::new(Isin::new("IN002025X011"), "TREASURY BILLS", dec!(99.00))
            .with_face_value(dec!(100))
            .with_dates(date(2025, 6, 27), date(2025, 8, 26)),
    );
    // Lowercased equity tag never matches its category.
    run.add_reference(ReferenceRecord::new(
        Isin::new("INE000A01001"),
        "equity shares",
        dec!(101.25),
    ));
    run.add_nse(NseQuote::new(Isin::new("INE000A01001"), dec!(90.00)));

    let manifest = RunManifest::from_store(&run).unwrap();
    let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();

    let bills = report.mismatches(Category::TreasuryBills).unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].difference, Some(dec!(0.02)));

    // The miscased equity row fell out of scope entirely.
    assert_eq!(
        report.mismatches(Category::EquityShares).map(|m| m.len()),
        Some(0)
    );
}

/// A run arriving as CLI-shaped JSON reconciles the same as one built
/// in memory.
#[test]
fn run_file_ingestion_matches_cli_shape() {
    let json = r#"{
  "run_id": "7d4f9c2e-1a5b-4c3d-9e8f-0a1b2c3d4e5f",
  "reference": [
    { "isin": "INE000A01001", "category": "EQUITY SHARES", "market_price": "101.25" },
    { "isin": "INE000A01002", "category": "EQUITY SHARES", "market_price": "55.40" }
  ],
  "nse": [
    { "isin": " INE000A01001 ", "ticker": "ACME", "settlement_price": "101.10" },
    { "isin": "INE000A01002", "settlement_price": "55.40", "close_price": "55.10" }
  ]
}"#;
    let run: ValuationRun = serde_json::from_str(json).unwrap();
    assert_eq!(run.reference().len(), 2);
    assert_eq!(run.nse().len(), 2);

    let manifest = RunManifest::from_store(&run).unwrap();
    let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();

    // Whitespace around the source ISIN was normalized away.
    let equities = report.mismatches(Category::EquityShares).unwrap();
    assert_eq!(equities.len(), 1);
    assert_eq!(equities[0].isin.as_str(), "INE000A01001");
    assert_eq!(equities[0].status, MismatchStatus::PriceMismatch);
}

/// Report JSON carries meta, summary and per-category groups.
#[test]
fn report_json_shape() {
    let mut run = ValuationRun::new(RunId::new());
    run.add_reference(ReferenceRecord::new(
        Isin::new("INE000A01001"),
        "EQUITY SHARES",
        dec!(101.25),
    ));
    run.add_nse(NseQuote::new(Isin::new("INE000A01001"), dec!(101.10)));

    let manifest = RunManifest::from_store(&run).unwrap();
    let report = run_reconciliation(&run, &manifest, &NoPriceModel).unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(parsed["meta"]["run_id"].is_string());
    assert!(parsed["meta"]["engine_version"].is_string());
    assert!(parsed["meta"]["generated_at"].is_string());
    assert_eq!(parsed["summary"]["total_mismatches"], 1);
    assert_eq!(parsed["summary"]["price_mismatches"], 1);

    let equity = &parsed["categories"]["equity_shares"][0];
    assert_eq!(equity["isin"], "INE000A01001");
    assert_eq!(equity["status"], "price_mismatch");
    assert_eq!(equity["reference_price"], "101.25");
    assert_eq!(equity["market_price"], "101.10");
    assert_eq!(equity["difference"], "0.15");
}

/// An empty run under a forced manifest runs everything and stays
/// clean.
#[test]
fn empty_run_reconciles_clean() {
    let run = ValuationRun::new(RunId::new());
    let report = run_reconciliation(&run, &RunManifest::all(), &NoPriceModel).unwrap();

    assert_eq!(report.summary.categories_run.len(), 6);
    assert!(report.is_clean());
    assert_eq!(report.summary.not_found_share(), 0.0);

    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.is_empty());
}

/// A store that cannot answer fails the run instead of reporting an
/// empty result.
#[test]
fn store_failures_propagate() {
    struct FailingStore {
        run_id: RunId,
    }

    impl MarketDataStore for FailingStore {
        fn run_id(&self) -> RunId {
            self.run_id
        }

        fn reference_by_category(
            &self,
            _category: Category,
        ) -> Result<Vec<ReferenceRecord>, StoreError> {
            Ok(Vec::new())
        }

        fn gsec_quotes(&self) -> Result<Vec<GsecQuote>, StoreError> {
            Err(StoreError::Fetch {
                record_set: "gsec".to_string(),
                reason: "connection reset".to_string(),
            })
        }

        fn strips_quotes(&self) -> Result<Vec<StripsQuote>, StoreError> {
            Ok(Vec::new())
        }

        fn sdl_quotes(&self) -> Result<Vec<SdlQuote>, StoreError> {
            Ok(Vec::new())
        }

        fn nse_quotes(&self) -> Result<Vec<NseQuote>, StoreError> {
            Ok(Vec::new())
        }

        fn slv_quotes(&self) -> Result<Vec<SlvQuote>, StoreError> {
            Ok(Vec::new())
        }

        fn corporate_trades(&self) -> Result<Vec<CorporateTrade>, StoreError> {
            Ok(Vec::new())
        }

        fn cd_quotes(&self) -> Result<Vec<CdQuote>, StoreError> {
            Ok(Vec::new())
        }

        fn treasury_curve(&self) -> Result<Vec<CurveObservation>, StoreError> {
            Ok(Vec::new())
        }
    }

    let store = FailingStore {
        run_id: RunId::new(),
    };
    let result = run_reconciliation(&store, &RunManifest::all(), &NoPriceModel);

    match result {
        Err(StoreError::Fetch { record_set, .. }) => assert_eq!(record_set, "gsec"),
        other => panic!("expected a fetch error, got {:?}", other),
    }
}
