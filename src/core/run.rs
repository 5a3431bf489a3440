use crate::core::reference::{ReferenceRecord, ReferenceSet};
use crate::core::sources::{
    CdQuote, CorporateTrade, CurveObservation, GsecQuote, NseQuote, SdlQuote, SlvQuote,
    StripsQuote,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier scoping every record set to one valuation run.
///
/// Records from different runs never mix; a fresh id is minted per
/// ingestion and stamped on the resulting report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Mint a fresh run id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every record set belonging to one valuation run.
///
/// This is the in-memory canonical store: ingestion fills it, the
/// engine reads it through [`MarketDataStore`], and the whole run
/// round-trips through serde so a run can live in a JSON file.
///
/// [`MarketDataStore`]: crate::core::store::MarketDataStore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRun {
    run_id: RunId,
    #[serde(default)]
    reference: ReferenceSet,
    #[serde(default)]
    gsec: Vec<GsecQuote>,
    #[serde(default)]
    strips: Vec<StripsQuote>,
    #[serde(default)]
    sdl: Vec<SdlQuote>,
    #[serde(default)]
    nse: Vec<NseQuote>,
    #[serde(default)]
    slv: Vec<SlvQuote>,
    #[serde(default)]
    corporate_trades: Vec<CorporateTrade>,
    #[serde(default)]
    cd_quotes: Vec<CdQuote>,
    #[serde(default)]
    treasury_curve: Vec<CurveObservation>,
}

impl ValuationRun {
    /// Create an empty run under `run_id`.
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            reference: ReferenceSet::new(),
            gsec: Vec::new(),
            strips: Vec::new(),
            sdl: Vec::new(),
            nse: Vec::new(),
            slv: Vec::new(),
            corporate_trades: Vec::new(),
            cd_quotes: Vec::new(),
            treasury_curve: Vec::new(),
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn add_reference(&mut self, record: ReferenceRecord) {
        self.reference.add(record);
    }

    pub fn add_gsec(&mut self, quote: GsecQuote) {
        self.gsec.push(quote);
    }

    pub fn add_strips(&mut self, quote: StripsQuote) {
        self.strips.push(quote);
    }

    pub fn add_sdl(&mut self, quote: SdlQuote) {
        self.sdl.push(quote);
    }

    pub fn add_nse(&mut self, quote: NseQuote) {
        self.nse.push(quote);
    }

    pub fn add_slv(&mut self, quote: SlvQuote) {
        self.slv.push(quote);
    }

    pub fn add_corporate_trade(&mut self, trade: CorporateTrade) {
        self.corporate_trades.push(trade);
    }

    pub fn add_cd_quote(&mut self, quote: CdQuote) {
        self.cd_quotes.push(quote);
    }

    pub fn add_curve_observation(&mut self, observation: CurveObservation) {
        self.treasury_curve.push(observation);
    }

    pub fn reference(&self) -> &ReferenceSet {
        &self.reference
    }

    pub fn gsec(&self) -> &[GsecQuote] {
        &self.gsec
    }

    pub fn strips(&self) -> &[StripsQuote] {
        &self.strips
    }

    pub fn sdl(&self) -> &[SdlQuote] {
        &self.sdl
    }

    pub fn nse(&self) -> &[NseQuote] {
        &self.nse
    }

    pub fn slv(&self) -> &[SlvQuote] {
        &self.slv
    }

    pub fn corporate_trades(&self) -> &[CorporateTrade] {
        &self.corporate_trades
    }

    pub fn cd_quotes(&self) -> &[CdQuote] {
        &self.cd_quotes
    }

    pub fn treasury_curve(&self) -> &[CurveObservation] {
        &self.treasury_curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::isin::Isin;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fresh_run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn test_run_round_trips_through_json() {
        let mut run = ValuationRun::new(RunId::new());
        run.add_reference(ReferenceRecord::new(
            Isin::new("INE000A01001"),
            "EQUITY SHARES",
            dec!(101.25),
        ));
        run.add_nse(NseQuote::new(Isin::new("INE000A01001"), dec!(101.25)));
        run.add_curve_observation(CurveObservation::new("3M", dec!(6.50)));

        let json = serde_json::to_string(&run).unwrap();
        let back: ValuationRun = serde_json::from_str(&json).unwrap();

        assert_eq!(back.run_id(), run.run_id());
        assert_eq!(back.reference().len(), 1);
        assert_eq!(back.nse().len(), 1);
        assert_eq!(back.treasury_curve().len(), 1);
        assert!(back.gsec().is_empty());
    }

    #[test]
    fn test_missing_record_sets_default_to_empty() {
        let json = format!("{{\"run_id\":\"{}\"}}", Uuid::nil());
        let run: ValuationRun = serde_json::from_str(&json).unwrap();

        assert!(run.reference().is_empty());
        assert!(run.sdl().is_empty());
        assert!(run.treasury_curve().is_empty());
    }
}
