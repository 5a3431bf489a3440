use crate::core::category::Category;
use crate::core::reference::ReferenceRecord;
use crate::core::run::{RunId, ValuationRun};
use crate::core::sources::{
    CdQuote, CorporateTrade, CurveObservation, GsecQuote, NseQuote, SdlQuote, SlvQuote,
    StripsQuote,
};
use thiserror::Error;

/// Errors surfaced by a record store.
///
/// Absence of data is never an error; an empty fetch is a valid answer
/// and the engine skips the affected comparison. Errors mean the store
/// itself failed to answer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("fetching {record_set} failed: {reason}")]
    Fetch { record_set: String, reason: String },
}

/// Read interface the engine sees instead of a persistence client.
///
/// The reference side is fetched per category; every corroborating
/// source is fetched whole. [`ValuationRun`] is the in-memory
/// implementation used by tests, demos and the CLI; a database-backed
/// store implements the same trait outside this crate.
pub trait MarketDataStore {
    fn run_id(&self) -> RunId;

    /// Reference rows whose tag selects `category`, in sheet order.
    fn reference_by_category(&self, category: Category)
        -> Result<Vec<ReferenceRecord>, StoreError>;

    fn gsec_quotes(&self) -> Result<Vec<GsecQuote>, StoreError>;

    fn strips_quotes(&self) -> Result<Vec<StripsQuote>, StoreError>;

    fn sdl_quotes(&self) -> Result<Vec<SdlQuote>, StoreError>;

    fn nse_quotes(&self) -> Result<Vec<NseQuote>, StoreError>;

    fn slv_quotes(&self) -> Result<Vec<SlvQuote>, StoreError>;

    fn corporate_trades(&self) -> Result<Vec<CorporateTrade>, StoreError>;

    fn cd_quotes(&self) -> Result<Vec<CdQuote>, StoreError>;

    fn treasury_curve(&self) -> Result<Vec<CurveObservation>, StoreError>;
}

impl MarketDataStore for ValuationRun {
    fn run_id(&self) -> RunId {
        self.run_id()
    }

    fn reference_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<ReferenceRecord>, StoreError> {
        Ok(self.reference().in_category(category).cloned().collect())
    }

    fn gsec_quotes(&self) -> Result<Vec<GsecQuote>, StoreError> {
        Ok(self.gsec().to_vec())
    }

    fn strips_quotes(&self) -> Result<Vec<StripsQuote>, StoreError> {
        Ok(self.strips().to_vec())
    }

    fn sdl_quotes(&self) -> Result<Vec<SdlQuote>, StoreError> {
        Ok(self.sdl().to_vec())
    }

    fn nse_quotes(&self) -> Result<Vec<NseQuote>, StoreError> {
        Ok(self.nse().to_vec())
    }

    fn slv_quotes(&self) -> Result<Vec<SlvQuote>, StoreError> {
        Ok(self.slv().to_vec())
    }

    fn corporate_trades(&self) -> Result<Vec<CorporateTrade>, StoreError> {
        Ok(self.corporate_trades().to_vec())
    }

    fn cd_quotes(&self) -> Result<Vec<CdQuote>, StoreError> {
        Ok(self.cd_quotes().to_vec())
    }

    fn treasury_curve(&self) -> Result<Vec<CurveObservation>, StoreError> {
        Ok(self.treasury_curve().to_vec())
    }
}
