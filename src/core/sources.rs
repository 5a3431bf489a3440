use crate::core::isin::Isin;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The corroborating market-data feeds a run may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Gsec,
    Strips,
    Sdl,
    Nse,
    Slv,
    CorporateTrades,
    CdQuotes,
}

impl SourceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Gsec => "G-Sec",
            SourceKind::Strips => "STRIPS",
            SourceKind::Sdl => "SDL",
            SourceKind::Nse => "NSE",
            SourceKind::Slv => "SLV",
            SourceKind::CorporateTrades => "corporate trades",
            SourceKind::CdQuotes => "CD quotes",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Extracts the comparison price a source row contributes.
///
/// Every feed names its price column differently (clean price,
/// settlement price, weighted average, model-chain final price); this
/// trait is the one place that mapping lives.
pub trait PriceQuote {
    fn isin(&self) -> &Isin;

    /// The price this row contributes, if the row carries one.
    fn quoted_price(&self) -> Option<Decimal>;
}

/// One row of the G-Sec clean-price sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GsecQuote {
    pub isin: Isin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<NaiveDate>,
    /// Clean price in rupees.
    #[serde(default)]
    pub price_rs: Option<Decimal>,
    /// Semi-annualized yield to maturity, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ytm: Option<Decimal>,
}

impl GsecQuote {
    pub fn new(isin: Isin, price_rs: Decimal) -> Self {
        Self {
            isin,
            description: None,
            coupon: None,
            maturity: None,
            price_rs: Some(price_rs),
            ytm: None,
        }
    }
}

impl PriceQuote for GsecQuote {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.price_rs
    }
}

/// One row of the STRIPS sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripsQuote {
    pub isin: Isin,
    /// Strip leg label, e.g. "C-STRIP 17JUN30".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<NaiveDate>,
    /// Price in rupees.
    #[serde(default)]
    pub price_rs: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi_annual_yield: Option<Decimal>,
}

impl StripsQuote {
    pub fn new(isin: Isin, price_rs: Decimal) -> Self {
        Self {
            isin,
            description: None,
            maturity: None,
            price_rs: Some(price_rs),
            semi_annual_yield: None,
        }
    }
}

impl PriceQuote for StripsQuote {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.price_rs
    }
}

/// One row of the state development loan sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdlQuote {
    pub isin: Isin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<NaiveDate>,
    /// Price in rupees.
    #[serde(default)]
    pub price_rs: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ytm: Option<Decimal>,
}

impl SdlQuote {
    pub fn new(isin: Isin, price_rs: Decimal) -> Self {
        Self {
            isin,
            description: None,
            coupon: None,
            maturity: None,
            price_rs: Some(price_rs),
            ytm: None,
        }
    }
}

impl PriceQuote for SdlQuote {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.price_rs
    }
}

/// One row of the exchange bhavcopy.
///
/// The settlement price is the corroborating price; the close is kept
/// for reporting only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NseQuote {
    pub isin: Isin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_price: Option<Decimal>,
    #[serde(default)]
    pub settlement_price: Option<Decimal>,
}

impl NseQuote {
    pub fn new(isin: Isin, settlement_price: Decimal) -> Self {
        Self {
            isin,
            ticker: None,
            series: None,
            close_price: None,
            settlement_price: Some(settlement_price),
        }
    }
}

impl PriceQuote for NseQuote {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.settlement_price
    }
}

/// One row of the security-level corporate valuation sheet.
///
/// The final price is the end of the sheet's model chain and the only
/// column the comparison reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlvQuote {
    pub isin: Isin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_yield: Option<Decimal>,
    #[serde(default)]
    pub final_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_yield: Option<Decimal>,
}

impl SlvQuote {
    pub fn new(isin: Isin, final_price: Decimal) -> Self {
        Self {
            isin,
            issuer: None,
            rating: None,
            model_price: None,
            model_yield: None,
            final_price: Some(final_price),
            final_yield: None,
        }
    }
}

impl PriceQuote for SlvQuote {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.final_price
    }
}

/// One aggregated corporate-bond trade row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporateTrade {
    pub isin: Isin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_avg_yield: Option<Decimal>,
    #[serde(default)]
    pub weighted_avg_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_count: Option<u32>,
}

impl CorporateTrade {
    pub fn new(isin: Isin, weighted_avg_price: Decimal) -> Self {
        Self {
            isin,
            description: None,
            segment: None,
            weighted_avg_yield: None,
            weighted_avg_price: Some(weighted_avg_price),
            trade_count: None,
        }
    }
}

impl PriceQuote for CorporateTrade {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.weighted_avg_price
    }
}

/// One certificate-of-deposit quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdQuote {
    pub isin: Isin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl CdQuote {
    pub fn new(isin: Isin, price: Decimal) -> Self {
        Self {
            isin,
            issuer: None,
            price: Some(price),
        }
    }
}

impl PriceQuote for CdQuote {
    fn isin(&self) -> &Isin {
        &self.isin
    }

    fn quoted_price(&self) -> Option<Decimal> {
        self.price
    }
}

/// One raw point of a published yield curve, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveObservation {
    /// Free-form tenor label, e.g. "3M" or "364 Days".
    pub tenor: String,
    /// Annualized rate in percent.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl CurveObservation {
    pub fn new(tenor: impl Into<String>, rate: Decimal) -> Self {
        Self {
            tenor: tenor.into(),
            rate: Some(rate),
        }
    }
}

/// One source's rows, normalized to the pairs the lookup engine reads.
///
/// Rows without a usable price are dropped from the pairs but still
/// count toward presence: a source that delivered rows is present even
/// when none of them priced.
#[derive(Debug, Clone)]
pub struct SourceQuotes {
    source: SourceKind,
    row_count: usize,
    quotes: Vec<(Isin, Decimal)>,
}

impl SourceQuotes {
    /// Normalize a slice of source rows.
    pub fn collect<Q: PriceQuote>(source: SourceKind, rows: &[Q]) -> Self {
        let quotes = rows
            .iter()
            .filter_map(|row| row.quoted_price().map(|price| (row.isin().clone(), price)))
            .collect();
        Self {
            source,
            row_count: rows.len(),
            quotes,
        }
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Priced rows, in source order.
    pub fn quotes(&self) -> &[(Isin, Decimal)] {
        &self.quotes
    }

    /// True when the source delivered no rows at all, priced or not.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}
