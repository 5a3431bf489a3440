use crate::core::category::Category;
use crate::core::isin::Isin;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a reference row is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchStatus {
    /// No corroborating source priced the instrument.
    NotFound,
    /// A corroborating price exists and differs beyond tolerance.
    PriceMismatch,
}

impl fmt::Display for MismatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MismatchStatus::NotFound => "not found in corroborating source",
            MismatchStatus::PriceMismatch => "price mismatch",
        };
        write!(f, "{}", text)
    }
}

/// A reported discrepancy for one instrument.
///
/// Built fresh on every run and never mutated afterwards; instruments
/// that reconcile cleanly produce nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    pub isin: Isin,
    pub status: MismatchStatus,
    /// The reference price the comparison used, after any substitution.
    pub reference_price: Decimal,
    /// Corroborating price, or the computed price for treasury bills.
    /// Absent when the instrument was not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_price: Option<Decimal>,
    /// Absolute difference between the two prices; present only for
    /// price mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<Decimal>,
    pub category: Category,
}

impl Mismatch {
    /// Report an instrument no source priced.
    pub fn not_found(isin: Isin, reference_price: Decimal, category: Category) -> Self {
        Self {
            isin,
            status: MismatchStatus::NotFound,
            reference_price,
            market_price: None,
            difference: None,
            category,
        }
    }

    /// Report an out-of-tolerance price difference.
    pub fn price_mismatch(
        isin: Isin,
        reference_price: Decimal,
        market_price: Decimal,
        difference: Decimal,
        category: Category,
    ) -> Self {
        Self {
            isin,
            status: MismatchStatus::PriceMismatch,
            reference_price,
            market_price: Some(market_price),
            difference: Some(difference),
            category,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            MismatchStatus::NotFound => {
                write!(
                    f,
                    "{} {}: reference {}",
                    self.isin, self.status, self.reference_price
                )
            }
            MismatchStatus::PriceMismatch => {
                write!(
                    f,
                    "{} {}: reference {}, market {}, diff {}",
                    self.isin,
                    self.status,
                    self.reference_price,
                    self.market_price.unwrap_or_default(),
                    self.difference.unwrap_or_default()
                )
            }
        }
    }
}
