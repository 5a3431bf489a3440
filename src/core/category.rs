use serde::{Deserialize, Serialize};
use std::fmt;

/// The instrument categories a valuation run is reconciled across.
///
/// Each category carries its own comparison rule, tolerance and source
/// requirements; the reference sheet assigns instruments to categories
/// through a free-text tag matched by [`Category::matches`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CentralGovtBonds,
    StateGovtBonds,
    EquityShares,
    TreasuryBills,
    CertificatesOfDeposit,
    CorporateBonds,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 6] = [
        Category::CentralGovtBonds,
        Category::StateGovtBonds,
        Category::EquityShares,
        Category::TreasuryBills,
        Category::CertificatesOfDeposit,
        Category::CorporateBonds,
    ];

    /// The raw tag the reference sheet uses for this category.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::CentralGovtBonds => "CENTRAL GOVT BONDS",
            Category::StateGovtBonds => "STATE GOVT BONDS",
            Category::EquityShares => "EQUITY SHARES",
            Category::TreasuryBills => "Treasury Bills",
            Category::CertificatesOfDeposit => "CERTIFICATE OF DEPOSITS",
            Category::CorporateBonds => "CORPORATE BONDS",
        }
    }

    /// Whether a raw tag from the reference sheet selects this category.
    ///
    /// Treasury bills match their tag case-insensitively; every other
    /// category requires an exact match after trimming. The asymmetry
    /// mirrors the upstream sheets, where only the bill tag varies in
    /// casing between deliveries.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_recon::core::category::Category;
    ///
    /// assert!(Category::TreasuryBills.matches("TREASURY BILLS"));
    /// assert!(Category::EquityShares.matches("EQUITY SHARES"));
    /// assert!(!Category::EquityShares.matches("equity shares"));
    /// ```
    pub fn matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            Category::TreasuryBills => raw.eq_ignore_ascii_case(self.tag()),
            _ => raw == self.tag(),
        }
    }

    /// Human-readable name used in report output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::CentralGovtBonds => "Central Govt Bonds",
            Category::StateGovtBonds => "State Govt Bonds",
            Category::EquityShares => "Equity Shares",
            Category::TreasuryBills => "Treasury Bills",
            Category::CertificatesOfDeposit => "Certificates of Deposit",
            Category::CorporateBonds => "Corporate Bonds",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
