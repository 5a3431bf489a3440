use serde::{Deserialize, Serialize};
use std::fmt;

/// International Securities Identification Number.
///
/// The instrument key every record set in a valuation run is keyed by.
/// Source sheets routinely pad the ISIN column, so construction trims
/// surrounding whitespace once and lookups never re-normalize.
///
/// # Examples
///
/// ```
/// use valuation_recon::core::isin::Isin;
///
/// let padded = Isin::new(" INE002A01018 ");
/// let clean = Isin::new("INE002A01018");
/// assert_eq!(padded, clean);
/// assert_eq!(padded.as_str(), "INE002A01018");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Isin(String);

impl Isin {
    /// Create a new ISIN, trimming surrounding whitespace.
    pub fn new(isin: impl Into<String>) -> Self {
        Self(isin.into().trim().to_string())
    }

    /// Returns the normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Isin {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Isin {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
