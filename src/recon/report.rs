use crate::core::category::Category;
use crate::core::run::RunId;
use crate::recon::mismatch::{Mismatch, MismatchStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata stamped on every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub run_id: RunId,
    pub engine_version: String,
    pub generated_at: DateTime<Utc>,
}

/// Aggregate counts over one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Categories whose comparison ran, in reporting order.
    pub categories_run: Vec<Category>,
    /// Categories skipped because required inputs were absent.
    pub categories_skipped: Vec<Category>,
    pub total_mismatches: usize,
    pub price_mismatches: usize,
    pub not_found: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl ReportSummary {
    /// Share of reported mismatches that are missing-data cases, in
    /// percent. Zero on a clean report.
    pub fn not_found_share(&self) -> f64 {
        if self.total_mismatches == 0 {
            0.0
        } else {
            self.not_found as f64 * 100.0 / self.total_mismatches as f64
        }
    }
}

/// The product of one reconciliation run.
///
/// Categories the manifest never selected are absent from the map; a
/// category that ran and found nothing is present with an empty list.
/// The distinction matters downstream: absent means "not checked",
/// empty means "checked and clean".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub categories: BTreeMap<Category, Vec<Mismatch>>,
}

impl ReconReport {
    /// Assemble a report from per-category results.
    pub(crate) fn assemble(
        run_id: RunId,
        categories: BTreeMap<Category, Vec<Mismatch>>,
        categories_skipped: Vec<Category>,
    ) -> Self {
        let mut total = 0;
        let mut price_mismatches = 0;
        let mut not_found = 0;
        let mut by_category = BTreeMap::new();
        for (category, mismatches) in &categories {
            total += mismatches.len();
            by_category.insert(*category, mismatches.len());
            for mismatch in mismatches {
                match mismatch.status {
                    MismatchStatus::PriceMismatch => price_mismatches += 1,
                    MismatchStatus::NotFound => not_found += 1,
                }
            }
        }
        Self {
            meta: ReportMeta {
                run_id,
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: Utc::now(),
            },
            summary: ReportSummary {
                categories_run: categories.keys().copied().collect(),
                categories_skipped,
                total_mismatches: total,
                price_mismatches,
                not_found,
                by_category,
            },
            categories,
        }
    }

    /// Mismatches for one category, or `None` when it never ran.
    pub fn mismatches(&self, category: Category) -> Option<&[Mismatch]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    pub fn total_mismatches(&self) -> usize {
        self.summary.total_mismatches
    }

    /// True when every category that ran reconciled cleanly.
    pub fn is_clean(&self) -> bool {
        self.summary.total_mismatches == 0
    }
}

impl fmt::Display for ReconReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Valuation Reconciliation Report ===")?;
        writeln!(f, "Run:        {}", self.meta.run_id)?;
        writeln!(f, "Generated:  {}", self.meta.generated_at.to_rfc3339())?;
        writeln!(
            f,
            "Categories: {} run, {} skipped",
            self.summary.categories_run.len(),
            self.summary.categories_skipped.len()
        )?;
        writeln!(
            f,
            "Mismatches: {} ({} price, {} missing)",
            self.summary.total_mismatches, self.summary.price_mismatches, self.summary.not_found
        )?;
        for (category, mismatches) in &self.categories {
            writeln!(f)?;
            writeln!(
                f,
                "--- {}: {} mismatches ---",
                category,
                mismatches.len()
            )?;
            for mismatch in mismatches {
                writeln!(f, "  {}", mismatch)?;
            }
        }
        if !self.summary.categories_skipped.is_empty() {
            writeln!(f)?;
            let skipped: Vec<&str> = self
                .summary
                .categories_skipped
                .iter()
                .map(|c| c.display_name())
                .collect();
            writeln!(f, "Skipped (inputs absent): {}", skipped.join(", "))?;
        }
        Ok(())
    }
}
