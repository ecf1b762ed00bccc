//! Distribution statistics over reconstructed rows.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::clustering::outcome::RowsResult;
use crate::error::LineaError;

/// Decimal places used for every average in a [`DistributionAnalysis`].
pub const AVERAGE_DECIMAL_PLACES: u32 = 1;

/// Row statistics for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDistribution {
    pub page_number: usize,
    pub row_count: usize,
    pub word_count: usize,
    /// `0` for a page without rows.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_words_per_row: Decimal,
}

/// Summary of how words are spread over rows across a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionAnalysis {
    /// Mean word count over all rows of all pages, so pages with few rows
    /// weigh no more than their rows do.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_words_per_row: Decimal,
    pub total_rows: usize,
    pub total_words: usize,
    pub page_breakdown: Vec<PageDistribution>,
}

/// Derive row statistics from a successful clustering run.
pub fn analyze(result: &RowsResult) -> Result<DistributionAnalysis, LineaError> {
    if !result.success {
        let reason = result
            .error
            .as_ref()
            .map(|e| e.message.as_str())
            .unwrap_or("unknown error");
        return Err(LineaError::InvalidInput(format!(
            "cannot analyze a failed clustering run ({})",
            reason
        )));
    }

    let page_breakdown: Vec<PageDistribution> = result
        .pages
        .iter()
        .map(|page| {
            let word_count = page.word_count();
            PageDistribution {
                page_number: page.page_number,
                row_count: page.row_count,
                word_count,
                avg_words_per_row: average(word_count, page.row_count),
            }
        })
        .collect();

    let total_rows = page_breakdown.iter().map(|p| p.row_count).sum();
    let total_words = page_breakdown.iter().map(|p| p.word_count).sum();

    Ok(DistributionAnalysis {
        avg_words_per_row: average(total_words, total_rows),
        total_rows,
        total_words,
        page_breakdown,
    })
}

fn average(words: usize, rows: usize) -> Decimal {
    if rows == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(words) / Decimal::from(rows))
        .round_dp_with_strategy(AVERAGE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
