pub mod analysis;
pub mod clustering;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;

use analysis::DistributionAnalysis;
use clustering::RowsResult;
use config::schema::ClusterConfig;
use error::LineaError;
use extraction::WordExtractor;
use model::WordSet;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use analysis::analyze;
pub use clustering::{cluster, cluster_with, sweep};

/// Reconstructed rows of a document together with their statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutReport {
    pub rows: RowsResult,
    pub distribution: DistributionAnalysis,
}

/// Main API entry point: extract the words of a PDF and rebuild its rows.
pub fn reconstruct_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn WordExtractor,
    config: &ClusterConfig,
) -> Result<LayoutReport, LineaError> {
    let words = extractor.extract_words(pdf_bytes)?;
    info!(
        backend = extractor.backend_name(),
        words = words.total_words(),
        pages = words.total_pages,
        "extracted words"
    );
    reconstruct(&words, config)
}

/// Cluster an already extracted word set and analyze the result.
pub fn reconstruct(words: &WordSet, config: &ClusterConfig) -> Result<LayoutReport, LineaError> {
    let rows = clustering::try_cluster_with(words, config)?;
    let distribution = analysis::analyze(&rows)?;
    info!(
        rows = rows.metadata.total_rows,
        tolerance = config.tolerance,
        reference = %config.reference_mode,
        "reconstructed rows"
    );
    Ok(LayoutReport { rows, distribution })
}
