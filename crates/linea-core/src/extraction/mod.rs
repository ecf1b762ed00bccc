pub mod pdftotext;
pub mod word_set;

use crate::error::LineaError;
use crate::model::WordSet;

/// Trait for word extraction backends.
pub trait WordExtractor: Send + Sync {
    /// Extract every positioned word from PDF bytes.
    ///
    /// `total_pages` of the returned set must count pages without words too.
    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<WordSet, LineaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
