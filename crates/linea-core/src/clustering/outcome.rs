use crate::error::{ErrorKind, LineaError};
use crate::model::Word;
use serde::{Deserialize, Serialize};

/// One reconstructed line of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 0-based position of the row on its page, top to bottom.
    pub row_index: usize,
    /// Mean vertical position of the member words.
    pub y_center: f64,
    pub word_count: usize,
    /// Member texts joined left to right with a single space.
    pub full_text: String,
    /// Member words, left to right.
    pub words: Vec<Word>,
}

/// All rows reconstructed on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: usize,
    pub row_count: usize,
    pub rows: Vec<Row>,
}

impl Page {
    pub fn word_count(&self) -> usize {
        self.rows.iter().map(|r| r.word_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsMetadata {
    pub total_rows: usize,
    /// Counted from the clustered words, never copied from input metadata.
    pub total_words: usize,
    pub total_pages: usize,
    pub tolerance_used: f64,
}

/// Why a clustering run failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of a clustering run: either every page clustered, or a failure
/// with no pages at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsResult {
    pub success: bool,
    pub pages: Vec<Page>,
    pub metadata: RowsMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RowsError>,
}

impl RowsResult {
    pub(crate) fn failure(err: &LineaError, tolerance: f64, total_pages: usize) -> Self {
        RowsResult {
            success: false,
            pages: Vec::new(),
            metadata: RowsMetadata {
                total_rows: 0,
                total_words: 0,
                total_pages,
                tolerance_used: tolerance,
            },
            error: Some(RowsError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }

    /// Iterate every row of every page in reading order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.pages.iter().flat_map(|p| p.rows.iter())
    }

    /// Page by its 1-indexed number.
    pub fn page(&self, page_number: usize) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }
}
