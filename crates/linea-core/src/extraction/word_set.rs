use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::LineaError;
use crate::model::{Word, WordSet};

/// Persisted output of an earlier extraction run.
///
/// Either a document keyed by page:
///
/// ```json
/// { "pages": { "1": { "words": [ { "text": "Subject", "x0": 10, "x1": 50, "top": 96, "bottom": 104 } ] } },
///   "metadata": { "total_words": 1, "total_pages": 1 } }
/// ```
///
/// or a flat array of words that each carry `page_number`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordSetDocument {
    Paged(PagedDocument),
    Flat(Vec<RawWord>),
}

#[derive(Debug, Deserialize)]
struct PagedDocument {
    pages: RawPages,
    #[serde(default)]
    metadata: Option<DeclaredMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPages {
    Keyed(BTreeMap<String, RawPage>),
    Listed(Vec<RawPage>),
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default, alias = "page")]
    page_number: Option<usize>,
    #[serde(default)]
    words: Vec<RawWord>,
}

/// Counts claimed by the producer. Only used for consistency warnings.
#[derive(Debug, Default, Deserialize)]
struct DeclaredMetadata {
    #[serde(default)]
    total_words: Option<usize>,
    #[serde(default)]
    total_pages: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    text: String,
    #[serde(default, alias = "x0")]
    x_left: Option<f64>,
    #[serde(default, alias = "x1")]
    x_right: Option<f64>,
    #[serde(default, alias = "top")]
    y_top: Option<f64>,
    #[serde(default, alias = "bottom")]
    y_bottom: Option<f64>,
    #[serde(default, alias = "baseline")]
    y_center: Option<f64>,
    #[serde(default, alias = "page")]
    page_number: Option<usize>,
}

impl RawWord {
    fn into_word(self, page_number: usize, index: usize) -> Result<Word, LineaError> {
        let malformed = |what: &str| LineaError::MalformedInput {
            page: page_number,
            reason: format!("word {} ('{}') has no {} coordinate", index, self.text, what),
        };

        let x_left = self.x_left.ok_or_else(|| malformed("horizontal"))?;
        let x_right = self.x_right.unwrap_or(x_left);
        let (y_top, y_bottom) = match (self.y_top, self.y_bottom, self.y_center) {
            (Some(top), Some(bottom), _) => (top, bottom),
            (_, _, Some(center)) => (center, center),
            _ => return Err(malformed("vertical")),
        };

        Ok(Word::new(page_number, self.text, x_left, x_right, y_top, y_bottom))
    }
}

/// Load a word set from a JSON file.
pub fn load_word_set(path: &Path) -> Result<WordSet, LineaError> {
    let content = std::fs::read_to_string(path).map_err(|e| LineaError::WordSetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let document: WordSetDocument =
        serde_json::from_str(&content).map_err(|e| LineaError::WordSetLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    build_word_set(document)
}

/// Parse a word set from a JSON string.
pub fn parse_word_set_str(json: &str) -> Result<WordSet, LineaError> {
    let document: WordSetDocument = serde_json::from_str(json)?;
    build_word_set(document)
}

fn build_word_set(document: WordSetDocument) -> Result<WordSet, LineaError> {
    let (words, highest_page, declared) = match document {
        WordSetDocument::Flat(raw) => {
            let mut words = Vec::with_capacity(raw.len());
            for (index, w) in raw.into_iter().enumerate() {
                let page_number = w.page_number.ok_or_else(|| LineaError::MalformedInput {
                    page: 0,
                    reason: format!("word {} ('{}') has no page_number", index, w.text),
                })?;
                words.push(w.into_word(page_number, index)?);
            }
            let highest = words.iter().map(|w| w.page_number).max().unwrap_or(0);
            (words, highest, DeclaredMetadata::default())
        }
        WordSetDocument::Paged(doc) => {
            let pages = numbered_pages(doc.pages)?;
            let highest = pages.iter().map(|(n, _)| *n).max().unwrap_or(0);
            let mut words = Vec::new();
            for (page_number, page) in pages {
                for (index, w) in page.words.into_iter().enumerate() {
                    words.push(w.into_word(page_number, index)?);
                }
            }
            (words, highest, doc.metadata.unwrap_or_default())
        }
    };

    if let Some(declared_words) = declared.total_words {
        if declared_words != words.len() {
            warn!(
                declared = declared_words,
                actual = words.len(),
                "word set metadata disagrees with its word list, using the list"
            );
        }
    }

    let total_pages = match declared.total_pages {
        Some(declared_pages) if declared_pages >= highest_page => declared_pages,
        Some(declared_pages) => {
            warn!(
                declared = declared_pages,
                highest = highest_page,
                "word set declares fewer pages than it holds, using the highest page"
            );
            highest_page
        }
        None => highest_page,
    };

    Ok(WordSet::new(words, total_pages))
}

/// Resolve every page to its 1-indexed number.
fn numbered_pages(pages: RawPages) -> Result<Vec<(usize, RawPage)>, LineaError> {
    let numbered: Vec<(usize, RawPage)> = match pages {
        RawPages::Keyed(map) => map
            .into_iter()
            .map(|(key, page)| {
                key.trim()
                    .parse::<usize>()
                    .map(|n| (n, page))
                    .map_err(|_| LineaError::MalformedInput {
                        page: 0,
                        reason: format!("page key '{}' is not a page number", key),
                    })
            })
            .collect::<Result<_, _>>()?,
        RawPages::Listed(list) => list
            .into_iter()
            .enumerate()
            .map(|(i, page)| (page.page_number.unwrap_or(i + 1), page))
            .collect(),
    };

    if let Some((n, _)) = numbered.iter().find(|(n, _)| *n == 0) {
        return Err(LineaError::MalformedInput {
            page: *n,
            reason: "page numbers start at 1".into(),
        });
    }

    Ok(numbered)
}
