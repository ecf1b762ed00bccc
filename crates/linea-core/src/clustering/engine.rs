use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::clustering::outcome::{Page, Row, RowsMetadata, RowsResult};
use crate::config::schema::{ClusterConfig, ReferenceMode};
use crate::config::validate_tolerance;
use crate::error::LineaError;
use crate::model::{Word, WordSet};

/// Group the words of every page into rows using the default reference mode.
///
/// Never fails: a rejected tolerance or malformed word yields a result with
/// `success: false`, the error filled in and no pages.
pub fn cluster(words: &WordSet, tolerance: f64) -> RowsResult {
    cluster_with(words, &ClusterConfig::new(tolerance))
}

/// Same as [`cluster`] with an explicit reference mode.
pub fn cluster_with(words: &WordSet, config: &ClusterConfig) -> RowsResult {
    match try_cluster_with(words, config) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, tolerance = config.tolerance, "row clustering failed");
            RowsResult::failure(&e, config.tolerance, words.total_pages)
        }
    }
}

pub fn try_cluster(words: &WordSet, tolerance: f64) -> Result<RowsResult, LineaError> {
    try_cluster_with(words, &ClusterConfig::new(tolerance))
}

/// Group the words of every page into rows, propagating the first problem
/// found in the input.
pub fn try_cluster_with(words: &WordSet, config: &ClusterConfig) -> Result<RowsResult, LineaError> {
    validate_tolerance(config.tolerance)?;
    let by_page = partition_pages(words)?;

    let mut pages = Vec::with_capacity(by_page.len());
    for (i, page_words) in by_page.into_iter().enumerate() {
        let page_number = i + 1;
        let word_count = page_words.len();
        let rows = cluster_page(page_words, config);
        debug!(page = page_number, words = word_count, rows = rows.len(), "clustered page");
        pages.push(Page {
            page_number,
            row_count: rows.len(),
            rows,
        });
    }

    let total_rows = pages.iter().map(|p| p.row_count).sum();
    let total_words = pages.iter().map(Page::word_count).sum();

    Ok(RowsResult {
        success: true,
        metadata: RowsMetadata {
            total_rows,
            total_words,
            total_pages: words.total_pages,
            tolerance_used: config.tolerance,
        },
        pages,
        error: None,
    })
}

/// Split words by page, rejecting anything the sweep cannot order.
///
/// Returns one bucket per page in `1..=total_pages`, empty pages included.
fn partition_pages(words: &WordSet) -> Result<Vec<Vec<&Word>>, LineaError> {
    let mut by_page: Vec<Vec<&Word>> = vec![Vec::new(); words.total_pages];

    for (idx, word) in words.words.iter().enumerate() {
        if word.page_number == 0 || word.page_number > words.total_pages {
            return Err(LineaError::MalformedInput {
                page: word.page_number,
                reason: format!(
                    "word {} ('{}') is outside the document's pages 1..={}",
                    idx, word.text, words.total_pages
                ),
            });
        }
        if let Some(field) = word.non_finite_coordinate() {
            return Err(LineaError::MalformedInput {
                page: word.page_number,
                reason: format!("word {} ('{}') has a non-finite {}", idx, word.text, field),
            });
        }
        by_page[word.page_number - 1].push(word);
    }

    Ok(by_page)
}

/// Top to bottom, then left to right. The remaining keys only make the
/// order total so permuted input yields identical rows.
fn reading_order(a: &Word, b: &Word) -> Ordering {
    a.y_position()
        .total_cmp(&b.y_position())
        .then_with(|| horizontal_order(a, b))
        .then_with(|| a.y_top.total_cmp(&b.y_top))
}

/// Left to right. Words sharing a left edge keep their top-to-bottom order;
/// text only decides between otherwise identical boxes.
fn horizontal_order(a: &Word, b: &Word) -> Ordering {
    a.x_left
        .total_cmp(&b.x_left)
        .then_with(|| a.y_position().total_cmp(&b.y_position()))
        .then_with(|| a.x_right.total_cmp(&b.x_right))
        .then_with(|| a.text.cmp(&b.text))
}

/// Vertical reference of the row currently being filled.
struct RowReference {
    mode: ReferenceMode,
    anchor: f64,
    mean: f64,
    count: usize,
}

impl RowReference {
    fn new(mode: ReferenceMode) -> Self {
        RowReference {
            mode,
            anchor: 0.0,
            mean: 0.0,
            count: 0,
        }
    }

    fn position(&self) -> f64 {
        match self.mode {
            ReferenceMode::FirstWord => self.anchor,
            ReferenceMode::RunningMean => self.mean,
        }
    }

    fn accepts(&self, y: f64, tolerance: f64) -> bool {
        self.count > 0 && (y - self.position()).abs() <= tolerance
    }

    fn push(&mut self, y: f64) {
        if self.count == 0 {
            self.anchor = y;
            self.mean = y;
        } else {
            // Scale before subtracting so rows spanning more than f64::MAX stay finite.
            let k = (self.count + 1) as f64;
            self.mean += y / k - self.mean / k;
        }
        self.count += 1;
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// Greedy single sweep over the page's words in reading order.
fn cluster_page(mut words: Vec<&Word>, config: &ClusterConfig) -> Vec<Row> {
    words.sort_by(|a, b| reading_order(a, b));

    let mut rows = Vec::new();
    let mut current: Vec<&Word> = Vec::new();
    let mut reference = RowReference::new(config.reference_mode);

    for word in words {
        let y = word.y_position();
        if !current.is_empty() && !reference.accepts(y, config.tolerance) {
            rows.push(build_row(rows.len(), std::mem::take(&mut current)));
            reference.reset();
        }
        reference.push(y);
        current.push(word);
    }
    if !current.is_empty() {
        rows.push(build_row(rows.len(), current));
    }

    rows
}

/// `members` arrive in vertical order and are non-empty.
fn build_row(row_index: usize, mut members: Vec<&Word>) -> Row {
    let n = members.len() as f64;
    let mut mean = 0.0;
    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    for w in &members {
        let y = w.y_position();
        // Each term is at most f64::MAX / n, so the sum cannot overflow.
        mean += y / n;
        lowest = lowest.min(y);
        highest = highest.max(y);
    }
    // Rounding must not push the center past the members, or the
    // top-to-bottom order between adjacent rows could invert.
    let y_center = mean.clamp(lowest, highest);

    members.sort_by(|a, b| horizontal_order(a, b));
    let full_text = members
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Row {
        row_index,
        y_center,
        word_count: members.len(),
        full_text,
        words: members.into_iter().cloned().collect(),
    }
}
