use serde::{Deserialize, Serialize};

/// A single extracted word with its bounding box on a page.
///
/// Coordinates follow the extractor's page space: `y` grows downwards, so a
/// smaller vertical position is closer to the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    /// 1-indexed page the word was found on.
    pub page_number: usize,
}

impl Word {
    pub fn new(
        page_number: usize,
        text: impl Into<String>,
        x_left: f64,
        x_right: f64,
        y_top: f64,
        y_bottom: f64,
    ) -> Self {
        Word {
            text: text.into(),
            x_left,
            x_right,
            y_top,
            y_bottom,
            page_number,
        }
    }

    /// A word known only by a single horizontal and vertical coordinate.
    pub fn at(page_number: usize, text: impl Into<String>, x: f64, y: f64) -> Self {
        Word::new(page_number, text, x, x, y, y)
    }

    /// Vertical position used for row clustering (center of the vertical bounds).
    pub fn y_position(&self) -> f64 {
        // Halve first so extreme finite coordinates cannot overflow.
        self.y_top / 2.0 + self.y_bottom / 2.0
    }

    /// Name of the first non-finite coordinate, if any.
    pub fn non_finite_coordinate(&self) -> Option<&'static str> {
        [
            ("x_left", self.x_left),
            ("x_right", self.x_right),
            ("y_top", self.y_top),
            ("y_bottom", self.y_bottom),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

/// Every word extracted from a document, in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordSet {
    pub words: Vec<Word>,
    /// Number of pages in the source document, including pages without words.
    pub total_pages: usize,
}

impl WordSet {
    pub fn new(words: Vec<Word>, total_pages: usize) -> Self {
        WordSet { words, total_pages }
    }

    /// Build a word set whose page count is the highest page holding a word.
    pub fn from_words(words: Vec<Word>) -> Self {
        let total_pages = words.iter().map(|w| w.page_number).max().unwrap_or(0);
        WordSet { words, total_pages }
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_position_is_vertical_center() {
        let w = Word::new(1, "Subject", 10.0, 50.0, 96.0, 104.0);
        assert_eq!(w.y_position(), 100.0);
        assert_eq!(Word::at(1, "ID", 60.0, 100.2).y_position(), 100.2);
    }

    #[test]
    fn non_finite_coordinate_is_named() {
        let mut w = Word::at(2, "x", 1.0, 2.0);
        assert_eq!(w.non_finite_coordinate(), None);
        w.y_bottom = f64::NAN;
        assert_eq!(w.non_finite_coordinate(), Some("y_bottom"));
        w.x_left = f64::INFINITY;
        assert_eq!(w.non_finite_coordinate(), Some("x_left"));
    }

    #[test]
    fn from_words_counts_pages() {
        let set = WordSet::from_words(vec![Word::at(3, "a", 0.0, 0.0), Word::at(1, "b", 0.0, 0.0)]);
        assert_eq!(set.total_pages, 3);
        assert_eq!(set.total_words(), 2);
        assert!(WordSet::from_words(vec![]).is_empty());
    }
}
