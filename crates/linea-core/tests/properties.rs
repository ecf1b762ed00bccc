//! Property-based tests for the row clustering invariants.

use linea_core::clustering::RowsResult;
use linea_core::config::schema::{ClusterConfig, ReferenceMode};
use linea_core::{cluster, cluster_with};
use linea_core::model::{Word, WordSet};
use proptest::prelude::*;

/// Words on up to three pages. Vertical positions are drawn from a coarse
/// grid with small jitter so that exact ties and near misses both occur.
fn word_set_strategy() -> impl Strategy<Value = WordSet> {
    let word = (1usize..=3, "[a-z]{0,6}", 0u32..600, 0u32..80, 0u32..4).prop_map(
        |(page, text, x, row, jitter)| {
            let y = row as f64 * 10.0 + jitter as f64 * 0.25;
            Word::new(page, text, x as f64, x as f64 + 20.0, y - 4.0, y + 4.0)
        },
    );
    (prop::collection::vec(word, 0..120), 3usize..=5)
        .prop_map(|(words, total_pages)| WordSet::new(words, total_pages))
}

fn tolerance_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0f64..12.0]
}

fn reference_mode_strategy() -> impl Strategy<Value = ReferenceMode> {
    prop_oneof![Just(ReferenceMode::FirstWord), Just(ReferenceMode::RunningMean)]
}

/// A word set paired with the same words in a shuffled order.
fn permuted_word_set_strategy() -> impl Strategy<Value = (WordSet, WordSet)> {
    word_set_strategy().prop_flat_map(|set| {
        let total_pages = set.total_pages;
        let shuffled = Just(set.words.clone())
            .prop_shuffle()
            .prop_map(move |words| WordSet::new(words, total_pages));
        (Just(set), shuffled)
    })
}

fn run(words: &WordSet, tolerance: f64, mode: ReferenceMode) -> RowsResult {
    cluster_with(words, &ClusterConfig::new(tolerance).with_reference_mode(mode))
}

fn row_signature(result: &RowsResult) -> Vec<(usize, String, usize)> {
    result
        .rows()
        .map(|r| (r.row_index, r.full_text.clone(), r.word_count))
        .collect()
}

proptest! {
    #[test]
    fn no_word_lost_or_duplicated(
        words in word_set_strategy(),
        t in tolerance_strategy(),
        mode in reference_mode_strategy(),
    ) {
        let result = run(&words, t, mode);
        prop_assert!(result.success);
        let clustered: usize = result.rows().map(|r| r.word_count).sum();
        prop_assert_eq!(clustered, words.total_words());
        prop_assert_eq!(result.metadata.total_words, words.total_words());
        prop_assert_eq!(result.pages.len(), words.total_pages);

        for page in &result.pages {
            for row in &page.rows {
                prop_assert_eq!(row.words.len(), row.word_count);
                prop_assert!(row.words.iter().all(|w| w.page_number == page.page_number));
            }
            let on_page = words.words.iter().filter(|w| w.page_number == page.page_number).count();
            prop_assert_eq!(page.word_count(), on_page);
        }
    }

    #[test]
    fn rows_ordered_top_to_bottom(
        words in word_set_strategy(),
        t in tolerance_strategy(),
        mode in reference_mode_strategy(),
    ) {
        let result = run(&words, t, mode);
        let page_numbers: Vec<usize> = result.pages.iter().map(|p| p.page_number).collect();
        prop_assert!(page_numbers.windows(2).all(|w| w[0] < w[1]));

        for page in &result.pages {
            prop_assert_eq!(page.row_count, page.rows.len());
            for (i, row) in page.rows.iter().enumerate() {
                prop_assert_eq!(row.row_index, i);
                prop_assert!(row.words.windows(2).all(|w| w[0].x_left <= w[1].x_left));
            }
            prop_assert!(page.rows.windows(2).all(|w| w[0].y_center <= w[1].y_center));
        }
    }

    #[test]
    fn permuted_input_gives_identical_rows(
        (words, shuffled) in permuted_word_set_strategy(),
        t in tolerance_strategy(),
        mode in reference_mode_strategy(),
    ) {
        prop_assert_eq!(
            row_signature(&run(&words, t, mode)),
            row_signature(&run(&shuffled, t, mode))
        );
    }

    // Only holds for the first-word reference; a running mean can drift.
    #[test]
    fn larger_tolerance_never_adds_rows(
        words in word_set_strategy(),
        a in tolerance_strategy(),
        b in tolerance_strategy(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let fine = cluster(&words, low).metadata.total_rows;
        let coarse = cluster(&words, high).metadata.total_rows;
        prop_assert!(fine >= coarse, "t={} gave {} rows, t={} gave {}", low, fine, high, coarse);
    }

    #[test]
    fn zero_tolerance_groups_equal_positions_only(
        words in word_set_strategy(),
        mode in reference_mode_strategy(),
    ) {
        let result = run(&words, 0.0, mode);
        for page in &result.pages {
            for row in &page.rows {
                let y = row.words[0].y_position();
                prop_assert!(row.words.iter().all(|w| w.y_position() == y));
            }
            let mut distinct: Vec<f64> = words
                .words
                .iter()
                .filter(|w| w.page_number == page.page_number)
                .map(|w| w.y_position())
                .collect();
            distinct.sort_by(|a, b| a.total_cmp(b));
            distinct.dedup();
            prop_assert_eq!(page.row_count, distinct.len());
        }
    }

    #[test]
    fn negative_tolerance_always_fails(
        words in word_set_strategy(),
        t in -100.0f64..-0.0001,
        mode in reference_mode_strategy(),
    ) {
        let result = run(&words, t, mode);
        prop_assert!(!result.success);
        prop_assert!(result.pages.is_empty());
    }
}
