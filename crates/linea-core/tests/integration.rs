//! Integration tests for the reconstruct_pdf() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns a pre-built WordSet without
//! invoking pdftotext, so these tests run without poppler-utils.

use linea_core::config::builtin::load_preset;
use linea_core::config::schema::{ClusterConfig, ReferenceMode};
use linea_core::error::{ErrorKind, LineaError};
use linea_core::extraction::word_set::parse_word_set_str;
use linea_core::extraction::WordExtractor;
use linea_core::model::{Word, WordSet};
use linea_core::{analyze, cluster, reconstruct, reconstruct_pdf, sweep};
use rust_decimal_macros::dec;

struct MockExtractor {
    words: WordSet,
}

impl WordExtractor for MockExtractor {
    fn extract_words(&self, _pdf_bytes: &[u8]) -> Result<WordSet, LineaError> {
        Ok(self.words.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// A word with a realistic 10pt box centered on `y`.
fn word(page: usize, text: &str, x: f64, y: f64) -> Word {
    Word::new(page, text, x, x + 6.0 * text.len() as f64, y - 5.0, y + 5.0)
}

fn form_document() -> WordSet {
    WordSet::new(
        vec![
            word(1, "Date:", 72.0, 140.0),
            word(1, "ID:", 300.0, 100.4),
            word(1, "Subject", 72.0, 100.0),
            word(1, "2024-03-01", 110.0, 140.3),
            word(1, "S-001", 330.0, 100.6),
            word(2, "Visit", 72.0, 90.0),
            word(2, "1", 110.0, 90.0),
        ],
        3,
    )
}

// ---------------------------------------------------------------------------
// Pipeline through a mocked extractor
// ---------------------------------------------------------------------------
#[test]
fn pdf_pipeline_with_standard_preset() {
    let extractor = MockExtractor {
        words: form_document(),
    };
    let config = load_preset("standard").unwrap();

    let report = reconstruct_pdf(&[], &extractor, &config).unwrap();

    assert!(report.rows.success);
    assert_eq!(report.rows.pages.len(), 3);
    let page1: Vec<&str> = report.rows.pages[0]
        .rows
        .iter()
        .map(|r| r.full_text.as_str())
        .collect();
    assert_eq!(page1, vec!["Subject ID: S-001", "Date: 2024-03-01"]);
    assert_eq!(report.rows.pages[1].rows[0].full_text, "Visit 1");
    assert_eq!(report.rows.page(3).unwrap().row_count, 0);

    assert_eq!(report.rows.metadata.total_words, 7);
    assert_eq!(report.rows.metadata.total_rows, 3);
    assert_eq!(report.rows.metadata.tolerance_used, 3.0);

    // 7 words over 3 rows.
    assert_eq!(report.distribution.avg_words_per_row, dec!(2.3));
    assert_eq!(report.distribution.page_breakdown[0].avg_words_per_row, dec!(2.5));
    assert_eq!(report.distribution.page_breakdown[2].avg_words_per_row, dec!(0));
}

#[test]
fn exact_preset_splits_jittered_rows() {
    let report = reconstruct(&form_document(), &load_preset("exact").unwrap()).unwrap();
    // Every distinct vertical center on page 1 becomes its own row.
    assert_eq!(report.rows.pages[0].row_count, 5);
    assert_eq!(report.rows.pages[1].row_count, 1);
}

#[test]
fn extractor_error_propagates() {
    struct Failing;
    impl WordExtractor for Failing {
        fn extract_words(&self, _: &[u8]) -> Result<WordSet, LineaError> {
            Err(LineaError::PdftotextNotFound)
        }
        fn backend_name(&self) -> &str {
            "failing"
        }
    }

    let err = reconstruct_pdf(b"%PDF", &Failing, &ClusterConfig::new(1.0)).unwrap_err();
    assert!(matches!(err, LineaError::PdftotextNotFound));
}

#[test]
fn reconstruct_rejects_negative_tolerance() {
    let err = reconstruct(&form_document(), &ClusterConfig::new(-3.0)).unwrap_err();
    assert!(matches!(err, LineaError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// Persisted word sets
// ---------------------------------------------------------------------------
#[test]
fn json_word_set_round_through_engine() {
    let json = r#"{
        "pages": {
            "1": { "words": [
                { "text": "Subject", "x0": 10, "x1": 50, "top": 95, "bottom": 105 },
                { "text": "ID", "x0": 60, "x1": 70, "top": 95.2, "bottom": 105.2 },
                { "text": "Date", "x0": 10, "x1": 40, "top": 115, "bottom": 125 }
            ] },
            "2": { "words": [] }
        },
        "metadata": { "total_words": 42, "total_pages": 2 }
    }"#;
    let words = parse_word_set_str(json).unwrap();

    let result = cluster(&words, 1.0);
    assert!(result.success);
    // The declared 42 is ignored in favour of the actual list.
    assert_eq!(result.metadata.total_words, 3);
    assert_eq!(result.pages[0].rows[0].full_text, "Subject ID");
    assert_eq!(result.pages[1].row_count, 0);

    let analysis = analyze(&result).unwrap();
    assert_eq!(analysis.avg_words_per_row, dec!(1.5));
}

#[test]
fn failed_run_serializes_with_error_envelope() {
    let words = WordSet::new(vec![word(9, "stray", 0.0, 0.0)], 2);
    let result = cluster(&words, 1.0);
    assert!(!result.success);
    assert_eq!(result.error.as_ref().unwrap().kind, ErrorKind::MalformedInput);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["kind"], "malformed_input");
    assert!(json["pages"].as_array().unwrap().is_empty());

    let ok = serde_json::to_value(cluster(&form_document(), 1.0)).unwrap();
    assert!(ok.get("error").is_none());
}

// ---------------------------------------------------------------------------
// Comparing tolerances on one input
// ---------------------------------------------------------------------------
#[test]
fn sweep_compares_tolerances_independently() {
    let words = form_document();
    let points = sweep(&words, &[0.0, 0.5, 3.0, 100.0], ReferenceMode::FirstWord);
    let rows: Vec<usize> = points.iter().map(|p| p.total_rows).collect();
    assert_eq!(rows, vec![6, 4, 3, 2]);

    // Running the sweep did not change what a single call returns.
    assert_eq!(cluster(&words, 0.5).metadata.total_rows, 4);
}
