use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::analyze;
use crate::clustering::engine::cluster_with;
use crate::config::schema::{ClusterConfig, ReferenceMode};
use crate::model::WordSet;

/// Row count obtained for one tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub tolerance: f64,
    pub total_rows: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_words_per_row: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Cluster the same words once per tolerance, in the order given.
///
/// Each run is independent; a rejected tolerance only marks its own point.
pub fn sweep(words: &WordSet, tolerances: &[f64], reference_mode: ReferenceMode) -> Vec<SweepPoint> {
    tolerances
        .iter()
        .map(|&tolerance| {
            let config = ClusterConfig::new(tolerance).with_reference_mode(reference_mode);
            let result = cluster_with(words, &config);
            match analyze(&result) {
                Ok(analysis) => SweepPoint {
                    tolerance,
                    total_rows: analysis.total_rows,
                    avg_words_per_row: analysis.avg_words_per_row,
                    error: None,
                },
                Err(_) => SweepPoint {
                    tolerance,
                    total_rows: 0,
                    avg_words_per_row: Decimal::ZERO,
                    error: result.error.map(|e| e.message),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Word;
    use rust_decimal_macros::dec;

    fn words() -> WordSet {
        WordSet::from_words(vec![
            Word::at(1, "Subject", 10.0, 100.0),
            Word::at(1, "ID", 60.0, 100.2),
            Word::at(1, "Date", 10.0, 120.0),
        ])
    }

    #[test]
    fn test_sweep_keeps_order_and_counts() {
        let points = sweep(&words(), &[30.0, 0.0, 1.0], ReferenceMode::FirstWord);
        let rows: Vec<usize> = points.iter().map(|p| p.total_rows).collect();
        assert_eq!(rows, vec![1, 3, 2]);
        assert_eq!(points[2].avg_words_per_row, dec!(1.5));
        assert!(points.iter().all(|p| p.error.is_none()));
    }

    #[test]
    fn test_sweep_reports_bad_tolerance_in_place() {
        let points = sweep(&words(), &[-2.0, 1.0], ReferenceMode::FirstWord);
        assert!(points[0].error.as_deref().unwrap().contains("non-negative"));
        assert_eq!(points[1].total_rows, 2);
    }
}
