use linea_core::analysis::DistributionAnalysis;
use linea_core::clustering::{RowsResult, SweepPoint};

pub fn print_rows(result: &RowsResult, show_words: bool) {
    let multi_page = result.pages.len() > 1;

    for (i, page) in result.pages.iter().enumerate() {
        if multi_page {
            if i > 0 {
                println!();
            }
            println!("--- Page {} ({} rows) ---\n", page.page_number, page.row_count);
        }

        if page.rows.is_empty() {
            println!("  (no words)");
            continue;
        }

        let index_width = page.rows.len().saturating_sub(1).to_string().len();
        for row in &page.rows {
            println!(
                "  {:>width$}  y={:<8.1} {:>3}w  {}",
                row.row_index,
                row.y_center,
                row.word_count,
                row.full_text,
                width = index_width
            );
            if show_words {
                for w in &row.words {
                    println!(
                        "  {:>width$}      x={:<7.1} y={:<7.1} '{}'",
                        "",
                        w.x_left,
                        w.y_position(),
                        w.text,
                        width = index_width
                    );
                }
            }
        }
    }

    println!();
    println!(
        "  {} row(s), {} word(s), {} page(s) at tolerance {}",
        result.metadata.total_rows,
        result.metadata.total_words,
        result.metadata.total_pages,
        result.metadata.tolerance_used
    );
}

pub fn print_distribution(analysis: &DistributionAnalysis, tolerance: f64) {
    println!("=== Row distribution (tolerance {}) ===\n", tolerance);
    println!(
        "  Overall: {} words/row ({} words in {} rows)\n",
        analysis.avg_words_per_row, analysis.total_words, analysis.total_rows
    );

    println!("  {:<6}  {:>6}  {:>6}  {:>9}", "Page", "Rows", "Words", "Words/row");
    for page in &analysis.page_breakdown {
        println!(
            "  {:<6}  {:>6}  {:>6}  {:>9}",
            page.page_number, page.row_count, page.word_count, page.avg_words_per_row
        );
    }
    println!();
}

pub fn print_sweep(points: &[SweepPoint], total_words: usize) {
    println!("=== Tolerance sweep ({} words) ===\n", total_words);
    println!("  {:>9}  {:>6}  {:>9}", "Tolerance", "Rows", "Words/row");
    for p in points {
        match p.error {
            Some(ref err) => println!("  {:>9}  {}", p.tolerance, err),
            None => println!(
                "  {:>9}  {:>6}  {:>9}",
                p.tolerance, p.total_rows, p.avg_words_per_row
            ),
        }
    }
    println!();
}
