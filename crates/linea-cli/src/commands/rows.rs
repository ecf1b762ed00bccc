use linea_core::error::LineaError;
use std::path::PathBuf;

use crate::commands::{load_words, resolve_config};
use crate::output;
use crate::ClusterArgs;

pub fn run(
    input_file: PathBuf,
    cluster_args: &ClusterArgs,
    output_format: &str,
    output_file: Option<PathBuf>,
    show_words: bool,
) -> Result<(), LineaError> {
    let config = resolve_config(cluster_args)?;
    let words = load_words(&input_file)?;

    if output_file.is_none() && output_format != "json" {
        let result = linea_core::clustering::try_cluster_with(&words, &config)?;
        output::table::print_rows(&result, show_words);
        return Ok(());
    }

    // JSON consumers get the failure envelope instead of a bare error.
    let result = linea_core::cluster_with(&words, &config);
    match output_file {
        Some(path) => {
            let json = serde_json::to_string_pretty(&result)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Reconstructed {} row(s) on {} page(s), written to {}",
                result.metadata.total_rows,
                result.pages.len(),
                path.display()
            );
        }
        None => output::json::print(&result)?,
    }

    if result.success {
        Ok(())
    } else {
        Err(LineaError::InvalidInput(
            "row clustering failed, see the error field of the output".into(),
        ))
    }
}
