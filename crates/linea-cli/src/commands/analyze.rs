use linea_core::error::LineaError;
use std::path::PathBuf;

use crate::commands::{load_words, resolve_config};
use crate::output;
use crate::ClusterArgs;

pub fn run(
    input_file: PathBuf,
    cluster_args: &ClusterArgs,
    output_format: &str,
) -> Result<(), LineaError> {
    let config = resolve_config(cluster_args)?;
    let words = load_words(&input_file)?;
    let report = linea_core::reconstruct(&words, &config)?;

    match output_format {
        "json" => output::json::print(&report.distribution)?,
        _ => output::table::print_distribution(&report.distribution, config.tolerance),
    }

    Ok(())
}
