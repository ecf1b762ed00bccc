use linea_core::config::builtin;
use linea_core::error::LineaError;
use std::path::PathBuf;

use crate::commands::{load_words, parse_reference};
use crate::output;

pub fn run(
    input_file: PathBuf,
    tolerances: Vec<f64>,
    reference: Option<&str>,
    output_format: &str,
) -> Result<(), LineaError> {
    let reference_mode = parse_reference(reference)?.unwrap_or_default();

    let tolerances = if tolerances.is_empty() {
        builtin::PRESETS
            .iter()
            .map(|name| builtin::load_preset(name).map(|c| c.tolerance))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        tolerances
    };

    let words = load_words(&input_file)?;
    let points = linea_core::sweep(&words, &tolerances, reference_mode);

    match output_format {
        "json" => output::json::print(&points)?,
        _ => output::table::print_sweep(&points, words.total_words()),
    }

    Ok(())
}
